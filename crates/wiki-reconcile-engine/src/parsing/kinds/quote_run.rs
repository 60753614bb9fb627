/// Bold/italic apostrophe runs: `''` italic, `'''` bold, `'''''` both.
pub struct QuoteRun;

impl QuoteRun {
    pub const QUOTE: u8 = b'\'';
    /// The longest run that is entirely markup.
    pub const MAX_MARKUP: usize = 5;

    /// Splits a run of `len` apostrophes into (literal, markup) lengths.
    ///
    /// A run of four keeps one literal apostrophe before a bold marker; runs
    /// longer than five keep the extras as literal text.
    pub fn split(len: usize) -> (usize, usize) {
        match len {
            0 | 1 => (len, 0),
            4 => (1, 3),
            n if n > Self::MAX_MARKUP => (n - Self::MAX_MARKUP, Self::MAX_MARKUP),
            n => (0, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_runs() {
        assert_eq!(QuoteRun::split(1), (1, 0));
        assert_eq!(QuoteRun::split(2), (0, 2));
        assert_eq!(QuoteRun::split(3), (0, 3));
        assert_eq!(QuoteRun::split(4), (1, 3));
        assert_eq!(QuoteRun::split(5), (0, 5));
        assert_eq!(QuoteRun::split(7), (2, 5));
    }
}
