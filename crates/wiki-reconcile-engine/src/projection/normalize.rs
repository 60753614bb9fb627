/// Collapses every whitespace run to a single space and trims both edges.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-normalized view of a raw string, with a byte-level table back
/// to raw offsets.
///
/// `offsets[i]` is the raw byte offset of normalized byte `i`; a collapsed
/// space maps to the first whitespace char of its run. The table has one
/// extra entry for the end of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    offsets: Vec<usize>,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        let mut text = String::with_capacity(raw.len());
        let mut offsets = Vec::with_capacity(raw.len() + 1);
        let mut pending_space: Option<usize> = None;
        let mut raw_end = 0usize;

        for (idx, ch) in raw.char_indices() {
            if ch.is_whitespace() {
                if !text.is_empty() && pending_space.is_none() {
                    pending_space = Some(idx);
                }
                continue;
            }
            if let Some(space_at) = pending_space.take() {
                text.push(' ');
                offsets.push(space_at);
            }
            text.push(ch);
            offsets.extend((0..ch.len_utf8()).map(|k| idx + k));
            raw_end = idx + ch.len_utf8();
        }
        offsets.push(raw_end);

        Self { text, offsets }
    }

    /// Raw offset of a normalized start offset.
    pub fn raw_start(&self, norm: usize) -> usize {
        self.offsets[norm.min(self.text.len())]
    }

    /// Raw offset of a normalized exclusive end offset.
    pub fn raw_end(&self, norm: usize) -> usize {
        match norm.min(self.text.len()) {
            0 => self.offsets[0],
            n => self.offsets[n - 1] + 1,
        }
    }

    /// Finds `needle` (already normalized) and returns its raw byte range.
    pub fn find_raw(&self, needle: &str) -> Option<(usize, usize)> {
        let at = self.text.find(needle)?;
        Some((self.raw_start(at), self.raw_end(at + needle.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Hello   world \n", "Hello world")]
    #[case("a\tb\nc", "a b c")]
    #[case("   ", "")]
    #[case("", "")]
    #[case("über  café", "über café")]
    fn collapses_and_trims(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_whitespace(raw), expected);
        assert_eq!(NormalizedText::new(raw).text, expected);
    }

    #[test]
    fn offsets_point_back_into_raw() {
        let raw = "  ab   cd ";
        let n = NormalizedText::new(raw);
        assert_eq!(n.text, "ab cd");
        assert_eq!(n.raw_start(0), 2);
        assert_eq!(n.raw_start(2), 4);
        assert_eq!(n.raw_start(3), 7);
        assert_eq!(n.raw_end(5), 9);
        assert_eq!(n.find_raw("b cd"), Some((3, 9)));
    }

    #[test]
    fn multibyte_offsets_stay_on_boundaries() {
        let raw = "é  ü";
        let n = NormalizedText::new(raw);
        assert_eq!(n.text, "é ü");
        assert_eq!(n.find_raw("ü"), Some((4, 6)));
        assert_eq!(n.find_raw("é"), Some((0, 2)));
    }
}
