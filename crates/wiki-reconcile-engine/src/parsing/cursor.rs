/// A cursor for byte-by-byte markup parsing with position tracking.
///
/// Operates over a slice of the document while tracking the absolute byte
/// position in the full document (via `base`). All delimiters the parser looks
/// for are ASCII, so any position where a construct starts or ends is also a
/// char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The slice being parsed.
    pub s: &'a str,
    /// Offset of `s` in the full document.
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
    /// Whether local index 0 is the start of a line in the full document.
    bol: bool,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over `s`, which starts at `base` in the full document.
    pub fn new(s: &'a str, base: usize, bol: bool) -> Self {
        Self { s, base, i: 0, bol }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns true if at end of input.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Returns true if the cursor sits at the start of a line.
    pub fn at_line_start(&self) -> bool {
        if self.i == 0 {
            self.bol
        } else {
            self.s.as_bytes().get(self.i - 1) == Some(&b'\n')
        }
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead of the current position.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// The unparsed remainder.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Moves to an absolute document position inside this cursor's slice.
    pub fn seek(&mut self, pos: usize) {
        self.i = pos - self.base;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 10, true);
        assert_eq!(cur.pos(), 10);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 11);
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("[[link]]", 0, true);
        assert!(cur.starts_with(b"[["));
        assert!(!cur.starts_with(b"]]"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("", 0, true);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.pos(), 0);
        assert_eq!(cur.rest(), "");
    }

    #[test]
    fn starts_with_at_eof() {
        let mut cur = Cursor::new("ab", 0, true);
        cur.bump_n(2);
        assert!(cur.eof());
        assert!(cur.starts_with(b""));
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x", 0, true);
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn line_start_tracks_newlines() {
        let mut cur = Cursor::new("a\nb", 0, false);
        assert!(!cur.at_line_start());
        cur.bump_n(2);
        assert!(cur.at_line_start());
        assert_eq!(cur.peek(), Some(b'b'));
    }

    #[test]
    fn seek_uses_absolute_positions() {
        let mut cur = Cursor::new("abcdef", 100, true);
        cur.seek(103);
        assert_eq!(cur.peek(), Some(b'd'));
        assert_eq!(cur.rest(), "def");
        assert_eq!(cur.peek_at(2), Some(b'f'));
    }
}
