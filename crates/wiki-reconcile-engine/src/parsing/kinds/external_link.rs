/// Bracketed external link `[https://example.org label]`.
pub struct ExternalLink;

impl ExternalLink {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';

    const SCHEMES: [&'static str; 5] = ["http://", "https://", "ftp://", "mailto:", "//"];

    /// Returns true if `s` begins with a URL scheme bracketed links accept.
    pub fn starts_with_scheme(s: &str) -> bool {
        Self::SCHEMES.iter().any(|scheme| {
            s.get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        })
    }
}
