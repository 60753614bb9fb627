/// Internal link `[[target]]` or `[[target|display]]`.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: u8 = b'|';
    /// Leading colon that turns a namespaced link into an inline one.
    pub const ESCAPE: char = ':';

    /// Namespaces whose links are media or metadata and render no text.
    const SILENT_NAMESPACES: [&'static str; 3] = ["file:", "image:", "category:"];

    /// Link markup to `target` showing `display`, piped only when they differ.
    pub fn markup(target: &str, display: &str) -> String {
        let mut out = Self::opening(target);
        if display != target {
            out.push(char::from(Self::ALIAS));
            out.push_str(display);
        }
        push_delimiter(&mut out, Self::CLOSE);
        out
    }

    /// `[[target`, as written where a link to `target` begins.
    pub fn opening(target: &str) -> String {
        let mut out = String::with_capacity(target.len() + Self::OPEN.len());
        push_delimiter(&mut out, Self::OPEN);
        out.push_str(target);
        out
    }

    /// `text]]`, as written where a link ending in `text` closes.
    pub fn closing(text: &str) -> String {
        let mut out = text.to_string();
        push_delimiter(&mut out, Self::CLOSE);
        out
    }

    /// Returns true if a link to `target` contributes nothing to plain text.
    pub fn is_silent(target: &str) -> bool {
        let t = target.trim_start();
        if t.starts_with(Self::ESCAPE) {
            return false;
        }
        Self::SILENT_NAMESPACES.iter().any(|ns| {
            t.get(..ns.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ns))
        })
    }
}

fn push_delimiter(out: &mut String, delimiter: &[u8]) {
    out.extend(delimiter.iter().copied().map(char::from));
}
