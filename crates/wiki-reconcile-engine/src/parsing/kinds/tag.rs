/// HTML-like tags `<name attrs>children</name>`.
pub struct HtmlTag;

impl HtmlTag {
    pub const OPEN: u8 = b'<';
    pub const CLOSE: u8 = b'>';
    pub const SELF_CLOSE: &'static [u8; 2] = b"/>";

    /// Tags that never take content.
    const VOID: [&'static str; 3] = ["br", "hr", "wbr"];
    /// Tags whose content is kept verbatim and never parsed as markup.
    const RAW: [&'static str; 6] = ["nowiki", "pre", "math", "source", "syntaxhighlight", "code"];
    /// Citation wrappers dropped, with their content, by stripped projection.
    const CITATION: [&'static str; 2] = ["ref", "references"];

    pub fn is_void(name: &str) -> bool {
        Self::VOID.contains(&name)
    }

    pub fn is_raw(name: &str) -> bool {
        Self::RAW.contains(&name)
    }

    pub fn is_citation(name: &str) -> bool {
        Self::CITATION.contains(&name)
    }
}
