/// Template (macro) transclusion `{{name|arg|...}}`.
pub struct Template;

impl Template {
    pub const OPEN: &'static [u8; 2] = b"{{";
    pub const CLOSE: &'static [u8; 2] = b"}}";
    pub const ARG: u8 = b'|';
}
