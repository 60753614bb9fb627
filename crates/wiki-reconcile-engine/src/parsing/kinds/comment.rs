/// HTML comment. Content is never parsed and never rendered.
pub struct Comment;

impl Comment {
    pub const OPEN: &'static [u8; 4] = b"<!--";
    pub const CLOSE: &'static str = "-->";
}
