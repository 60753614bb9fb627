/// Section heading `== Title ==`, only recognised at line start.
pub struct Heading;

impl Heading {
    pub const MARK: u8 = b'=';
    pub const MAX_LEVEL: usize = 6;
}
