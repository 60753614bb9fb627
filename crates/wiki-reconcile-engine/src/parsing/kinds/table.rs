/// Wikitable `{| ... |}`; every delimiter here only counts at line start
/// (after optional leading whitespace), except the inline cell separators.
pub struct Table;

impl Table {
    pub const OPEN: &'static str = "{|";
    pub const CLOSE: &'static str = "|}";
    pub const ROW: &'static str = "|-";
    pub const CAPTION: &'static str = "|+";
    pub const CELL: u8 = b'|';
    pub const HEADER_CELL: u8 = b'!';
    pub const CELL_SEP: &'static str = "||";
    pub const HEADER_CELL_SEP: &'static str = "!!";
    /// Separator placed between rendered cells of a row.
    pub const RENDER_CELL_JOIN: &'static str = " | ";
    /// Separator placed between rendered rows.
    pub const RENDER_ROW_JOIN: &'static str = "\n";
}
