//! Line-start constructs: section headings and wikitables.
//!
//! Both are only recognised when the cursor sits at the start of a line. The
//! parser tries them before any inline construct.

use super::{
    cursor::Cursor,
    kinds::{Heading, Table, Template, WikiLink},
    parser::parse_range,
    span::Span,
    types::{MarkupNode, TableCell, TableRow},
};

/// Yields each line of `s` as an absolute span without its trailing newline.
pub(super) fn line_spans(s: &str, base: usize) -> impl Iterator<Item = Span> + '_ {
    let mut offset = 0usize;
    s.split_inclusive('\n').map(move |line| {
        let start = base + offset;
        offset += line.len();
        let content = line.strip_suffix('\n').unwrap_or(line);
        Span::new(start, start + content.len())
    })
}

/// Attempts to parse a `== Title ==` heading line.
///
/// Level is the shorter of the two `=` runs, capped at six. Trailing
/// whitespace after the closing run is allowed and kept outside the node.
pub(super) fn try_parse_heading(src: &str, cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if cur.peek() != Some(Heading::MARK) {
        return None;
    }

    let rest = cur.rest();
    let line = rest.find('\n').map_or(rest, |nl| &rest[..nl]).trim_end();
    let left = line.bytes().take_while(|&b| b == Heading::MARK).count();
    if left == line.len() {
        return None;
    }
    let right = line.bytes().rev().take_while(|&b| b == Heading::MARK).count();
    let level = left.min(right).min(Heading::MAX_LEVEL);
    if level == 0 {
        return None;
    }

    let start = cur.pos();
    let title = Span::new(start + level, start + line.len() - level);
    if title.slice(src).trim().is_empty() {
        return None;
    }
    cur.bump_n(line.len());

    Some(MarkupNode::Heading {
        full: Span::new(start, cur.pos()),
        level: level as u8,
        title: parse_range(src, title),
    })
}

/// Attempts to parse a `{| ... |}` table starting at the cursor.
///
/// The closing `|}` must begin a line (after optional indentation); nested
/// tables are balanced. An unclosed table restores nothing and returns `None`,
/// leaving the opener to be read as text.
pub(super) fn try_parse_table(src: &str, cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if !cur.starts_with(Table::OPEN.as_bytes()) {
        return None;
    }

    let start = cur.pos();
    let mut depth = 0usize;
    let mut body = vec![];
    let mut end = None;

    for (idx, line) in line_spans(cur.rest(), start).enumerate() {
        if idx == 0 {
            depth = 1;
            continue;
        }
        let text = line.slice(src);
        let trimmed = text.trim_start();
        if trimmed.starts_with(Table::OPEN) {
            depth += 1;
        } else if trimmed.starts_with(Table::CLOSE) {
            depth -= 1;
            if depth == 0 {
                let indent = text.len() - trimmed.len();
                end = Some(line.start + indent + Table::CLOSE.len());
                break;
            }
        }
        body.push(line);
    }

    let end = end?;
    cur.seek(end);
    Some(MarkupNode::Table {
        full: Span::new(start, end),
        rows: parse_rows(src, &body),
    })
}

/// A cell whose content may still grow with continuation lines.
struct CellDraft {
    span: Span,
    content: Span,
    header: bool,
}

#[derive(Default)]
struct RowDraft {
    span: Option<Span>,
    cells: Vec<CellDraft>,
}

impl RowDraft {
    fn extend_to(&mut self, line: Span) {
        self.span = Some(match self.span {
            Some(sp) => Span::new(sp.start, line.end),
            None => line,
        });
    }

    /// Continuation lines belong to the last cell; before any cell they are
    /// attribute noise and get dropped.
    fn extend_last_cell(&mut self, line: Span) {
        if let Some(cell) = self.cells.last_mut() {
            cell.span.end = line.end;
            cell.content.end = line.end;
            self.extend_to(line);
        }
    }

    fn finish(self, src: &str, rows: &mut Vec<TableRow>) {
        let Some(span) = self.span else {
            return;
        };
        let cells = self
            .cells
            .into_iter()
            .map(|c| TableCell {
                span: c.span,
                content: c.content,
                header: c.header,
                children: parse_range(src, c.content),
            })
            .collect();
        rows.push(TableRow { span, cells });
    }
}

/// Splits the table body lines into rows of cells.
fn parse_rows(src: &str, body: &[Span]) -> Vec<TableRow> {
    let mut rows = vec![];
    let mut row = RowDraft::default();
    let mut nested = 0usize;
    let mut in_caption = false;

    for &line in body {
        let text = line.slice(src);
        let trimmed = text.trim_start();
        let marker_at = line.start + (text.len() - trimmed.len());

        if nested > 0 {
            if trimmed.starts_with(Table::OPEN) {
                nested += 1;
            } else if trimmed.starts_with(Table::CLOSE) {
                nested -= 1;
            }
            row.extend_last_cell(line);
            continue;
        }

        if trimmed.starts_with(Table::OPEN) {
            nested = 1;
            row.extend_last_cell(line);
            continue;
        }

        if trimmed.starts_with(Table::ROW) {
            in_caption = false;
            std::mem::take(&mut row).finish(src, &mut rows);
            row.extend_to(line);
            continue;
        }

        if trimmed.starts_with(Table::CAPTION) {
            in_caption = true;
            continue;
        }

        let first = trimmed.as_bytes().first().copied();
        if first == Some(Table::CELL) || first == Some(Table::HEADER_CELL) {
            in_caption = false;
            let header = first == Some(Table::HEADER_CELL);
            let cells_at = marker_at + 1;
            let cells_text = &trimmed[1..];
            for part in split_cells(cells_text, header) {
                let part = Span::new(cells_at + part.start, cells_at + part.end);
                row.cells.push(CellDraft {
                    span: part,
                    content: cell_content(src, part),
                    header,
                });
            }
            row.extend_to(line);
            continue;
        }

        if !in_caption {
            row.extend_last_cell(line);
        }
    }

    row.finish(src, &mut rows);
    rows
}

/// Splits a cell line (marker already stripped) on `||`, plus `!!` for header
/// lines. Separators inside links and templates are ignored. Returned spans
/// are relative to `s`.
fn split_cells(s: &str, header: bool) -> Vec<Span> {
    let mut out = vec![];
    let mut link_depth = 0usize;
    let mut template_depth = 0usize;
    let mut part_start = 0usize;
    let bytes = s.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let rest = &bytes[i..];
        if rest.starts_with(WikiLink::OPEN) {
            link_depth += 1;
            i += 2;
        } else if rest.starts_with(WikiLink::CLOSE) {
            link_depth = link_depth.saturating_sub(1);
            i += 2;
        } else if rest.starts_with(Template::OPEN) {
            template_depth += 1;
            i += 2;
        } else if rest.starts_with(Template::CLOSE) {
            template_depth = template_depth.saturating_sub(1);
            i += 2;
        } else if link_depth == 0
            && template_depth == 0
            && (rest.starts_with(Table::CELL_SEP.as_bytes())
                || (header && rest.starts_with(Table::HEADER_CELL_SEP.as_bytes())))
        {
            out.push(Span::new(part_start, i));
            i += 2;
            part_start = i;
        } else {
            i += 1;
        }
    }
    out.push(Span::new(part_start, s.len()));
    out
}

/// Returns the content part of a cell, skipping a leading `attrs |` section.
fn cell_content(src: &str, cell: Span) -> Span {
    let text = cell.slice(src);
    let bytes = text.as_bytes();
    let mut link_depth = 0usize;
    let mut template_depth = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let rest = &bytes[i..];
        if rest.starts_with(WikiLink::OPEN) {
            link_depth += 1;
            i += 2;
        } else if rest.starts_with(WikiLink::CLOSE) {
            link_depth = link_depth.saturating_sub(1);
            i += 2;
        } else if rest.starts_with(Template::OPEN) {
            template_depth += 1;
            i += 2;
        } else if rest.starts_with(Template::CLOSE) {
            template_depth = template_depth.saturating_sub(1);
            i += 2;
        } else if link_depth == 0 && template_depth == 0 && bytes[i] == Table::CELL {
            return Span::new(cell.start + i + 1, cell.end);
        } else {
            i += 1;
        }
    }
    cell
}
