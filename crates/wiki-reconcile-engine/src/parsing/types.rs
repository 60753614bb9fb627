use super::span::Span;

/// A parsed markup node with byte spans into the document.
///
/// Every variant stores its full span, container variants also store the
/// spans of their parts and their parsed children. Text is never copied, so
/// slicing the document with any span reproduces the exact source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// Literal text that isn't part of any recognised construct.
    Text(Span),
    /// An internal `[[target|display]]` or bracketed external `[url label]` link.
    Link {
        /// Full span including brackets.
        full: Span,
        /// Span of the page name or URL.
        target: Span,
        /// Span of the display text, if any.
        display: Option<Span>,
        /// Whether this is a bracketed external link.
        external: bool,
        /// Parsed display text (empty when there is no display span).
        children: Vec<MarkupNode>,
    },
    /// A template transclusion `{{name|args}}`. Renders as nothing.
    Macro {
        /// Full span including braces.
        full: Span,
        /// Span of the template name (trimmed).
        name: Span,
        /// Spans of each `|`-separated argument.
        args: Vec<Span>,
    },
    /// An HTML-like tag, either paired, self-closing or void.
    Tag {
        /// Full span from `<` of the open tag to `>` of the close tag.
        full: Span,
        /// Lowercased tag name.
        name: String,
        /// Span between the open and close tags, `None` for self-closing tags.
        inner: Option<Span>,
        /// Parsed content (a single text node for raw tags).
        children: Vec<MarkupNode>,
    },
    /// A wikitable `{| ... |}`.
    Table {
        /// Full span from `{|` to `|}`.
        full: Span,
        /// Rows in document order, including rows without cells.
        rows: Vec<TableRow>,
    },
    /// A section heading `== Title ==` (line-start only).
    Heading {
        /// Span of the heading line without its newline.
        full: Span,
        /// Heading rank, 1 to 6.
        level: u8,
        /// Parsed title between the `=` runs.
        title: Vec<MarkupNode>,
    },
    /// An HTML comment `<!-- ... -->`. Renders as nothing.
    Comment(Span),
    /// A bold/italic apostrophe run. Renders as nothing.
    Format(Span),
}

/// A table row. Rows are delimited by `|-` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub span: Span,
    pub cells: Vec<TableCell>,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Span of the cell text after its `|`, `!` or separator.
    pub span: Span,
    /// Span of the cell content after any attributes.
    pub content: Span,
    /// Whether this is a `!` header cell.
    pub header: bool,
    /// Parsed cell content.
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    /// Extracts the full span from any node variant.
    pub fn span(&self) -> Span {
        match self {
            MarkupNode::Text(sp) | MarkupNode::Comment(sp) | MarkupNode::Format(sp) => *sp,
            MarkupNode::Link { full, .. }
            | MarkupNode::Macro { full, .. }
            | MarkupNode::Tag { full, .. }
            | MarkupNode::Table { full, .. }
            | MarkupNode::Heading { full, .. } => *full,
        }
    }

    /// Short kind label used in logs and snapshots.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MarkupNode::Text(_) => "Text",
            MarkupNode::Link {
                external: false, ..
            } => "Link",
            MarkupNode::Link { external: true, .. } => "ExternalLink",
            MarkupNode::Macro { .. } => "Macro",
            MarkupNode::Tag { .. } => "Tag",
            MarkupNode::Table { .. } => "Table",
            MarkupNode::Heading { .. } => "Heading",
            MarkupNode::Comment(_) => "Comment",
            MarkupNode::Format(_) => "Format",
        }
    }

    /// Nested nodes, in document order. Table cells are flattened row by row.
    pub fn children(&self) -> Vec<&MarkupNode> {
        match self {
            MarkupNode::Link { children, .. } | MarkupNode::Tag { children, .. } => {
                children.iter().collect()
            }
            MarkupNode::Heading { title, .. } => title.iter().collect(),
            MarkupNode::Table { rows, .. } => rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .flat_map(|c| c.children.iter())
                .collect(),
            MarkupNode::Text(_)
            | MarkupNode::Macro { .. }
            | MarkupNode::Comment(_)
            | MarkupNode::Format(_) => vec![],
        }
    }
}
