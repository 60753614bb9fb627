use super::{
    blocks::{try_parse_heading, try_parse_table},
    cursor::Cursor,
    kinds::{Comment, ExternalLink, HtmlTag, QuoteRun, Template, WikiLink},
    span::Span,
    types::MarkupNode,
};

/// Parses `src[span]` into a sequence of [`MarkupNode`]s with absolute spans.
///
/// # Arguments
/// - `src`: The full document (spans index into it)
/// - `span`: The region to parse; line-start constructs are recognised at its
///   start only if `span.start` begins a line of `src`
///
/// # Returns
/// Nodes covering the entire region. Text between recognised constructs is
/// emitted as `MarkupNode::Text`; a construct that does not close degrades to
/// text, so parsing never fails.
pub fn parse_range(src: &str, span: Span) -> Vec<MarkupNode> {
    let bol = span.start == 0 || src.as_bytes().get(span.start - 1) == Some(&b'\n');
    let mut cur = Cursor::new(span.slice(src), span.start, bol);
    let mut out = vec![];
    let mut text_start = cur.pos();

    // Helper to flush accumulated text as a Text node
    fn flush_text(out: &mut Vec<MarkupNode>, start: usize, end: usize) {
        if end > start {
            out.push(MarkupNode::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        if let Some(node) = try_parse_construct(src, &mut cur) {
            let sp = node.span();
            flush_text(&mut out, text_start, sp.start);
            text_start = sp.end;
            out.push(node);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

/// Tries every construct in precedence order at the cursor position.
///
/// Comments come first (raw zone), then line-start blocks, then the inline
/// constructs. On failure the cursor is left where it was.
fn try_parse_construct(src: &str, cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if let Some(node) = try_parse_comment(cur) {
        return Some(node);
    }
    if cur.at_line_start() {
        if let Some(node) = try_parse_table(src, cur) {
            return Some(node);
        }
        if let Some(node) = try_parse_heading(src, cur) {
            return Some(node);
        }
    }
    try_parse_template(src, cur)
        .or_else(|| try_parse_wikilink(src, cur))
        .or_else(|| try_parse_external_link(src, cur))
        .or_else(|| try_parse_tag(src, cur))
        .or_else(|| try_parse_quote_run(cur))
}

/// Attempts to parse `<!-- ... -->`. Unclosed comments stay text.
fn try_parse_comment(cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if !cur.starts_with(Comment::OPEN) {
        return None;
    }
    let body = &cur.rest()[Comment::OPEN.len()..];
    let close = body.find(Comment::CLOSE)?;
    let start = cur.pos();
    cur.bump_n(Comment::OPEN.len() + close + Comment::CLOSE.len());
    Some(MarkupNode::Comment(Span {
        start,
        end: cur.pos(),
    }))
}

/// Attempts to parse a `{{template|args}}` with nested templates and links.
///
/// Arguments are split on `|` at the template's own nesting level only.
fn try_parse_template(src: &str, cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if !cur.starts_with(Template::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(Template::OPEN.len());

    let mut depth = 1usize;
    let mut link_depth = 0usize;
    let mut part_start = cur.pos();
    let mut parts = vec![];

    loop {
        if cur.eof() {
            *cur = saved;
            return None;
        }
        if cur.starts_with(Template::OPEN) {
            depth += 1;
            cur.bump_n(Template::OPEN.len());
        } else if cur.starts_with(Template::CLOSE) {
            depth -= 1;
            if depth == 0 {
                parts.push(Span::new(part_start, cur.pos()));
                cur.bump_n(Template::CLOSE.len());
                break;
            }
            cur.bump_n(Template::CLOSE.len());
        } else if cur.starts_with(WikiLink::OPEN) {
            link_depth += 1;
            cur.bump_n(WikiLink::OPEN.len());
        } else if cur.starts_with(WikiLink::CLOSE) {
            link_depth = link_depth.saturating_sub(1);
            cur.bump_n(WikiLink::CLOSE.len());
        } else if depth == 1 && link_depth == 0 && cur.peek() == Some(Template::ARG) {
            parts.push(Span::new(part_start, cur.pos()));
            cur.bump();
            part_start = cur.pos();
        } else {
            cur.bump();
        }
    }

    let name = trim_span(src, parts[0]);
    Some(MarkupNode::Macro {
        full: Span::new(start, cur.pos()),
        name,
        args: parts[1..].to_vec(),
    })
}

/// Attempts to parse an internal link starting at the current position.
///
/// Handles both `[[target]]` and `[[target|display]]` forms; the display text
/// may itself contain links and templates. A newline in the target, an empty
/// target, a blank line in the display or a missing `]]` restores the cursor.
fn try_parse_wikilink(src: &str, cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiLink::OPEN.len());
    let target_start = cur.pos();

    loop {
        if cur.eof() || cur.peek() == Some(b'\n') || cur.starts_with(WikiLink::OPEN) {
            *cur = saved;
            return None;
        }
        if cur.peek() == Some(WikiLink::ALIAS) || cur.starts_with(WikiLink::CLOSE) {
            break;
        }
        cur.bump();
    }
    let target = Span::new(target_start, cur.pos());
    if target.slice(src).trim().is_empty() {
        *cur = saved;
        return None;
    }

    let mut display = None;
    if cur.peek() == Some(WikiLink::ALIAS) {
        cur.bump(); // |
        let display_start = cur.pos();
        let mut link_depth = 0usize;
        let mut template_depth = 0usize;
        loop {
            if cur.eof() || cur.starts_with(b"\n\n") {
                *cur = saved;
                return None;
            }
            if cur.starts_with(WikiLink::OPEN) {
                link_depth += 1;
                cur.bump_n(WikiLink::OPEN.len());
            } else if cur.starts_with(Template::OPEN) {
                template_depth += 1;
                cur.bump_n(Template::OPEN.len());
            } else if template_depth > 0 && cur.starts_with(Template::CLOSE) {
                template_depth -= 1;
                cur.bump_n(Template::CLOSE.len());
            } else if cur.starts_with(WikiLink::CLOSE) {
                if link_depth == 0 {
                    break;
                }
                link_depth -= 1;
                cur.bump_n(WikiLink::CLOSE.len());
            } else {
                cur.bump();
            }
        }
        display = Some(Span::new(display_start, cur.pos()));
    }

    cur.bump_n(WikiLink::CLOSE.len());
    let end = cur.pos();

    Some(MarkupNode::Link {
        full: Span { start, end },
        target,
        display,
        external: false,
        children: display.map(|d| parse_range(src, d)).unwrap_or_default(),
    })
}

/// Attempts to parse a bracketed external link `[url label]`.
///
/// Only URLs with a recognised scheme qualify; a bare `[` is text.
fn try_parse_external_link(src: &str, cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if cur.peek() != Some(ExternalLink::OPEN) || cur.starts_with(WikiLink::OPEN) {
        return None;
    }
    if !ExternalLink::starts_with_scheme(&cur.rest()[1..]) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump(); // [
    let target_start = cur.pos();
    while let Some(b) = cur.peek() {
        if matches!(b, b' ' | b'\t' | b'\n' | ExternalLink::CLOSE) {
            break;
        }
        cur.bump();
    }
    let target = Span::new(target_start, cur.pos());

    let mut display = None;
    if matches!(cur.peek(), Some(b' ' | b'\t')) {
        while matches!(cur.peek(), Some(b' ' | b'\t')) {
            cur.bump();
        }
        let display_start = cur.pos();
        while let Some(b) = cur.peek() {
            if matches!(b, b'\n' | ExternalLink::CLOSE) {
                break;
            }
            cur.bump();
        }
        if cur.pos() > display_start {
            display = Some(Span::new(display_start, cur.pos()));
        }
    }

    if cur.peek() != Some(ExternalLink::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump(); // ]

    Some(MarkupNode::Link {
        full: Span::new(start, cur.pos()),
        target,
        display,
        external: true,
        children: display.map(|d| parse_range(src, d)).unwrap_or_default(),
    })
}

/// Attempts to parse an HTML-like tag with its matching close tag.
///
/// Self-closing and void tags carry no content. Raw tags keep their content
/// as a single text node. An open tag without a matching close tag restores
/// the cursor so the `<` becomes text.
fn try_parse_tag(src: &str, cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if cur.peek() != Some(HtmlTag::OPEN) || !cur.peek_at(1).is_some_and(|b| b.is_ascii_alphabetic())
    {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump(); // <
    let name_start = cur.i;
    while cur.peek().is_some_and(|b| b.is_ascii_alphanumeric()) {
        cur.bump();
    }
    let name = cur.s[name_start..cur.i].to_ascii_lowercase();
    if !matches!(cur.peek(), Some(b' ' | b'\t' | b'\n' | b'/' | HtmlTag::CLOSE)) {
        *cur = saved;
        return None;
    }

    loop {
        match cur.peek() {
            None | Some(HtmlTag::OPEN) => {
                *cur = saved;
                return None;
            }
            Some(HtmlTag::CLOSE) => {
                cur.bump();
                break;
            }
            Some(_) => {
                cur.bump();
            }
        }
    }
    let open_end = cur.pos();
    let self_closing = cur.s.as_bytes()[..cur.i].ends_with(HtmlTag::SELF_CLOSE);

    if self_closing || HtmlTag::is_void(&name) {
        return Some(MarkupNode::Tag {
            full: Span::new(start, open_end),
            name,
            inner: None,
            children: vec![],
        });
    }

    let Some((close_start, close_end)) = find_close_tag(cur.rest(), &name) else {
        *cur = saved;
        return None;
    };
    let inner = Span::new(open_end, open_end + close_start);
    cur.seek(open_end + close_end);

    let children = if HtmlTag::is_raw(&name) {
        if inner.is_empty() {
            vec![]
        } else {
            vec![MarkupNode::Text(inner)]
        }
    } else {
        parse_range(src, inner)
    };

    Some(MarkupNode::Tag {
        full: Span::new(start, cur.pos()),
        name,
        inner: Some(inner),
        children,
    })
}

/// Finds the close tag matching an already-consumed open tag `name`.
///
/// Returns `(close_start, close_end)` relative to `rest`. Nested open tags of
/// the same name are balanced, except inside raw tags.
fn find_close_tag(rest: &str, name: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut i = 0usize;

    while let Some(off) = rest[i..].find(HtmlTag::OPEN as char) {
        let at = i + off;
        let after = &rest[at + 1..];
        if let Some(after_slash) = after.strip_prefix('/') {
            if let Some(tail) = strip_tag_name(after_slash, name) {
                let trimmed = tail.trim_start();
                if trimmed.starts_with(HtmlTag::CLOSE as char) {
                    if depth == 0 {
                        return Some((at, rest.len() - trimmed.len() + 1));
                    }
                    depth -= 1;
                }
            }
        } else if !HtmlTag::is_raw(name)
            && let Some(tail) = strip_tag_name(after, name)
            && let Some(gt) = tail.find(HtmlTag::CLOSE as char)
            && !tail[..gt].ends_with('/')
        {
            depth += 1;
        }
        i = at + 1;
    }
    None
}

/// Strips a case-insensitive tag name from the front of `s`, requiring the
/// name to end there.
fn strip_tag_name<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let head = s.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    let tail = &s[name.len()..];
    if tail.bytes().next().is_some_and(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    Some(tail)
}

/// Attempts to parse a bold/italic apostrophe run.
///
/// Literal apostrophes in front of the markup part stay in the preceding text.
fn try_parse_quote_run(cur: &mut Cursor<'_>) -> Option<MarkupNode> {
    if cur.peek() != Some(QuoteRun::QUOTE) {
        return None;
    }
    let len = cur
        .rest()
        .bytes()
        .take_while(|&b| b == QuoteRun::QUOTE)
        .count();
    let (literal, markup) = QuoteRun::split(len);
    if markup == 0 {
        return None;
    }
    let start = cur.pos() + literal;
    cur.bump_n(len);
    Some(MarkupNode::Format(Span::new(start, cur.pos())))
}

/// Shrinks a span to exclude leading and trailing whitespace.
pub(super) fn trim_span(src: &str, sp: Span) -> Span {
    let text = sp.slice(src);
    let lead = text.len() - text.trim_start().len();
    let trail = text.len() - text.trim_end().len();
    if lead == text.len() {
        return Span::new(sp.start, sp.start);
    }
    Span::new(sp.start + lead, sp.end - trail)
}
