use std::sync::OnceLock;

use regex::Regex;

/// Matches one heading line; groups are the opening run, the title and the
/// closing run.
fn heading_regex() -> &'static Regex {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADING_REGEX.get_or_init(|| {
        Regex::new(r"(?m)^(=+)[ \t]*(.+?)[ \t]*(=+)[ \t]*$").expect("Invalid heading regex")
    })
}

/// A heading line found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeading {
    /// Byte offset of the first `=`.
    pub start: usize,
    /// Byte offset just past the heading line (excluding its newline).
    pub line_end: usize,
    pub level: usize,
}

/// Iterates every heading line in `doc` with its title.
pub fn headings(doc: &str) -> impl Iterator<Item = (SectionHeading, &str)> {
    heading_regex().captures_iter(doc).filter_map(|caps| {
        let line = caps.get(0)?;
        let open = caps.get(1)?.as_str().len();
        let close = caps.get(3)?.as_str().len();
        let heading = SectionHeading {
            start: line.start(),
            line_end: line.end(),
            level: open.min(close),
        };
        Some((heading, caps.get(2)?.as_str()))
    })
}

/// Replaces the body of the section titled `title`.
///
/// The body runs from after the heading line to the next heading of equal or
/// higher rank, or the end of the document. The heading line is kept. Returns
/// `None` when no heading has that title.
pub fn replace_section(doc: &str, title: &str, content: &str) -> Option<String> {
    let title = title.trim();
    let (heading, _) = headings(doc).find(|(_, t)| *t == title)?;

    let body_start = match doc[heading.line_end..].strip_prefix('\n') {
        Some(_) => heading.line_end + 1,
        None => heading.line_end,
    };
    let next = headings(&doc[body_start..])
        .find(|(h, _)| h.level <= heading.level)
        .map(|(h, _)| body_start + h.start);

    let mut out = String::with_capacity(doc.len() + content.len());
    out.push_str(&doc[..body_start]);
    if body_start == heading.line_end {
        out.push('\n');
    }
    out.push_str(content.trim());
    out.push('\n');
    if let Some(next) = next {
        out.push('\n');
        out.push_str(&doc[next..]);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "Lead.\n== History ==\nOld history.\n=== Early ===\nEarly days.\n== Legacy ==\nStill here.\n";

    #[test]
    fn finds_headings_with_levels() {
        let found: Vec<_> = headings(DOC).map(|(h, t)| (t, h.level)).collect();
        assert_eq!(found, vec![("History", 2), ("Early", 3), ("Legacy", 2)]);
    }

    #[test]
    fn replaces_up_to_next_equal_rank_heading() {
        let out = replace_section(DOC, "History", "  New history.  ").expect("section");
        assert_eq!(
            out,
            "Lead.\n== History ==\nNew history.\n\n== Legacy ==\nStill here.\n"
        );
    }

    #[test]
    fn subsection_stops_at_higher_rank() {
        let out = replace_section(DOC, "Early", "Later days.").expect("section");
        assert_eq!(
            out,
            "Lead.\n== History ==\nOld history.\n=== Early ===\nLater days.\n\n== Legacy ==\nStill here.\n"
        );
    }

    #[test]
    fn last_section_runs_to_end() {
        let out = replace_section(DOC, "Legacy", "Gone.").expect("section");
        assert!(out.ends_with("== Legacy ==\nGone.\n"));
    }

    #[test]
    fn heading_at_end_without_newline() {
        let out = replace_section("Intro\n== End ==", "End", "Body").expect("section");
        assert_eq!(out, "Intro\n== End ==\nBody\n");
    }

    #[test]
    fn unknown_title_is_none() {
        assert!(replace_section(DOC, "Missing", "x").is_none());
    }
}
