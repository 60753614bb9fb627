use super::{ExcerptMatch, Search, Strategy};

/// Pairs raw occurrences of the needle's first and last words.
///
/// Pairs are tried start-major, end ascending; the first pair whose span
/// renders the needle wins, even if a later pair would be shorter. An
/// occurrence inside a construct widens to the whole construct.
pub(crate) fn locate(search: &Search<'_>) -> Option<ExcerptMatch> {
    let markup = search.markup;
    let document = search.structure.document();
    let mut words = search.needle.split(' ');
    let first = words.next()?;
    let last = words.next_back().unwrap_or(first);

    let starts: Vec<usize> = markup.match_indices(first).map(|(i, _)| i).collect();
    let ends: Vec<usize> = markup
        .match_indices(last)
        .map(|(i, w)| i + w.len())
        .collect();
    let max_span = search.max_span();

    for &start in &starts {
        for &end in &ends {
            if end < start + last.len() || end - start < first.len() {
                continue;
            }
            if end - start > max_span {
                break;
            }
            let (start, end) = (document.floor_cut(start), document.ceil_cut(end));
            if search.renders(start, end) {
                return Some(search.matched(start, end, Strategy::BoundaryWords));
            }
        }
    }

    log::debug!(
        "boundary: {} start and {} end occurrences, no pair renders the excerpt",
        starts.len(),
        ends.len()
    );
    None
}
