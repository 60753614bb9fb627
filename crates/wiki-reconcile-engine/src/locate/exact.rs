use super::{ExcerptMatch, Search, Strategy, ceil_boundary, sweep_end};
use crate::projection::project_parsed;

/// Finds the needle in the normalized projection, maps its start to markup
/// and shrinks a generous end estimate down to the smallest end that still
/// renders the needle. The end only ever lands between top-level nodes or
/// inside plain text.
pub(crate) fn locate(search: &Search<'_>) -> Option<ExcerptMatch> {
    let markup = search.markup;
    let document = search.structure.document();
    let projection = project_parsed(markup, &search.doc, search.config.mode);
    let normalized = projection.normalized();
    let (raw_start, raw_end) = normalized.find_raw(search.needle)?;

    let start = document.floor_cut(projection.map.to_markup_start(raw_start));
    let mapped_end = projection.map.to_markup_end(raw_end);
    let estimate = start + search.config.exact_end_multiplier * search.needle.len();
    let upper = document.ceil_cut(ceil_boundary(markup, estimate.max(mapped_end)));

    if !search.renders(start, upper) {
        log::debug!("exact: estimate {start}..{upper} does not render the excerpt");
        return None;
    }

    let end = sweep_end(search, document, start, upper);
    Some(search.matched(start, end, Strategy::ExactProjection))
}
