use super::{
    ExcerptMatch, Search, Strategy, ceil_boundary, floor_boundary, sweep_end, sweep_start,
};

/// Scans overlapping windows of the raw markup. Inside each window that
/// renders the needle, sweeps the start forward and the end backward to the
/// smallest span that still renders it. The shortest span over all windows
/// wins; ties go to the earliest window. Window edges that split a construct
/// widen to take it whole.
pub(crate) fn locate(search: &Search<'_>) -> Option<ExcerptMatch> {
    let markup = search.markup;
    let document = search.structure.document();
    let window = search.config.window_size.max(1);
    let step = window.saturating_sub(search.config.window_overlap).max(1);
    let mut best: Option<(usize, usize)> = None;
    let mut offset = 0usize;

    loop {
        let win_start = document.floor_cut(floor_boundary(markup, offset));
        let win_end = document.ceil_cut(ceil_boundary(markup, offset + window));

        if search.renders(win_start, win_end) {
            let (start, end) = shrink(search, win_start, win_end);
            log::trace!("chunked: window {win_start}..{win_end} shrinks to {start}..{end}");
            if best.is_none_or(|(bs, be)| end - start < be - bs) {
                best = Some((start, end));
            }
        }

        if offset + window >= markup.len() {
            break;
        }
        offset += step;
    }

    best.map(|(start, end)| search.matched(start, end, Strategy::ChunkedWindow))
}

/// Nested shrink inside a matching window: start sweep, length cap, then end
/// sweep.
fn shrink(search: &Search<'_>, win_start: usize, win_end: usize) -> (usize, usize) {
    let document = search.structure.document();
    let start = sweep_start(search, document, win_start, win_end);

    let capped = document
        .ceil_cut(ceil_boundary(search.markup, start + search.max_span()))
        .min(win_end);
    let upper = if search.renders(start, capped) {
        capped
    } else {
        win_end
    };

    (start, sweep_end(search, document, start, upper))
}
