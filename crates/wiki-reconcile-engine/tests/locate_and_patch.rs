use pretty_assertions::assert_eq;
use rstest::rstest;
use wiki_reconcile_engine::{
    ChangeKind, MarkupNode, Patch, ProjectionMode, Strategy, Suggestion, locate,
    locate::renders_excerpt,
    make_citation_patch, make_replacement_patch, make_section_patch, parse_markup,
    projection::{normalize_whitespace, project_text},
    segment,
};

const ARTICLE: &str = "The [[Sun]] is a star. {{cite|x}}";

#[test]
fn link_in_excerpt_is_swallowed_whole() {
    let m = locate("Sun is a star", ARTICLE).expect("excerpt should be found");

    assert_eq!((m.markup_start, m.markup_end), (4, 21));
    assert_eq!(m.slice(ARTICLE), "[[Sun]] is a star");
    assert_eq!(m.strategy, Strategy::ExactProjection);
}

#[rstest]
#[case::link("Sun is a star", ARTICLE)]
#[case::piped_link_in_bold("the star is hot", "Today '''the [[Star|star]]''' is hot.")]
#[case::entity("chips and fish", "Fish &amp; chips and fish.")]
#[case::scattered_whitespace("Sun is a star", "The [[Sun]]\n  is a   star.")]
#[case::table_cell("Stars shine", "Intro.\n{|\n| Stars shine || bright\n|}\n")]
fn located_span_renders_excerpt(#[case] excerpt: &str, #[case] markup: &str) {
    let m = locate(excerpt, markup).expect("excerpt should be found");

    assert!(markup.is_char_boundary(m.markup_start));
    assert!(markup.is_char_boundary(m.markup_end));
    assert!(
        renders_excerpt(
            markup,
            m.markup_start,
            m.markup_end,
            &normalize_whitespace(excerpt),
            ProjectionMode::Full
        ),
        "{:?} does not render {excerpt:?}",
        m.slice(markup)
    );
}

#[rstest]
#[case::absent("Moon", ARTICLE)]
#[case::empty_excerpt("", ARTICLE)]
#[case::whitespace_excerpt(" \n\t", ARTICLE)]
#[case::empty_document("Sun", "")]
#[case::template_content_is_not_rendered("cite", "{{cite|x}}")]
fn unlocatable_excerpts(#[case] excerpt: &str, #[case] markup: &str) {
    assert_eq!(locate(excerpt, markup), None);
}

#[test]
fn replacement_patch_leaves_template_untouched() {
    let patch = make_replacement_patch("Sun is a star", "Sun is the nearest star");
    assert_eq!(patch(ARTICLE), "The Sun is the nearest star. {{cite|x}}");
}

#[test]
fn replacement_patch_keeps_surrounding_markup() {
    let patch = make_replacement_patch("Sun is a star", "[[Sun]] is a yellow dwarf");
    assert_eq!(patch(ARTICLE), "The [[Sun]] is a yellow dwarf. {{cite|x}}");
}

#[test]
fn patch_is_a_no_op_when_excerpt_is_gone() {
    let patch = make_replacement_patch("Moon is a satellite", "x");
    assert_eq!(patch(ARTICLE), ARTICLE);

    let cite = make_citation_patch("Moon", "NASA");
    assert_eq!(cite(ARTICLE), ARTICLE);

    let section = make_section_patch("Orbit", "Elliptical.");
    assert_eq!(section(ARTICLE), ARTICLE);
}

#[test]
fn patch_reapplies_against_new_snapshot() {
    let patch = make_replacement_patch("is a star", "is a G-type star");
    let once = patch(ARTICLE);
    assert_eq!(once, "The [[Sun]] is a G-type star. {{cite|x}}");

    // The anchor text is gone after the first application.
    assert_eq!(patch(&once), once);
}

#[test]
fn citation_goes_after_context() {
    let cite = make_citation_patch("Sun is a star", "NASA 2020");
    assert_eq!(
        cite("The [[Sun]] is a star. More."),
        "The [[Sun]] is a star<ref>NASA 2020</ref>. More."
    );
}

#[test]
fn section_patch_replaces_body_only() {
    let doc = "Lead.\n== Orbit ==\nCircular.\n== Size ==\nLarge.\n";
    let section = make_section_patch("Orbit", "Elliptical.");
    assert_eq!(
        section(doc),
        "Lead.\n== Orbit ==\nElliptical.\n\n== Size ==\nLarge.\n"
    );
}

#[test]
fn patches_are_shareable_across_threads() {
    let patch = make_replacement_patch("a star", "a G-type star");
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let patch = patch.clone();
            std::thread::spawn(move || patch(ARTICLE))
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().expect("thread"),
            "The [[Sun]] is a G-type star. {{cite|x}}"
        );
    }
}

/// Diff the rendered article against a revision, then patch the markup
#[rstest]
#[case::delete("The Sun is a hot star.", ChangeKind::Delete, "The [[Sun]] is a  hot star.")]
#[case::replace(
    "The Sun is a very warm star.",
    ChangeKind::Replace,
    "The [[Sun]] is a very warm star."
)]
fn segment_then_patch(#[case] revised: &str, #[case] kind: ChangeKind, #[case] expected: &str) {
    let markup = "The [[Sun]] is a very hot star.";
    let original = project_text(markup, ProjectionMode::Full);
    assert_eq!(original, "The Sun is a very hot star.");

    let changes = segment(&original, revised);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, kind);

    let suggestions = Suggestion::content_edits(0, &original, changes);
    let patch = suggestions[0].patch().expect("anchored change");
    assert_eq!(patch.apply(markup), expected);
}

#[test]
fn wrapped_citation_is_inserted_verbatim() {
    let patch = Patch::citation("Sun is a star", "<ref name=\"n\">NASA</ref>");
    assert_eq!(
        patch.apply("The [[Sun]] is a star."),
        "The [[Sun]] is a star<ref name=\"n\">NASA</ref>."
    );
}

/// Node kinds of a document in pre-order.
fn kinds(src: &str) -> Vec<&'static str> {
    fn walk(node: &MarkupNode, out: &mut Vec<&'static str>) {
        out.push(node.kind_name());
        for child in node.children() {
            walk(child, out);
        }
    }
    let mut out = vec![];
    for node in &parse_markup(src).nodes {
        walk(node, &mut out);
    }
    out
}

#[rstest]
#[case::link_display(
    "He was a [[Foo|terrorist]] leader.",
    "terrorist",
    "militant",
    "He was a [[Foo|militant]] leader."
)]
#[case::ref_content(
    "Paris is large.<ref>Smith said so</ref> More.",
    "Smith said so",
    "Jones said so",
    "Paris is large.<ref>Jones said so</ref> More."
)]
#[case::table_cell(
    "{|\n| Stars shine || bright\n|}\n",
    "Stars shine",
    "Stars glow",
    "{|\n| Stars glow || bright\n|}\n"
)]
#[case::heading_title(
    "== Solar history ==\nText.\n",
    "Solar history",
    "Stellar history",
    "== Stellar history ==\nText.\n"
)]
#[case::inside_bold(
    "Today '''the star''' is hot.",
    "the star",
    "a star",
    "Today '''a star''' is hot."
)]
fn patch_inside_construct_keeps_structure(
    #[case] markup: &str,
    #[case] excerpt: &str,
    #[case] replacement: &str,
    #[case] expected: &str,
) {
    let patched = make_replacement_patch(excerpt, replacement)(markup);

    assert_eq!(patched, expected);
    assert_eq!(kinds(&patched), kinds(markup));
}

#[test]
fn bare_link_is_replaced_whole() {
    let m = locate("Sun", "The [[Sun]] is hot.").expect("excerpt should be found");
    assert_eq!((m.markup_start, m.markup_end), (4, 11));

    let patch = make_replacement_patch("Sun", "Star");
    assert_eq!(patch("The [[Sun]] is hot."), "The Star is hot.");
}

#[test]
fn content_edit_lands_where_the_diff_found_it() {
    let markup = "Ann [[Sat|sat]]. Bob sat.";
    let original = project_text(markup, ProjectionMode::Full);
    let changes = segment(&original, "Ann sat. Bob stood.");

    let suggestions = Suggestion::content_edits(0, &original, changes);
    let patch = suggestions[0].patch().expect("anchored change");
    assert_eq!(patch.apply(markup), "Ann [[Sat|sat]]. Bob stood.");
}
