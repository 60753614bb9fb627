pub mod diff;
pub mod locate;
pub mod parsing;
pub mod patch;
pub mod projection;
pub mod suggestion;

// Re-export key types for easier usage
pub use diff::{ChangeDescriptor, ChangeKind, EditAnchor, SegmentConfig, Segmenter, segment};
pub use locate::{ExcerptMatch, Locator, LocatorConfig, Strategy, locate};
pub use parsing::{MarkupNode, ParsedDoc, ProjectionMode, Span, parse_markup};
pub use patch::{Patch, make_citation_patch, make_replacement_patch, make_section_patch};
pub use projection::{Projection, ProjectionMap, project, project_text};
pub use suggestion::{LinkRejection, Status, Suggestion, SuggestionKind};
