//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! - **`normalize`**: converts parsed nodes to a stable `Snap` outline for
//!   `insta` snapshot testing
//! - **`invariants`**: runtime checks for parser correctness (top-level spans
//!   tile the document, spans in bounds on char boundaries, children
//!   contained in parents)
//!
//! Parsing behaviour is pinned by snapshot tests rather than a formal
//! grammar: snapshots assert node kinds, spans and key sub-spans (link
//! target/display, template name/args, table cell content).

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
