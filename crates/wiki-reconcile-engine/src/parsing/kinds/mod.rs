//! # Markup Kinds
//!
//! Construct-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`Comment`**: `<!--` / `-->`
//! - **`Template`**: `{{`, `}}`, `|`
//! - **`WikiLink`**: `[[`, `]]`, `|`, namespace prefixes that render empty
//! - **`ExternalLink`**: `[`, `]`, recognised URL schemes
//! - **`HtmlTag`**: void, raw and citation tag names
//! - **`Heading`**: `=`
//! - **`Table`**: `{|`, `|}`, `|-`, `|+`, cell separators
//! - **`QuoteRun`**: `''` bold/italic runs
//!
//! The parser calls these constants; it never hardcodes `[[` or `{{`.

pub mod comment;
pub mod external_link;
pub mod heading;
pub mod quote_run;
pub mod table;
pub mod tag;
pub mod template;
pub mod wikilink;

pub use comment::Comment;
pub use external_link::ExternalLink;
pub use heading::Heading;
pub use quote_run::QuoteRun;
pub use table::Table;
pub use tag::HtmlTag;
pub use template::Template;
pub use wikilink::WikiLink;
