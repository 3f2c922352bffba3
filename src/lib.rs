//! symdoc: render structured doc comments into cross-linked HTML.
//!
//! The pipeline for one declaration:
//!
//! - [`parser::parse`] strips the comment decoration and splits the body into
//!   named sections
//! - [`markup::filter_comment`] runs the inline markup engine over the
//!   sections, leaving pre-formatted code alone
//! - [`render::CommentRenderer`] resolves ditto comments and writes the
//!   HTML, returning the summary used by listings
//!
//! The page driver wraps that output with [`render::nav`] and records each
//! symbol with [`search::write_search_entry`].

pub mod markup;
pub mod model;
pub mod parser;
pub mod render;
pub mod search;
pub mod text;

pub use markup::{MacroMarkup, Markup};
pub use model::{Comment, Example, Section, SectionKind};
pub use render::{CommentRenderer, Contract, Statement};
