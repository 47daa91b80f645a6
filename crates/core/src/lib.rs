//! itemize-core: typed micro-item value model and extraction accumulator.
//!
//! Host parsers feed already-tokenized item events; this crate materializes
//! them into trees of [`ItemScope`]s holding typed [`PropertyValue`]s, with
//! lazy coercions to integers, floats, calendar dates, and URLs.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`PropertyValue`] / [`Kind`] -- the closed tagged value union
//! - [`ItemScope`] -- ordered, nestable property container
//! - [`extract()`] / [`ItemAccumulator`] -- event-stream materialization
//! - [`ValueError`] / [`ExtractError`] -- error taxonomy
//! - [`json`] -- the `{content, type}` interchange form

pub mod error;
pub mod extract;
pub mod json;
pub mod scope;
pub mod value;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{ExtractError, ValueError};
pub use extract::{DroppedProperty, ExtractedItem, ExtractionResult, ItemAccumulator, ItemEvent};
pub use scope::{ItemScope, Property};
pub use value::{Kind, PropertyValue};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use extract::extract;
pub use json::{scope_from_json, scope_to_json, value_from_json, value_to_json};
