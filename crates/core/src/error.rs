//! Error types for value construction, typed coercion, and extraction.
//!
//! Construction errors (`InvalidValue`, `ScopeClosed`) are local precondition
//! violations surfaced to the immediate caller. Coercion errors (`NotANumber`,
//! `NotADate`, `NotALink`, `NotNested`) are raised only when a typed accessor
//! is invoked on content that does not match; the untyped accessors never
//! fail. Absence of a property is a normal state, not an error.

/// Errors raised by the value model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Content rejected at construction: blank text, or a kind/content
    /// mismatch in the interchange form.
    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    /// `add_property` called on a finalized scope.
    #[error("scope '{scope}' is closed to further properties")]
    ScopeClosed { scope: String },

    /// Integer/float coercion requested on non-numeric content.
    #[error("content '{content}' is not a number")]
    NotANumber { content: String },

    /// Date coercion failed against the yyyy-MM-dd pattern.
    #[error("content '{content}' is not a yyyy-MM-dd date")]
    NotADate { content: String },

    /// Link coercion failed URL syntax validation.
    #[error("content '{content}' is not a valid URL")]
    NotALink { content: String },

    /// Nested-scope coercion requested on a non-nested value.
    #[error("value of kind {kind} holds no nested scope")]
    NotNested { kind: &'static str },
}

impl ValueError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ValueError::InvalidValue {
            message: message.into(),
        }
    }
}

/// Structural faults in the extraction event stream.
///
/// These abort the extraction run, unlike per-property [`ValueError`]s which
/// drop only the offending property.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// `EndItem` arrived with no open item.
    #[error("unbalanced EndItem: no item is open")]
    UnbalancedEnd,

    /// A property occurrence arrived outside any item boundary.
    #[error("property occurrence outside any item boundary")]
    PropertyOutsideItem,

    /// A nested `BeginItem` did not name the parent property to attach to.
    #[error("nested item (types: [{item_types}]) missing its parent property name")]
    MissingPropertyName { item_types: String },

    /// The event stream ended while items were still open.
    #[error("{open} item(s) still open at end of stream")]
    UnclosedItems { open: usize },
}
