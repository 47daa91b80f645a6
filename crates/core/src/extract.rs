//! Extraction accumulator: materializes item scopes from a host-parser
//! event stream.
//!
//! The core never parses raw markup. A host parser walks its document and
//! feeds [`ItemEvent`]s in document order; the accumulator maintains a scope
//! stack and produces `(subject, ItemScope)` pairs for the top-level items.
//!
//! Error policy: a property whose value fails construction is dropped and
//! recorded, and extraction of the surrounding item continues. Structural
//! faults in the event stream itself abort the run with [`ExtractError`].

use crate::error::{ExtractError, ValueError};
use crate::scope::ItemScope;
use crate::value::{Kind, PropertyValue};

/// One event in the host parser's pull feed, in document order.
#[derive(Debug, Clone)]
pub enum ItemEvent {
    /// An item boundary opened. Top-level items carry `subject`; nested
    /// items instead carry `property`, the parent property they attach to.
    BeginItem {
        subject: Option<String>,
        item_types: Vec<String>,
        item_id: Option<String>,
        property: Option<String>,
    },
    /// A non-nested property occurrence inside the current item.
    Property {
        name: String,
        kind: Kind,
        content: String,
    },
    /// The current item boundary closed.
    EndItem,
}

/// One extracted top-level item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    pub subject: String,
    pub scope: ItemScope,
}

/// A property occurrence that failed value construction and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedProperty {
    /// Identifier of the item the property belonged to (item id, first
    /// item type, or subject).
    pub item: String,
    pub name: String,
    pub error: ValueError,
}

/// Everything one extraction run produced, in document order.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub items: Vec<ExtractedItem>,
    pub dropped: Vec<DroppedProperty>,
}

struct OpenItem {
    subject: Option<String>,
    property: Option<String>,
    scope: ItemScope,
}

impl OpenItem {
    fn label(&self) -> String {
        self.scope
            .item_id()
            .map(str::to_owned)
            .or_else(|| self.scope.item_types().first().cloned())
            .or_else(|| self.subject.clone())
            .unwrap_or_else(|| "<untyped>".to_string())
    }
}

/// Accumulates `(subject, ItemScope)` pairs from an [`ItemEvent`] stream.
pub struct ItemAccumulator {
    stack: Vec<OpenItem>,
    result: ExtractionResult,
    anon_counter: usize,
}

impl Default for ItemAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemAccumulator {
    pub fn new() -> ItemAccumulator {
        ItemAccumulator {
            stack: Vec::new(),
            result: ExtractionResult::default(),
            anon_counter: 0,
        }
    }

    /// Consume one event. Structural faults abort with `ExtractError`;
    /// per-property value errors are recorded and skipped.
    pub fn push_event(&mut self, event: ItemEvent) -> Result<(), ExtractError> {
        match event {
            ItemEvent::BeginItem {
                subject,
                item_types,
                item_id,
                property,
            } => {
                if !self.stack.is_empty() && property.is_none() {
                    return Err(ExtractError::MissingPropertyName {
                        item_types: item_types.join(", "),
                    });
                }
                self.stack.push(OpenItem {
                    subject,
                    property,
                    scope: ItemScope::new(item_types, item_id),
                });
                Ok(())
            }
            ItemEvent::Property {
                name,
                kind,
                content,
            } => {
                let open = self
                    .stack
                    .last_mut()
                    .ok_or(ExtractError::PropertyOutsideItem)?;
                match PropertyValue::from_text(kind, content) {
                    Ok(value) => {
                        // The scope is open until its EndItem, so this
                        // cannot fail with ScopeClosed.
                        if let Err(error) = open.scope.add_property(&name, value) {
                            let item = open.label();
                            self.result
                                .dropped
                                .push(DroppedProperty { item, name, error });
                        }
                    }
                    Err(error) => {
                        let item = open.label();
                        self.result
                            .dropped
                            .push(DroppedProperty { item, name, error });
                    }
                }
                Ok(())
            }
            ItemEvent::EndItem => {
                let mut closing = self.stack.pop().ok_or(ExtractError::UnbalancedEnd)?;
                closing.scope.finalize();
                match self.stack.last_mut() {
                    Some(parent) => {
                        // Checked at BeginItem: nested items carry a property name.
                        let name = closing.property.ok_or_else(|| {
                            ExtractError::MissingPropertyName {
                                item_types: closing.scope.item_types().join(", "),
                            }
                        })?;
                        if let Err(error) = parent
                            .scope
                            .add_property(&name, PropertyValue::nested(closing.scope))
                        {
                            let item = parent.label();
                            self.result
                                .dropped
                                .push(DroppedProperty { item, name, error });
                        }
                    }
                    None => {
                        let subject = match closing.subject.take() {
                            Some(subject) => subject,
                            None => self.anonymous_subject(&closing.scope),
                        };
                        self.result.items.push(ExtractedItem {
                            subject,
                            scope: closing.scope,
                        });
                    }
                }
                Ok(())
            }
        }
    }

    /// Finish the run. Fails if items are still open.
    pub fn finish(self) -> Result<ExtractionResult, ExtractError> {
        if !self.stack.is_empty() {
            return Err(ExtractError::UnclosedItems {
                open: self.stack.len(),
            });
        }
        Ok(self.result)
    }

    fn anonymous_subject(&mut self, scope: &ItemScope) -> String {
        match scope.item_id() {
            Some(id) => id.to_string(),
            None => {
                let subject = format!("_:item{}", self.anon_counter);
                self.anon_counter += 1;
                subject
            }
        }
    }
}

/// Run a whole event stream through a fresh accumulator.
pub fn extract(
    events: impl IntoIterator<Item = ItemEvent>,
) -> Result<ExtractionResult, ExtractError> {
    let mut accumulator = ItemAccumulator::new();
    for event in events {
        accumulator.push_event(event)?;
    }
    accumulator.finish()
}
