//! Typed property values for extracted micro-items.
//!
//! A [`PropertyValue`] is a closed tagged union over the four content kinds,
//! so the kind tag and payload are consistent by construction: a `Nested`
//! value always holds an [`ItemScope`], and the string kinds always hold
//! non-blank text. Predicates are exhaustive matches, never parse-and-catch
//! probes; coercions parse lazily on each call and fail with a distinct
//! error kind.

use crate::error::ValueError;
use crate::scope::ItemScope;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The fixed calendar pattern used by [`PropertyValue::as_date`] (yyyy-MM-dd).
/// Locale-insensitive by design of the source format.
const DATE_PATTERN: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Content kind discriminant, used in the interchange form and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Plain,
    Link,
    Date,
    Nested,
}

impl Kind {
    /// Interchange name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Plain => "Plain",
            Kind::Link => "Link",
            Kind::Date => "Date",
            Kind::Nested => "Nested",
        }
    }

    /// Parse an interchange kind name.
    pub fn parse(name: &str) -> Option<Kind> {
        match name {
            "Plain" => Some(Kind::Plain),
            "Link" => Some(Kind::Link),
            "Date" => Some(Kind::Date),
            "Nested" => Some(Kind::Nested),
            _ => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed value held by a micro-item property.
///
/// Immutable after construction. Equality and hashing are structural over
/// `(content, kind)`, recursing into nested scopes, so two values with equal
/// text but different kinds are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// Plain text content.
    Plain(String),
    /// Content that names a link target (syntax validated lazily).
    Link(String),
    /// Content declared as a calendar date (parsed lazily).
    Date(String),
    /// A nested item scope, exclusively owned by this value.
    Nested(Box<ItemScope>),
}

impl PropertyValue {
    /// Plain-text value. Fails with `InvalidValue` on blank content.
    pub fn plain(content: impl Into<String>) -> Result<PropertyValue, ValueError> {
        Ok(PropertyValue::Plain(non_blank(content.into(), Kind::Plain)?))
    }

    /// Link value. Fails with `InvalidValue` on blank content; the URL
    /// syntax itself is only checked by [`PropertyValue::as_link`].
    pub fn link(content: impl Into<String>) -> Result<PropertyValue, ValueError> {
        Ok(PropertyValue::Link(non_blank(content.into(), Kind::Link)?))
    }

    /// Date value. Fails with `InvalidValue` on blank content; the calendar
    /// pattern is only checked by [`PropertyValue::as_date`].
    pub fn date(content: impl Into<String>) -> Result<PropertyValue, ValueError> {
        Ok(PropertyValue::Date(non_blank(content.into(), Kind::Date)?))
    }

    /// Nested-scope value, taking exclusive ownership of the scope.
    pub fn nested(scope: ItemScope) -> PropertyValue {
        PropertyValue::Nested(Box::new(scope))
    }

    /// Build a string-kinded value from interchange parts. `Kind::Nested`
    /// with text content is a kind/content mismatch and fails.
    pub fn from_text(kind: Kind, content: impl Into<String>) -> Result<PropertyValue, ValueError> {
        match kind {
            Kind::Plain => PropertyValue::plain(content),
            Kind::Link => PropertyValue::link(content),
            Kind::Date => PropertyValue::date(content),
            Kind::Nested => Err(ValueError::invalid(
                "kind Nested requires an item scope, not text content",
            )),
        }
    }

    /// The kind discriminant of this value.
    pub fn kind(&self) -> Kind {
        match self {
            PropertyValue::Plain(_) => Kind::Plain,
            PropertyValue::Link(_) => Kind::Link,
            PropertyValue::Date(_) => Kind::Date,
            PropertyValue::Nested(_) => Kind::Nested,
        }
    }

    /// Raw text content for the string kinds; `None` for nested values.
    /// Never fails.
    pub fn text(&self) -> Option<&str> {
        match self {
            PropertyValue::Plain(s) | PropertyValue::Link(s) | PropertyValue::Date(s) => Some(s),
            PropertyValue::Nested(_) => None,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, PropertyValue::Plain(_))
    }

    pub fn is_link(&self) -> bool {
        matches!(self, PropertyValue::Link(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, PropertyValue::Date(_))
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, PropertyValue::Nested(_))
    }

    /// True for Plain content matching the integer grammar.
    pub fn is_integer(&self) -> bool {
        matches!(self, PropertyValue::Plain(s) if s.parse::<i64>().is_ok())
    }

    /// True for Plain content matching the float grammar.
    pub fn is_float(&self) -> bool {
        matches!(self, PropertyValue::Plain(s) if s.parse::<f64>().is_ok())
    }

    /// True for Plain content that is an integer or a float.
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Parse Plain content as an integer.
    pub fn as_integer(&self) -> Result<i64, ValueError> {
        match self {
            PropertyValue::Plain(s) => s.parse::<i64>().map_err(|_| ValueError::NotANumber {
                content: s.clone(),
            }),
            other => Err(ValueError::NotANumber {
                content: other.text().unwrap_or("<nested>").to_string(),
            }),
        }
    }

    /// Parse Plain content as a float.
    pub fn as_float(&self) -> Result<f64, ValueError> {
        match self {
            PropertyValue::Plain(s) => s.parse::<f64>().map_err(|_| ValueError::NotANumber {
                content: s.clone(),
            }),
            other => Err(ValueError::NotANumber {
                content: other.text().unwrap_or("<nested>").to_string(),
            }),
        }
    }

    /// Parse Plain or Date content against the fixed `yyyy-MM-dd` pattern.
    pub fn as_date(&self) -> Result<time::Date, ValueError> {
        match self {
            PropertyValue::Plain(s) | PropertyValue::Date(s) => {
                time::Date::parse(s, DATE_PATTERN).map_err(|_| ValueError::NotADate {
                    content: s.clone(),
                })
            }
            other => Err(ValueError::NotADate {
                content: other.text().unwrap_or("<nested>").to_string(),
            }),
        }
    }

    /// Parse Plain or Link content as a URL.
    pub fn as_link(&self) -> Result<url::Url, ValueError> {
        match self {
            PropertyValue::Plain(s) | PropertyValue::Link(s) => {
                url::Url::parse(s).map_err(|_| ValueError::NotALink {
                    content: s.clone(),
                })
            }
            other => Err(ValueError::NotALink {
                content: other.text().unwrap_or("<nested>").to_string(),
            }),
        }
    }

    /// Borrow the nested scope, or fail with `NotNested`.
    pub fn as_nested(&self) -> Result<&ItemScope, ValueError> {
        match self {
            PropertyValue::Nested(scope) => Ok(scope),
            other => Err(ValueError::NotNested {
                kind: other.kind().as_str(),
            }),
        }
    }
}

fn non_blank(content: String, kind: Kind) -> Result<String, ValueError> {
    if content.trim().is_empty() {
        return Err(ValueError::invalid(format!(
            "blank content for kind {}",
            kind
        )));
    }
    Ok(content)
}
