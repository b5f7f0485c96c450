//! Selectors for widget queries.
//!
//! Supports:
//! - `"FlickToggle"` - by brick name
//! - `"#wifi"` - by test ID
//! - `"[data-testid='wifi']"` - by test ID
//! - `"[aria-label='On']"` - by accessible name
//! - `"[role='switch']"` - by accessible role

use flick_core::{AccessibleRole, Widget};
use thiserror::Error;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by brick name
    Type(String),
    /// Match by test ID
    TestId(String),
    /// Match by accessible name
    Label(String),
    /// Match by accessible role
    Role(AccessibleRole),
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        let first = input.chars().next().ok_or(SelectorError::Empty)?;
        match first {
            '#' => identifier(&input[1..]).map(|id| Self::TestId(id.to_string())),
            '[' => parse_attribute(input),
            _ if first.is_alphabetic() => identifier(input).map(|name| Self::Type(name.to_string())),
            _ => Err(SelectorError::UnexpectedChar(first)),
        }
    }

    /// Check if this selector matches a widget.
    #[must_use]
    pub fn matches(&self, widget: &dyn Widget) -> bool {
        match self {
            Self::Type(name) => widget.brick_name() == name,
            Self::TestId(id) => widget.test_id() == Some(id.as_str()),
            Self::Label(label) => widget.accessible_name() == Some(label.as_str()),
            Self::Role(role) => widget.accessible_role() == *role,
        }
    }
}

fn identifier(input: &str) -> Result<&str, SelectorError> {
    let valid = !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(input)
    } else {
        Err(SelectorError::ExpectedIdentifier)
    }
}

fn parse_attribute(input: &str) -> Result<Selector, SelectorError> {
    let body = input
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(SelectorError::UnclosedAttribute)?;
    let (name, value) = body.split_once('=').ok_or(SelectorError::InvalidAttribute)?;
    let value = value
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string();

    match name.trim() {
        "data-testid" => Ok(Selector::TestId(value)),
        "aria-label" => Ok(Selector::Label(value)),
        "role" => parse_role(&value).map(Selector::Role),
        other => Err(SelectorError::UnknownAttribute(other.to_string())),
    }
}

fn parse_role(value: &str) -> Result<AccessibleRole, SelectorError> {
    match value.to_ascii_lowercase().as_str() {
        "generic" => Ok(AccessibleRole::Generic),
        "text" => Ok(AccessibleRole::Text),
        "group" => Ok(AccessibleRole::Group),
        "scrollarea" => Ok(AccessibleRole::ScrollArea),
        "switch" => Ok(AccessibleRole::Switch),
        _ => Err(SelectorError::UnknownRole(value.to_string())),
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
    /// Attribute other than data-testid, aria-label or role
    #[error("unknown attribute: '{0}'")]
    UnknownAttribute(String),
    /// Role name not recognized
    #[error("unknown role: '{0}'")]
    UnknownRole(String),
}
