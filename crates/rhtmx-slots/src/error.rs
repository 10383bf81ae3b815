// File: src/error.rs
// Purpose: Error types for slot declaration, resolution and writes

use thiserror::Error;

/// Errors raised by the slot registry and the per-instance slot store.
///
/// Every variant names the component type and slot involved so failures can
/// be traced back to the declaration or call that caused them.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("slot `{slot}` is already defined on {component}")]
    DuplicateSlot { component: String, slot: String },

    #[error("`{slot}` is a reserved slot name on {component}")]
    ReservedName { component: String, slot: String },

    #[error("unknown slot `{slot}` on {component}; registered slots: [{}]", .available.join(", "))]
    UnknownSlot {
        component: String,
        slot: String,
        available: Vec<String>,
    },

    #[error("slot `{slot}` on {component} received both a `content` argument and a content block")]
    ConflictingContent { component: String, slot: String },

    #[error("{class} must implement SlotContent (slot `{slot}` on {component})")]
    InvalidContentClass {
        component: String,
        slot: String,
        class: String,
    },

    #[error("content class `{class}` for slot `{slot}` is not defined on {component}")]
    UndefinedContentClass {
        component: String,
        slot: String,
        class: String,
    },

    #[error("accessor `{accessor}` on {component} is already used by slot `{existing}`")]
    AccessorConflict {
        component: String,
        accessor: String,
        existing: String,
    },

    #[error("failed to build `{class}` for slot `{slot}`: {source}")]
    Construction {
        slot: String,
        class: String,
        #[source]
        source: ArgError,
    },

    #[error("failed to capture content for slot `{slot}`: {source}")]
    Capture {
        slot: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Errors produced while turning slot arguments into a content object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("missing argument `{0}`")]
    Missing(String),

    #[error("invalid argument `{name}`: {message}")]
    Invalid { name: String, message: String },

    #[error("unexpected positional arguments: {0}")]
    UnexpectedPositional(usize),

    #[error("unexpected arguments: {}", .0.join(", "))]
    UnexpectedNamed(Vec<String>),
}

impl ArgError {
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        ArgError::Invalid {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Convenience Result type for slot operations
pub type Result<T> = std::result::Result<T, SlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_slot_lists_registered_names() {
        let err = SlotError::UnknownSlot {
            component: "Card".to_string(),
            slot: "footer".to_string(),
            available: vec!["tab".to_string(), "title".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown slot `footer` on Card; registered slots: [tab, title]"
        );
    }

    #[test]
    fn test_invalid_class_names_the_class() {
        let err = SlotError::InvalidContentClass {
            component: "Card".to_string(),
            slot: "tab".to_string(),
            class: "Helper".to_string(),
        };
        assert!(err.to_string().starts_with("Helper must implement SlotContent"));
    }

    #[test]
    fn test_unexpected_named_args_message() {
        let err = ArgError::UnexpectedNamed(vec!["color".to_string(), "size".to_string()]);
        assert_eq!(err.to_string(), "unexpected arguments: color, size");
    }
}
