//! Domain-specific errors.

use thiserror::Error;

use crate::domain::signal::format_error;

/// Failures produced while parsing and resolving a line of menu input.
///
/// `InvalidQuery` and `NoMatch` are user-input errors: the caller shows the message once and
/// prompts again. `NotFound` and `InvalidOption` indicate a caller bug and should propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{}", format_error(.input))]
    InvalidQuery { input: String, reason: &'static str },
    #[error("{}", format_error(.input))]
    NoMatch { input: String },
    #[error("no menu option with id {id}")]
    NotFound { id: u32 },
    #[error("menu option id {id} is zero or duplicated")]
    InvalidOption { id: u32 },
}

impl QueryError {
    pub(crate) fn no_match(input: &str) -> Self {
        Self::NoMatch {
            input: input.to_owned(),
        }
    }

    pub(crate) fn invalid(input: &str, reason: &'static str) -> Self {
        Self::InvalidQuery {
            input: input.to_owned(),
            reason,
        }
    }

    /// Whether the error comes from user input rather than a programming mistake.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidQuery { .. } | Self::NoMatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_render_as_huh() {
        assert_eq!(QueryError::no_match("1-9").to_string(), "Huh (1-9)?");
        assert_eq!(QueryError::invalid("-", "bare sign").to_string(), "Huh (-)?");
        assert!(QueryError::no_match("x").is_user_error());
    }

    #[test]
    fn defects_are_not_user_errors() {
        let err = QueryError::NotFound { id: 4 };
        assert!(!err.is_user_error());
        assert_eq!(err.to_string(), "no menu option with id 4");
    }
}
