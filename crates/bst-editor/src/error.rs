//! Validation errors surfaced to the user before any mutation is attempted.

use bst_core::Key;

/// Why a command was refused. The tree is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Please enter at least one number")]
    EmptyInput,

    #[error("Not a valid number: {0:?}")]
    InvalidNumber(String),

    #[error("Reached max number of nodes: {max}")]
    CapacityExceeded { max: usize },

    #[error("That number does not exist in the tree: {0}")]
    NotFound(Key),

    #[error("Cannot pick {requested} unique values from 1..={available}")]
    TooManyRandomValues { requested: usize, available: i64 },

    #[error("Wait for the current animation to finish (or skip it)")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            CommandError::CapacityExceeded { max: 100 }.to_string(),
            "Reached max number of nodes: 100"
        );
        assert_eq!(
            CommandError::InvalidNumber("abc".into()).to_string(),
            "Not a valid number: \"abc\""
        );
        assert_eq!(
            CommandError::NotFound(7).to_string(),
            "That number does not exist in the tree: 7"
        );
    }
}
