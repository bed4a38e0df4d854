//! Error types for the BQM crate.

use thiserror::Error;

/// Errors raised when model data crosses a trust boundary.
///
/// Precondition violations on the store itself (out-of-range indices,
/// self-loops, popping an empty model) are programming errors and are
/// caught by debug assertions instead; see the crate documentation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BqmError {
    /// A variable index lies outside `0..num_variables`.
    #[error("Variable {variable} out of range for a model with {num_variables} variables")]
    InvalidVariable {
        /// The offending variable index.
        variable: usize,
        /// Number of variables in the model.
        num_variables: usize,
    },

    /// An interaction connects a variable to itself.
    #[error("Self-loop on variable {variable} is not allowed")]
    SelfLoop {
        /// The variable that appears on both ends.
        variable: usize,
    },

    /// The two halves of an interaction disagree.
    #[error("Interaction ({u}, {v}) is not stored symmetrically")]
    AsymmetricInteraction {
        /// Variable owning the neighbor entry.
        u: usize,
        /// Neighbor whose mirror entry is missing or different.
        v: usize,
    },

    /// A sample does not assign exactly one value per variable.
    #[error("Sample has {got} values, model has {expected} variables")]
    SampleLength {
        /// Number of variables in the model.
        expected: usize,
        /// Number of values in the sample.
        got: usize,
    },
}

/// Result type for BQM operations.
pub type BqmResult<T> = Result<T, BqmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BqmError::InvalidVariable {
            variable: 7,
            num_variables: 3,
        };
        assert_eq!(
            err.to_string(),
            "Variable 7 out of range for a model with 3 variables"
        );

        let err = BqmError::SelfLoop { variable: 2 };
        assert_eq!(err.to_string(), "Self-loop on variable 2 is not allowed");
    }
}
