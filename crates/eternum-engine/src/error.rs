//! Error types for the `eternum-engine` crate.
//!
//! The engine is total over its documented domain: zero denominators,
//! negative elapsed time, and unreachable hexes produce sentinel values,
//! not errors. The only failure it reports is arithmetic that would leave
//! the `u128` range, which the contract would reject as well.

/// Errors that can occur during engine computations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A checked arithmetic operation overflowed.
    #[error("arithmetic overflow while computing {context}")]
    ArithmeticOverflow {
        /// What was being computed.
        context: &'static str,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::ArithmeticOverflow`] in `context`.
    pub const fn overflow(context: &'static str) -> Self {
        Self::ArithmeticOverflow { context }
    }
}
