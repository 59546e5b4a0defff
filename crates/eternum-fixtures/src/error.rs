//! Error types for the fixture replay binary.
//!
//! [`FixtureError`] is the top-level error type that wraps every failure
//! mode between loading configuration and reporting results.

/// Top-level error for the fixture replay binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: eternum_core::ConfigError,
    },

    /// Reading the fixture file failed.
    #[error("failed to read fixtures: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The fixture file is not valid JSON for the case schema.
    #[error("failed to parse fixtures: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The engine reported an overflow while evaluating a case.
    #[error("engine error in case {case}: {source}")]
    Engine {
        /// Name of the case being evaluated.
        case: String,
        /// The underlying engine error.
        source: eternum_engine::EngineError,
    },

    /// One or more cases disagreed with the recorded contract output.
    #[error("{failed} of {total} fixture cases diverged")]
    Diverged {
        /// Number of mismatching cases.
        failed: usize,
        /// Number of cases run.
        total: usize,
    },
}
