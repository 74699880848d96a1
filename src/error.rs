use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("No pricing entry for model {model} (--strict)")]
    UnresolvedModel { model: String },

    #[error("{count} pricing entries break the cache rate convention")]
    ConventionViolations { count: usize },
}

#[derive(Debug, Error)]
pub(crate) enum UsageError {
    #[error("Failed to read usage from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid usage JSON in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("No usage records found in {path}")]
    Empty { path: String },
}
