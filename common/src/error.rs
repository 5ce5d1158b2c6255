use thiserror::Error;

/// Failures while decoding a benchmark name into its fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("benchmark name '{name}' does not start with a function identifier")]
    MissingFunction { name: String },

    #[error("template argument in '{name}' has no closing '>'")]
    UnterminatedTemplate { name: String },

    #[error("expected '/' after the function in '{name}', found {found:?}")]
    MissingSeparator { name: String, found: Option<char> },

    #[error("benchmark name '{name}' has no '_mean' or '_stddev' suffix")]
    MissingSuffix { name: String },

    #[error("unknown aggregate '{suffix}' in '{name}', expected 'mean' or 'stddev'")]
    UnknownSuffix { name: String, suffix: String },

    #[error("input size '{size}' in '{name}' is out of range")]
    InvalidSize { name: String, size: String },

    #[error("benchmark name '{name}' has {segments} segments, expected 3")]
    SegmentCount { name: String, segments: usize },

    #[error("'{segment}' in '{name}' is not a 'threads:<N>' segment")]
    InvalidThreadCount { name: String, segment: String },
}

/// Failures while turning aggregated series into chart series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A stddev run has no mean run to be relative to.
    #[error("stddev at key {key} has no matching mean")]
    MissingMean { key: i64 },
}
