use thiserror::Error;

/// Failure modes of indexer-rule compilation/evaluation.
#[derive(Debug, Error)]
pub enum IndexerRuleError {
    #[error("invalid glob pattern {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("non utf-8 path encountered while evaluating rules")]
    NonUtf8Path,

    #[error("failed to (de)serialize rule parameters: {0}")]
    RuleParametersCodec(String),

    #[error("io error reading children of directory: {0}")]
    Io(#[from] std::io::Error),
}
