use thiserror::Error;

/// Failure modes of the Filesystem Abstraction (§4.2).
#[derive(Debug, Error)]
pub enum FsError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no filesystem factory registered for scheme {0}")]
    UnknownScheme(String),

    #[error("path escapes its device root: {0}")]
    PathEscapesRoot(String),
}
