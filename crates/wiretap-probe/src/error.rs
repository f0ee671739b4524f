use thiserror::Error;

/// Result type local to wiretap-probe.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {path}: {detail}")]
    Parse { path: &'static str, detail: String },
}
