/// Startup loading errors
///
/// These are the only fatal errors in the service: once the catalog and the
/// model artifact are loaded, every per-request condition degrades to an
/// empty or partial result instead of propagating.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog dataset error: {0}")]
    Catalog(#[from] csv::Error),

    #[error("Model artifact decode error: {0}")]
    Artifact(#[from] bincode::Error),

    #[error("Malformed model artifact: {0}")]
    MalformedArtifact(String),
}
