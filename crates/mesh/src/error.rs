use thiserror::Error;

/// Model loading failures.
///
/// A failed load installs nothing: callers keep whatever model and
/// collider they already had.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unrecognized model extension: {0:?}")]
    UnsupportedExtension(String),
    #[error("malformed {format} data: {detail}")]
    Malformed {
        format: &'static str,
        detail: String,
    },
}

impl LoadError {
    pub(crate) fn malformed(format: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            format,
            detail: detail.into(),
        }
    }
}
