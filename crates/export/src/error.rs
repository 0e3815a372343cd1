use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("composite buffer has invalid dimensions")]
    BadDimensions,
    #[error("capture session is already recording")]
    AlreadyRecording,
    #[error("capture session is not recording")]
    NotRecording,
}
