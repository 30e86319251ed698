use std::path::PathBuf;
use thiserror::Error;

/// A failure attributable to the detector or to the rows it produced.
///
/// Fatal to the current invocation: the pipeline returns no partial output.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Class index {index} is not in the class catalog ({catalog_len} classes)")]
    UnknownClassIndex { index: u64, catalog_len: usize },

    #[error("Malformed detection row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("Failed to decode input image: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("Detector failed: {0}")]
    Detector(String),
}

/// A failure while serializing the annotated image.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[source] image::ImageError),

    #[error("Invalid JPEG quality {0} (must be 1..=100)")]
    InvalidQuality(u8),

    #[error("Cannot encode an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },
}

/// The main error type for cropmark operations.
#[derive(Debug, Error)]
pub enum CropmarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("Failed to parse config YAML from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Invalid classes.txt at {path}: {message}")]
    ClassesTxtInvalid { path: PathBuf, message: String },

    #[error("Failed to parse detections JSON from {path}: {source}")]
    DetectionsJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse prediction row at {path}:{line}: {message}")]
    PredictionParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to load font from {path}")]
    FontLoad { path: PathBuf },

    #[error("Failed to write JSON output: {0}")]
    OutputJson(#[source] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
