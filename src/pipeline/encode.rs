//! Serializing the annotated image: JPEG, then standard base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use serde::Serialize;

use crate::error::EncodingError;

/// Quality used when the configuration does not name one.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// An annotated image ready to embed in a response body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EncodedImage {
    /// Always `"jpeg"`.
    pub format: &'static str,
    pub width: u32,
    pub height: u32,

    /// Size of the JPEG before base64.
    pub byte_len: usize,

    /// Standard base64 (with padding) of the JPEG bytes.
    pub base64: String,

    #[serde(skip)]
    jpeg: Vec<u8>,
}

impl EncodedImage {
    /// The raw JPEG bytes.
    pub fn jpeg_bytes(&self) -> &[u8] {
        &self.jpeg
    }
}

/// Checks that `quality` is a valid JPEG quality.
pub fn check_quality(quality: u8) -> Result<u8, EncodingError> {
    if (1..=100).contains(&quality) {
        Ok(quality)
    } else {
        Err(EncodingError::InvalidQuality(quality))
    }
}

/// Compresses `image` to JPEG at the given quality.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodingError> {
    let quality = check_quality(quality)?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodingError::EmptyImage { width, height });
    }

    let mut jpeg = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
        encoder.encode_image(image).map_err(EncodingError::Jpeg)?;
    }
    Ok(jpeg)
}

/// Compresses `image` to JPEG and wraps it in base64.
pub fn encode_image(image: &RgbImage, quality: u8) -> Result<EncodedImage, EncodingError> {
    let jpeg = encode_jpeg(image, quality)?;
    let (width, height) = image.dimensions();

    Ok(EncodedImage {
        format: "jpeg",
        width,
        height,
        byte_len: jpeg.len(),
        base64: STANDARD.encode(&jpeg),
        jpeg,
    })
}
