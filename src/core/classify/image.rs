use base64::Engine as _;

use super::ClassifyError;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];
const GIF87_SIGNATURE: &[u8] = b"GIF87a";
const GIF89_SIGNATURE: &[u8] = b"GIF89a";
const BMP_SIGNATURE: &[u8] = b"BM";

/// Raster format recognised from the leading bytes of a decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Unknown,
}

impl ImageFormat {
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&PNG_SIGNATURE) {
            ImageFormat::Png
        } else if bytes.starts_with(&JPEG_SIGNATURE) {
            ImageFormat::Jpeg
        } else if bytes.starts_with(GIF87_SIGNATURE) || bytes.starts_with(GIF89_SIGNATURE) {
            ImageFormat::Gif
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            ImageFormat::WebP
        } else if bytes.starts_with(BMP_SIGNATURE) && bytes.len() >= 14 {
            ImageFormat::Bmp
        } else {
            ImageFormat::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::WebP => "webp",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Unknown => "unknown",
        }
    }

    pub fn is_recognized(self) -> bool {
        self != ImageFormat::Unknown
    }
}

/// A decoded `data:image/...` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Decode a data URI. Everything after the first comma is the base64
/// payload; ASCII whitespace inside it is ignored.
pub fn decode_data_uri(raw: &str) -> Result<ImagePayload, ClassifyError> {
    let (header, payload) = raw
        .split_once(',')
        .ok_or(ClassifyError::MissingImagePayload)?;

    let media_type = header
        .strip_prefix("data:")
        .unwrap_or(header)
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string();

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = base64::prelude::BASE64_STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| ClassifyError::InvalidBase64(err.to_string()))?;

    Ok(ImagePayload {
        media_type,
        format: ImageFormat::sniff(&bytes),
        bytes,
    })
}
