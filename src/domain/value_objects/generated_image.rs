//! Generated image payload

const FILE_STEM: &str = "megagrok_poster";

/// Raw image bytes returned by a provider, plus the filename used for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl GeneratedImage {
    /// Wrap provider bytes, inferring the file extension from the payload
    ///
    /// Falls back to `default_format` when the magic bytes are not recognised.
    pub fn from_bytes(bytes: Vec<u8>, default_format: &str) -> Self {
        let extension = sniff_extension(&bytes).unwrap_or(default_format);
        let filename = format!("{}.{}", FILE_STEM, extension);
        Self { bytes, filename }
    }
}

fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpeg")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("webp")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_magic_bytes() {
        let png = GeneratedImage::from_bytes(
            vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0],
            "webp",
        );
        assert_eq!(png.filename, "megagrok_poster.png");

        let jpeg = GeneratedImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0], "png");
        assert_eq!(jpeg.filename, "megagrok_poster.jpeg");

        let webp = GeneratedImage::from_bytes(b"RIFF\0\0\0\0WEBPVP8 ".to_vec(), "png");
        assert_eq!(webp.filename, "megagrok_poster.webp");
    }

    #[test]
    fn test_unknown_payload_uses_default_format() {
        let image = GeneratedImage::from_bytes(b"PNGDATA".to_vec(), "png");

        assert_eq!(image.filename, "megagrok_poster.png");
        assert_eq!(image.bytes.len(), 7);
    }
}
