//! JPEG renditions of uploaded images. CPU bound; run on the blocking pool.

use std::io::Cursor;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

pub const HIGH_MAX_EDGE: u32 = 1920;
pub const HIGH_QUALITY: u8 = 90;
pub const LOW_MAX_EDGE: u32 = 400;
pub const LOW_QUALITY: u8 = 80;

pub struct Renditions {
    pub high: Vec<u8>,
    pub low: Vec<u8>,
}

/// Decode `bytes` and produce the high and low JPEG renditions.
///
/// # Errors
/// Returns an error when the input cannot be decoded or encoded.
pub fn reencode(bytes: &[u8]) -> anyhow::Result<Renditions> {
    let img = image::load_from_memory(bytes).context("failed to decode image")?;
    Ok(Renditions {
        high: encode_jpeg(&fit_within(&img, HIGH_MAX_EDGE), HIGH_QUALITY)?,
        low: encode_jpeg(&fit_within(&img, LOW_MAX_EDGE), LOW_QUALITY)?,
    })
}

/// Shrink to fit a `max_edge` square, keeping aspect ratio. Never enlarges.
fn fit_within(img: &DynamicImage, max_edge: u32) -> DynamicImage {
    if img.width() <= max_edge && img.height() <= max_edge {
        return img.clone();
    }
    img.resize(max_edge, max_edge, FilterType::Lanczos3)
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> anyhow::Result<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&rgb)
        .context("failed to encode jpeg")?;
    Ok(out.into_inner())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn dimensions(jpeg: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(jpeg).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn large_image_is_shrunk_keeping_aspect() {
        let r = reencode(&test_support::png(2400, 1200)).unwrap();
        assert_eq!(dimensions(&r.high), (1920, 960));
        assert_eq!(dimensions(&r.low), (400, 200));
    }

    #[test]
    fn small_image_is_not_enlarged() {
        let r = reencode(&test_support::png(300, 120)).unwrap();
        assert_eq!(dimensions(&r.high), (300, 120));
        assert_eq!(dimensions(&r.low), (300, 120));
    }

    #[test]
    fn output_is_jpeg() {
        let r = reencode(&test_support::png(10, 10)).unwrap();
        assert_eq!(&r.high[..2], &[0xFF, 0xD8]);
        assert_eq!(&r.low[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(reencode(b"definitely not an image").is_err());
    }
}
