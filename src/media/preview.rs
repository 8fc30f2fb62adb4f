use iced::widget::image::Handle;
use image::{imageops::FilterType, RgbaImage};

use crate::api::DogApiClient;
use crate::error::GalleryError;

/// Size of generated thumbnails (bounding square)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Decoded, display-ready photo
#[derive(Debug, Clone)]
pub struct ImagePreview {
    /// Downscaled copy for the grid tile
    pub thumbnail: Handle,
    /// Original encoded bytes for the detail overlay
    pub full: Handle,
}

/// State of a grid tile's photo
#[derive(Debug, Clone)]
pub enum TilePhoto {
    Ready(ImagePreview),
    Unavailable,
}

/// Download a photo and turn it into a preview.
///
/// Decoding and resizing are CPU-bound, so they run on a blocking worker.
pub async fn load_preview(client: DogApiClient, url: String) -> Result<ImagePreview, GalleryError> {
    let bytes = client.fetch_image(&url).await?;

    tokio::task::spawn_blocking(move || build_preview(bytes))
        .await
        .map_err(|e| GalleryError::Image(format!("Task join error: {}", e)))?
}

fn build_preview(bytes: Vec<u8>) -> Result<ImagePreview, GalleryError> {
    let thumbnail = make_thumbnail(&bytes)?;
    let (width, height) = thumbnail.dimensions();

    Ok(ImagePreview {
        thumbnail: Handle::from_rgba(width, height, thumbnail.into_raw()),
        full: Handle::from_bytes(bytes),
    })
}

/// Decode encoded photo bytes (JPEG, PNG, GIF, WebP...) and shrink them to fit
/// a `THUMBNAIL_SIZE` square, preserving aspect ratio
pub fn make_thumbnail(bytes: &[u8]) -> Result<RgbaImage, GalleryError> {
    let img = image::load_from_memory(bytes)?;
    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);
    Ok(thumbnail.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img).write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_thumbnail_keeps_aspect_ratio() {
        let bytes = encode(1024, 512, ImageFormat::Png);
        let thumb = make_thumbnail(&bytes).unwrap();
        assert_eq!(thumb.dimensions(), (256, 128));
    }

    #[test]
    fn test_thumbnail_from_jpeg() {
        let bytes = encode(300, 600, ImageFormat::Jpeg);
        let thumb = make_thumbnail(&bytes).unwrap();
        assert_eq!(thumb.height(), THUMBNAIL_SIZE);
        assert_eq!(thumb.width(), 128);
    }

    #[test]
    fn test_garbage_is_image_error() {
        let result = make_thumbnail(b"<html>rate limited</html>");
        assert!(matches!(result, Err(GalleryError::Image(_))));
    }

    #[test]
    fn test_build_preview() {
        let bytes = encode(64, 64, ImageFormat::Png);
        assert!(build_preview(bytes).is_ok());
    }
}
