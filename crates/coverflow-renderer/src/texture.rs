use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Longest edge a panel texture is uploaded at.
const MAX_TEXTURE_EDGE: u32 = 1024;
/// Edge length of placeholder textures.
const PLACEHOLDER_EDGE: u32 = 256;

/// Decoded RGBA8 pixels for one panel.
#[derive(Debug, Clone)]
pub struct PanelImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl PanelImage {
    /// Decode an image file, downscaling anything larger than the texture limit.
    pub fn load(path: &Path) -> Result<Self> {
        let mut img = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
        if img.width() > MAX_TEXTURE_EDGE || img.height() > MAX_TEXTURE_EDGE {
            img = img.thumbnail(MAX_TEXTURE_EDGE, MAX_TEXTURE_EDGE);
        }
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        debug!(?path, width, height, "Decoded panel image");
        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Decode `path`, falling back to a placeholder so the panel still renders.
    pub fn load_or_placeholder(path: &Path, index: usize) -> Self {
        match Self::load(path) {
            Ok(image) => image,
            Err(e) => {
                warn!(?path, index, ?e, "Panel image unavailable, using placeholder");
                Self::placeholder(index, PLACEHOLDER_EDGE, PLACEHOLDER_EDGE)
            }
        }
    }

    /// Checkerboard in a color picked by panel index.
    pub fn placeholder(index: usize, width: u32, height: u32) -> Self {
        let colors: [(u8, u8, u8); 4] = [
            (40, 80, 160),  // Blue
            (160, 60, 40),  // Red
            (40, 140, 60),  // Green
            (140, 100, 40), // Orange
        ];
        let (r, g, b) = colors[index % colors.len()];

        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);
        let checker_size = 32u32;

        for y in 0..height {
            for x in 0..width {
                let is_light = ((x / checker_size) + (y / checker_size)) % 2 == 0;
                let factor = if is_light { 1.0_f32 } else { 0.7 };
                data.push((r as f32 * factor) as u8);
                data.push((g as f32 * factor) as u8);
                data.push((b as f32 * factor) as u8);
                data.push(255);
            }
        }

        Self {
            data,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_full_rgba_buffer() {
        let img = PanelImage::placeholder(2, 64, 48);
        assert_eq!(img.data.len(), 64 * 48 * 4);
        // Top-left cell is the light variant of green.
        assert_eq!(&img.data[..4], &[40, 140, 60, 255]);
    }

    #[test]
    fn placeholder_color_cycles() {
        let a = PanelImage::placeholder(0, 1, 1);
        let b = PanelImage::placeholder(4, 1, 1);
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn missing_file_falls_back() {
        let img = PanelImage::load_or_placeholder(Path::new("/nonexistent/cover.png"), 1);
        assert_eq!((img.width, img.height), (PLACEHOLDER_EDGE, PLACEHOLDER_EDGE));
    }

    #[test]
    fn large_images_are_downscaled() {
        let path = std::env::temp_dir().join(format!("coverflow-large-{}.png", std::process::id()));
        image::RgbaImage::new(2048, 512).save(&path).unwrap();
        let img = PanelImage::load(&path).unwrap();
        assert_eq!((img.width, img.height), (1024, 256));
        std::fs::remove_file(&path).ok();
    }
}
