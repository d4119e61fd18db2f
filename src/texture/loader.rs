use std::path::{Path, PathBuf};

use resvg::{tiny_skia, usvg};

use crate::error::{CoinError, Result};
use crate::material::GOLD;

/// Edge length SVG faces are rasterized at.
pub const SVG_RASTER_SIZE: u32 = 1024;

/// Straight (non-premultiplied) RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTexture {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl DecodedTexture {
    /// 1x1 texture of a single color.
    pub fn solid(color: [f32; 3]) -> Self {
        let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        Self {
            rgba: vec![r, g, b, 255],
            width: 1,
            height: 1,
        }
    }

    /// Stand-in used when a face image can't be loaded.
    pub fn placeholder() -> Self {
        Self::solid(GOLD)
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Load texture from local file
pub async fn load_from_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| CoinError::io(path, e))
}

/// Rasterize an SVG document to fit a `size` x `size` square, keeping its
/// aspect ratio.
pub fn decode_svg(data: &[u8], size: u32) -> Result<DecodedTexture> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;
    let svg_size = tree.size();
    if !(svg_size.width() > 0.0 && svg_size.height() > 0.0) {
        return Err(CoinError::InvalidSvgSize);
    }

    let scale = size as f32 / svg_size.width().max(svg_size.height());
    let width = ((svg_size.width() * scale).round() as u32).max(1);
    let height = ((svg_size.height() * scale).round() as u32).max(1);

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(CoinError::InvalidSvgSize)?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Ok(DecodedTexture {
        rgba,
        width,
        height,
    })
}

/// Decode a raster image (PNG, JPEG, ...) to RGBA8.
pub fn decode_raster(data: &[u8]) -> Result<DecodedTexture> {
    let img = image::load_from_memory(data)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(DecodedTexture {
        rgba: img.into_raw(),
        width,
        height,
    })
}

pub fn decode_face(path: &Path, data: &[u8]) -> Result<DecodedTexture> {
    if is_svg(path) {
        decode_svg(data, SVG_RASTER_SIZE)
    } else {
        decode_raster(data)
    }
}

/// Read and decode one coin face.
pub async fn load_face_texture(path: PathBuf) -> Result<DecodedTexture> {
    let data = load_from_file(&path).await?;
    tokio::task::spawn_blocking(move || decode_face(&path, &data))
        .await?
}

/// Load a face, falling back to the placeholder on any error.
pub async fn load_face_or_placeholder(path: PathBuf) -> DecodedTexture {
    match load_face_texture(path.clone()).await {
        Ok(texture) => {
            log::info!(
                "loaded face {} ({}x{})",
                path.display(),
                texture.width,
                texture.height
            );
            texture
        }
        Err(e) => {
            log::warn!("using placeholder for {}: {e}", path.display());
            DecodedTexture::placeholder()
        }
    }
}

/// Load heads and tails concurrently.
pub async fn load_faces(heads: PathBuf, tails: PathBuf) -> (DecodedTexture, DecodedTexture) {
    tokio::join!(
        load_face_or_placeholder(heads),
        load_face_or_placeholder(tails)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
        <rect width="10" height="10" fill="#ff0000"/>
    </svg>"##;

    const WIDE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
        <rect width="20" height="10" fill="#00ff00" fill-opacity="0.5"/>
    </svg>"##;

    #[test]
    fn svg_is_rasterized_to_requested_size() {
        let tex = decode_svg(RED_SQUARE.as_bytes(), 64).unwrap();
        assert_eq!((tex.width, tex.height), (64, 64));
        assert_eq!(tex.rgba.len(), 64 * 64 * 4);
        assert_eq!(&tex.rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn svg_keeps_aspect_and_straight_alpha() {
        let tex = decode_svg(WIDE.as_bytes(), 64).unwrap();
        assert_eq!((tex.width, tex.height), (64, 32));
        let px = &tex.rgba[..4];
        assert!(px[1] >= 250, "green should be demultiplied, got {px:?}");
        assert!((120..=135).contains(&px[3]));
    }

    #[test]
    fn broken_svg_is_an_error() {
        assert!(decode_svg(b"<svg", 64).is_err());
    }

    #[test]
    fn png_is_decoded() {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([1, 2, 3, 4]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let tex = decode_face(Path::new("face.png"), &bytes).unwrap();
        assert_eq!((tex.width, tex.height), (3, 2));
        assert_eq!(&tex.rgba[tex.rgba.len() - 4..], &[1, 2, 3, 4]);
    }

    #[test]
    fn extension_picks_decoder() {
        assert!(is_svg(Path::new("assets/coin_head.SVG")));
        assert!(!is_svg(Path::new("assets/coin_head.png")));
        assert!(!is_svg(Path::new("assets/coin_head")));
    }

    #[test]
    fn placeholder_is_opaque_gold() {
        assert_eq!(DecodedTexture::placeholder().rgba, vec![255, 215, 0, 255]);
    }

    #[test]
    fn bundled_faces_decode() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        for name in ["coin_head.svg", "coin_tail.svg"] {
            let path = dir.join(name);
            let data = std::fs::read(&path).unwrap();
            let tex = decode_face(&path, &data).unwrap();
            assert_eq!((tex.width, tex.height), (SVG_RASTER_SIZE, SVG_RASTER_SIZE));
        }
    }

    #[tokio::test]
    async fn missing_file_falls_back() {
        let tex = load_face_or_placeholder(PathBuf::from("does/not/exist.svg")).await;
        assert_eq!(tex, DecodedTexture::placeholder());
    }

    #[tokio::test]
    async fn faces_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("coinflip-faces-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let heads = dir.join("heads.svg");
        std::fs::write(&heads, RED_SQUARE).unwrap();

        let (h, t) = load_faces(heads, dir.join("missing.svg")).await;
        assert_eq!((h.width, h.height), (SVG_RASTER_SIZE, SVG_RASTER_SIZE));
        assert_eq!(t, DecodedTexture::placeholder());

        std::fs::remove_dir_all(&dir).ok();
    }
}
