//! Helpers around the core pipeline for the CLI, benches, and tests
//!
//! Everything here is a collaborator of the core, not part of it: image
//! decode/encode via the `image` crate, box overlay rendering, summary
//! stats, dataset iteration, and synthetic test images. The pipeline
//! itself never touches a file.

use crate::error::DetectError;
use crate::models::{BoundingBox, PixelBuffer};
use image::{GenericImageView, Rgb, RgbImage};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn max_dim_from_env() -> Option<u32> {
    match env::var("COIN_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as RGB bytes along with its dimensions.
///
/// Set `COIN_MAX_DIM` to downscale anything larger before detection.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(path)?;
    let rgb = if let Some(max_dim) = max_dim_from_env() {
        let (orig_w, orig_h) = img.dimensions();
        let max_side = orig_w.max(orig_h);
        if max_side > max_dim {
            let resized = img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle);
            resized.to_rgb8()
        } else {
            img.to_rgb8()
        }
    } else {
        img.to_rgb8()
    };
    let (width, height) = rgb.dimensions();
    Ok((rgb.into_raw(), width as usize, height as usize))
}

/// Detect coins in an RGB image with the default configuration.
pub fn detect_coins(
    rgb: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<BoundingBox>, DetectError> {
    crate::detect(rgb, width, height)
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binary mask.
#[derive(Debug, Clone, Copy)]
pub struct MaskStats {
    /// Count of foreground pixels.
    pub foreground_pixels: usize,
    /// Total pixels in the mask.
    pub total_pixels: usize,
    /// Ratio of foreground pixels to total pixels.
    pub foreground_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn grayscale_stats(gray: &[u8]) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if gray.is_empty() {
        0
    } else {
        (sum / gray.len() as u64) as u8
    };
    GrayStats { min, max, avg }
}

/// Compute foreground stats for a binary mask.
pub fn mask_stats(mask: &PixelBuffer<u8>) -> MaskStats {
    let foreground = mask.as_slice().iter().filter(|&&v| v == 255).count();
    let total = mask.width() * mask.height();
    let ratio = if total == 0 {
        0.0
    } else {
        foreground as f64 / total as f64
    };
    MaskStats {
        foreground_pixels: foreground,
        total_pixels: total,
        foreground_ratio: ratio,
    }
}

/// Color used for box overlays.
const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Outline thickness of the drawn boxes, in pixels.
const BOX_THICKNESS: usize = 2;

/// Draw rectangle outlines for each bounding box onto an RGB image.
pub fn draw_bounding_boxes(image: &mut RgbImage, boxes: &[BoundingBox]) {
    for b in boxes {
        for layer in 0..BOX_THICKNESS {
            let x0 = b.min_x.saturating_sub(layer);
            let y0 = b.min_y.saturating_sub(layer);
            let x1 = b.max_x + layer;
            let y1 = b.max_y + layer;
            draw_rect_outline(image, x0, y0, x1, y1);
        }
    }
}

fn draw_rect_outline(image: &mut RgbImage, x0: usize, y0: usize, x1: usize, y1: usize) {
    let width = image.width() as usize;
    let height = image.height() as usize;
    for x in x0..=x1.min(width.saturating_sub(1)) {
        put_pixel(image, x, y0, width, height);
        put_pixel(image, x, y1, width, height);
    }
    for y in y0..=y1.min(height.saturating_sub(1)) {
        put_pixel(image, x0, y, width, height);
        put_pixel(image, x1, y, width, height);
    }
}

fn put_pixel(image: &mut RgbImage, x: usize, y: usize, width: usize, height: usize) {
    if x < width && y < height {
        image.put_pixel(x as u32, y as u32, BOX_COLOR);
    }
}

/// Render detection results over the source image and write it to disk.
pub fn render_overlay<P: AsRef<Path>>(
    rgb: &[u8],
    width: usize,
    height: usize,
    boxes: &[BoundingBox],
    output: P,
) -> Result<(), image::ImageError> {
    let mut canvas = RgbImage::from_raw(width as u32, height as u32, rgb.to_vec())
        .unwrap_or_else(|| RgbImage::new(width as u32, height as u32));
    draw_bounding_boxes(&mut canvas, boxes);
    canvas.save(output)
}

/// Generate a synthetic coin photograph: dark discs on a bright
/// background, returned as interleaved RGB bytes.
///
/// Used by benches and tests so neither needs image assets on disk.
pub fn synthetic_coin_image(
    width: usize,
    height: usize,
    coins: &[(usize, usize, usize)],
) -> Vec<u8> {
    let background = 210u8;
    let coin = 45u8;
    let mut rgb = vec![background; width * height * 3];
    for &(cx, cy, radius) in coins {
        let r2 = (radius * radius) as isize;
        for y in cy.saturating_sub(radius)..(cy + radius + 1).min(height) {
            for x in cx.saturating_sub(radius)..(cx + radius + 1).min(width) {
                let dx = x as isize - cx as isize;
                let dy = y as isize - cy as isize;
                if dx * dx + dy * dy <= r2 {
                    let idx = (y * width + x) * 3;
                    rgb[idx] = coin;
                    rgb[idx + 1] = coin;
                    rgb[idx + 2] = coin + 10;
                }
            }
        }
    }
    rgb
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("COIN_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("images"))
}

/// Default batch limit from environment variables.
///
/// Returns `None` (full dataset) when `COIN_BENCH_LIMIT` is unset or `0`.
pub fn bench_limit_from_env() -> Option<usize> {
    match env::var("COIN_BENCH_LIMIT") {
        Ok(value) => value
            .parse::<usize>()
            .ok()
            .and_then(|v| if v == 0 { None } else { Some(v) }),
        Err(_) => None,
    }
}

/// Smoke test flag from environment variables.
pub fn smoke_from_env() -> bool {
    matches!(
        env::var("COIN_SMOKE").as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES")
    )
}

/// Iterate dataset image paths with optional smoke list and limit.
pub fn dataset_iter<P: AsRef<Path>>(
    root: P,
    limit: Option<usize>,
    smoke: bool,
) -> impl Iterator<Item = PathBuf> {
    let root = root.as_ref();
    let mut images = if smoke {
        load_smoke_list(root).unwrap_or_else(|| collect_images(root))
    } else {
        collect_images(root)
    };

    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn load_smoke_list(root: &Path) -> Option<Vec<PathBuf>> {
    let smoke_path = root.join("_smoke.txt");
    let contents = fs::read_to_string(&smoke_path).ok()?;
    let mut paths = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let candidate = Path::new(line);
        let path = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            root.join(candidate)
        };
        if path.exists() {
            paths.push(path);
        }
    }
    if paths.is_empty() { None } else { Some(paths) }
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if ext == "png" || ext == "jpg" || ext == "jpeg" || ext == "bmp" {
                    images.push(path);
                }
            }
        }
    }

    images
}
