//! Compositing primitives for mockup generation.
//!
//! The pipeline is: resize the artwork to the placement box (the box is
//! authoritative, aspect ratio is not preserved), then source-over blend the
//! resized layer onto the product template at the placement offset.
//!
//! Regions of the layer that fall outside the template are clipped by the
//! blend loop; offsets are not validated against the template's extent.

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::num::NonZeroU32;

use super::error::MockupError;
use super::placement::PlacementRule;

/// Resize an image to the exact target box with a Lanczos3 convolution.
pub fn resize_to_box(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbaImage, MockupError> {
    let src_width =
        NonZeroU32::new(img.width()).ok_or_else(|| MockupError::resize("Source width is 0"))?;
    let src_height =
        NonZeroU32::new(img.height()).ok_or_else(|| MockupError::resize("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| MockupError::resize("Target width is 0"))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| MockupError::resize("Target height is 0"))?;

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.to_rgba8().into_raw(),
        PixelType::U8x4,
    )
    .map_err(|e| MockupError::resize(format!("Failed to create source buffer: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| MockupError::resize(format!("Resize operation failed: {:?}", e)))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| MockupError::resize("Failed to create output image buffer"))
}

/// Source-over blend of `layer` onto `canvas` at the given offset.
///
/// The offset is measured from the canvas top-left corner. Pixels of the
/// layer falling outside the canvas are clipped.
pub fn overlay(canvas: &mut RgbaImage, layer: &RgbaImage, x: u32, y: u32) {
    let x_end = x.saturating_add(layer.width()).min(canvas.width());
    let y_end = y.saturating_add(layer.height()).min(canvas.height());

    for cy in y..y_end {
        for cx in x..x_end {
            let layer_pixel = layer.get_pixel(cx - x, cy - y);
            let canvas_pixel = canvas.get_pixel(cx, cy);

            let blended = blend_pixels(*canvas_pixel, *layer_pixel);
            canvas.put_pixel(cx, cy, blended);
        }
    }
}

/// Blend two pixels using the Porter-Duff "over" operator:
/// result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0) as u8,
    ])
}

/// Produce the composite for one product: resize the artwork to the rule's
/// box and blend it onto the template at the rule's offset.
pub fn composite(
    artwork: &DynamicImage,
    template: &DynamicImage,
    rule: &PlacementRule,
) -> Result<RgbaImage, MockupError> {
    let layer = resize_to_box(artwork, rule.width, rule.height)?;

    let mut canvas = template.to_rgba8();
    overlay(&mut canvas, &layer, rule.x, rule.y);

    Ok(canvas)
}

/// Encode a composite as PNG for upload.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, MockupError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| MockupError::encode(format!("PNG encode failed: {}", e)))?;
    Ok(buffer.into_inner())
}
