use crate::colors::{closest_color, PaletteColor, PALETTE};
use crate::image_loader::LoadedImage;
use log::debug;

/// Palette colors in the order the quantizer visited the pixels
pub type PixelPlan = Vec<PaletteColor>;

/// Resize `image` to `width` x `height` and snap every pixel to the palette.
///
/// Pixels are visited column by column (x outer, y inner). Each visited pixel is
/// overwritten with its palette color and the color is appended to the plan, so the plan
/// is column-major while the returned image looks like the final canvas.
pub fn quantize(image: &LoadedImage, width: u32, height: u32) -> (LoadedImage, PixelPlan) {
    let mut resized = image.resize(width, height);
    let mut plan = Vec::with_capacity(width as usize * height as usize);

    for x in 0..width {
        for y in 0..height {
            let color = closest_color(resized.get(x, y));
            resized.put(x, y, color.rgb());
            plan.push(color);
        }
    }

    debug!(
        "Quantized {} to {width}x{height}, {} palette entries used",
        image.path().display(),
        distinct_colors(&plan)
    );

    (resized, plan)
}

fn distinct_colors(plan: &[PaletteColor]) -> usize {
    let mut seen = [false; PALETTE.len()];
    for color in plan {
        seen[color.index()] = true;
    }
    seen.iter().filter(|&&used| used).count()
}
