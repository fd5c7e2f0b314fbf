use crate::colors::PaletteColor;
use crate::image_loader::LoadedImage;
use crate::models::{estimate_duration, format_duration, CanvasState};
use crate::region::Region;
use std::io::{self, Write};

// Terminal color constants
pub const COLOR_RESET: &str = "\x1B[0m";
pub const COLOR_BOLD: &str = "\x1B[1m";
pub const COLOR_CYAN: &str = "\x1B[36m";
pub const COLOR_YELLOW: &str = "\x1B[33m";
pub const COLOR_GREEN: &str = "\x1B[32m";

// Layout constants
const MAX_LABEL_WIDTH: usize = 10;
const MIN_PADDING: usize = 2;
const DEFAULT_SPACING: &str = "   "; // 3 spaces between image and info
const CELLS_PER_PIXEL: u32 = 2;

/// Renders the quantized image next to a summary of what will be sent
pub struct PreviewFormatter {
    max_width: u32,
}

impl PreviewFormatter {
    pub fn new(max_width: u32) -> Self {
        Self { max_width }
    }

    /// The block preview is skipped for images wider than the limit or the terminal
    pub fn fits(&self, image: &LoadedImage) -> bool {
        if image.width() > self.max_width {
            return false;
        }

        match crossterm::terminal::size() {
            Ok((columns, _)) => image.width() * CELLS_PER_PIXEL <= u32::from(columns),
            // Not a terminal (piped output): trust the configured limit
            Err(_) => true,
        }
    }

    pub fn display<W: Write>(
        &self,
        out: &mut W,
        image: &LoadedImage,
        canvas: &CanvasState,
        region: &Region,
        plan: &[PaletteColor],
    ) -> io::Result<()> {
        let image_lines = if self.fits(image) {
            image_to_block_lines(image)
        } else {
            Vec::new()
        };
        let info_lines = self.format_summary(canvas, region, plan);

        let max_lines = image_lines.len().max(info_lines.len());
        for i in 0..max_lines {
            let image_line = image_lines.get(i).map(|s| s.as_str()).unwrap_or("");
            let info_line = info_lines.get(i).map(|s| s.as_str()).unwrap_or("");

            // Keep the info column aligned below the end of the image
            if image_line.is_empty() && !image_lines.is_empty() {
                let blank = " ".repeat((image.width() * CELLS_PER_PIXEL) as usize);
                writeln!(out, "{blank}{DEFAULT_SPACING}{info_line}")?;
            } else if image_lines.is_empty() {
                writeln!(out, "{info_line}")?;
            } else {
                writeln!(out, "{image_line}{DEFAULT_SPACING}{info_line}")?;
            }
        }

        out.flush()
    }

    pub fn format_summary(
        &self,
        canvas: &CanvasState,
        region: &Region,
        plan: &[PaletteColor],
    ) -> Vec<String> {
        let estimate = estimate_duration(canvas.delay, plan.len()).as_secs();

        vec![
            self.format_info_line(
                "From",
                &format!("({}, {})", region.x0(), region.y0()),
                COLOR_CYAN,
            ),
            self.format_info_line(
                "To",
                &format!("({}, {})", region.x1(), region.y1()),
                COLOR_CYAN,
            ),
            self.format_info_line(
                "Size",
                &format!("{}x{}", region.width(), region.height()),
                COLOR_YELLOW,
            ),
            self.format_info_line("Pixels", &plan.len().to_string(), COLOR_YELLOW),
            self.format_info_line(
                "Delay",
                &format!("{}s", canvas.delay.as_secs()),
                COLOR_GREEN,
            ),
            self.format_info_line("Duration", &format_duration(estimate), COLOR_GREEN),
        ]
    }

    fn format_info_line(&self, label: &str, value: &str, color: &str) -> String {
        let padding = if label.len() < MAX_LABEL_WIDTH {
            MAX_LABEL_WIDTH - label.len() + MIN_PADDING
        } else {
            MIN_PADDING
        };

        format!(
            "{}{}{}{}{}{}{}",
            COLOR_BOLD,
            label,
            COLOR_RESET,
            " ".repeat(padding),
            color,
            value,
            COLOR_RESET
        )
    }
}

/// One line per image row; two spaces on a 24-bit background make a square cell
pub fn image_to_block_lines(image: &LoadedImage) -> Vec<String> {
    (0..image.height())
        .map(|y| {
            (0..image.width())
                .map(|x| {
                    let [r, g, b] = image.get(x, y);
                    format!("\x1b[48;2;{r};{g};{b}m  {COLOR_RESET}")
                })
                .collect()
        })
        .collect()
}
