use crate::api::{CanvasApi, PlacementOutcome};
use crate::colors::PaletteColor;
use crate::error::{PlacerError, PlacerResult};
use crate::models::PixelRequest;
use crate::pacing::{Pacer, Sleeper};
use crate::progress::ProgressBar;
use crate::region::Region;
use log::{info, warn};
use std::io::Write;

const PROGRESS_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Sends a pixel plan to the canvas one request at a time
pub struct Submitter<'a, A: CanvasApi, S: Sleeper> {
    api: &'a mut A,
    pacer: Pacer<S>,
}

impl<'a, A: CanvasApi, S: Sleeper> Submitter<'a, A, S> {
    pub fn new(api: &'a mut A, pacer: Pacer<S>) -> Self {
        Self { api, pacer }
    }

    /// Walk `region` row by row while taking `plan` entries in their stored order.
    ///
    /// The request swaps axes: the canvas column goes in `y` and the row in `x`, which is
    /// what the service expects. Every request is followed by one pause, and failures are
    /// only logged.
    pub fn submit<W: Write>(
        &mut self,
        region: &Region,
        plan: &[PaletteColor],
        progress_out: &mut W,
    ) -> PlacerResult<SubmissionReport> {
        if plan.len() != region.pixel_count() {
            return Err(PlacerError::InvalidInput(format!(
                "plan has {} colors for a region of {} pixels",
                plan.len(),
                region.pixel_count()
            )));
        }

        let progress = ProgressBar::new(PROGRESS_WIDTH, plan.len());
        let mut report = SubmissionReport::default();

        for ((x, y), color) in region.destination_pixels().zip(plan.iter()) {
            let request = PixelRequest {
                x: y,
                y: x,
                color: color.to_hex(),
            };

            report.attempted += 1;
            match self.api.write_pixel(&request) {
                PlacementOutcome::Placed => {
                    report.succeeded += 1;
                    info!(
                        "Successfully posted pixel at ({x}, {y}) with color {}",
                        request.color
                    );
                }
                PlacementOutcome::Rejected { status } => {
                    report.failed += 1;
                    warn!(
                        "Failed to post pixel at ({x}, {y}) with color {}. Status code: {status}",
                        request.color
                    );
                }
                PlacementOutcome::Failed(reason) => {
                    report.failed += 1;
                    warn!(
                        "Failed to post pixel at ({x}, {y}) with color {}: {reason}",
                        request.color
                    );
                }
            }

            // Clear the line and redraw in place
            write!(progress_out, "\r\x1B[2K{}", progress.render(report.attempted))?;
            progress_out.flush()?;

            self.pacer.wait();
        }
        writeln!(progress_out)?;

        info!(
            "Placed {}/{} pixels ({} failed)",
            report.succeeded, report.attempted, report.failed
        );
        Ok(report)
    }

    #[cfg(test)]
    pub fn into_pacer(self) -> Pacer<S> {
        self.pacer
    }
}
