use crate::api::CanvasApi;
use crate::config::Config;
use crate::display::{preview_path, PreviewFormatter};
use crate::error::PlacerResult;
use crate::fetcher::fetch_canvas_state;
use crate::image_loader::{find_image, LoadedImage};
use crate::models::{estimate_duration, format_duration, CanvasState, Coordinate};
use crate::pacing::{Pacer, Sleeper};
use crate::prompt::Prompter;
use crate::quantize::{quantize, PixelPlan};
use crate::region::{Region, RegionSelector};
use crate::submitter::{SubmissionReport, Submitter};
use log::info;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Per-run choices that do not come from the environment
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub image: Option<PathBuf>,
    pub first: Option<Coordinate>,
    pub last: Option<Coordinate>,
    pub assume_yes: bool,
    pub dry_run: bool,
    pub show_preview: bool,
}

/// Everything decided before the first pixel is sent
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub canvas: CanvasState,
    pub region: Region,
    pub preview: LoadedImage,
    pub plan: PixelPlan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    DryRun { pixels: usize },
    Submitted(SubmissionReport),
}

/// One pass of the client: fetch state, load, select, quantize, confirm, submit
pub struct Session<A: CanvasApi, S: Sleeper> {
    config: Config,
    options: RunOptions,
    api: A,
    sleeper: S,
}

impl<A: CanvasApi, S: Sleeper> Session<A, S> {
    pub fn new(config: Config, options: RunOptions, api: A, sleeper: S) -> Self {
        Self {
            config,
            options,
            api,
            sleeper,
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[cfg(test)]
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> PlacerResult<RunOutcome> {
        let prepared = self.prepare(prompter)?;

        let estimate = estimate_duration(prepared.canvas.delay, prepared.plan.len());
        prompter.say(&format!(
            "the total time taken for placing pixels is {}",
            format_duration(estimate.as_secs())
        ))?;

        if self.options.dry_run {
            info!("Dry run, nothing will be sent");
            return Ok(RunOutcome::DryRun {
                pixels: prepared.plan.len(),
            });
        }

        if !self.options.assume_yes {
            prompter.confirm(
                "If the result is as expected, press enter to continue. Otherwise, type n to cancel: ",
            )?;
        }

        self.execute(&prepared, prompter).map(RunOutcome::Submitted)
    }

    /// Fetch, load, select and quantize; nothing is sent to the canvas
    pub fn prepare<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> PlacerResult<PreparedRun> {
        let canvas = fetch_canvas_state(&mut self.api)?;

        let image_path = match &self.options.image {
            Some(path) => path.clone(),
            None => find_image(&self.config.image_dir)?,
        };
        prompter.say(&format!(
            "Processing with '{}', if this is not the right image, please remove the other images from the directory.",
            image_path.display()
        ))?;
        let image = LoadedImage::open(&image_path)?;

        prompter.say(&format!(
            "Canva's size: ({}, {})",
            canvas.width, canvas.height
        ))?;
        let selector = RegionSelector::new(canvas, self.config.max_attempts);
        let region = match (self.options.first, self.options.last) {
            (Some(first), Some(last)) => selector.from_corners(first, last)?,
            _ => selector.select(prompter)?,
        };
        info!(
            "Region ({}, {}) to ({}, {}), {} pixels",
            region.x0(),
            region.y0(),
            region.x1(),
            region.y1(),
            region.pixel_count()
        );

        let (preview, plan) = quantize(&image, region.width(), region.height());

        let saved_to = preview_path(image.path());
        preview.save(&saved_to)?;
        info!("Preview saved to {}", saved_to.display());

        if self.options.show_preview {
            PreviewFormatter::new(self.config.preview_max_width).display(
                prompter.writer(),
                &preview,
                &canvas,
                &region,
                &plan,
            )?;
        }

        Ok(PreparedRun {
            canvas,
            region,
            preview,
            plan,
        })
    }

    pub fn execute<R: BufRead, W: Write>(
        &mut self,
        prepared: &PreparedRun,
        prompter: &mut Prompter<R, W>,
    ) -> PlacerResult<SubmissionReport> {
        let pacer = Pacer::new(prepared.canvas.delay, &mut self.sleeper);
        let mut submitter = Submitter::new(&mut self.api, pacer);

        submitter.submit(&prepared.region, &prepared.plan, prompter.writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeCanvasApi;
    use crate::api::PlacementOutcome;
    use crate::colors::PaletteColor;
    use crate::error::PlacerError;
    use crate::pacing::testing::RecordingSleeper;
    use image::RgbImage;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use std::time::Duration;

    type TestSession = Session<FakeCanvasApi, RecordingSleeper>;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pixelwar-placer-session-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_gradient(path: &Path) {
        RgbImage::from_fn(8, 8, |x, y| image::Rgb([(x * 30) as u8, (y * 30) as u8, 90]))
            .save(path)
            .unwrap();
    }

    fn session(dir: &Path, api: FakeCanvasApi, options: RunOptions) -> TestSession {
        let config = Config {
            image_dir: dir.to_path_buf(),
            ..Config::default()
        };
        Session::new(config, options, api, RecordingSleeper::default())
    }

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_end_to_end_two_by_two() {
        let dir = scratch_dir("e2e");
        write_gradient(&dir.join("art.jpg"));

        let mut api = FakeCanvasApi::new(2, 100, 100);
        api.outcomes.extend([
            PlacementOutcome::Placed,
            PlacementOutcome::Rejected { status: 500 },
        ]);
        let mut session = session(&dir, api, RunOptions::default());
        let mut prompter = prompter("10\n10\n11\n11\n\n");

        let outcome = session.run(&mut prompter).unwrap();
        match outcome {
            RunOutcome::Submitted(report) => {
                assert_eq!(report.attempted, 4);
                assert_eq!(report.failed, 1);
            }
            other => panic!("expected a submission, got {other:?}"),
        }

        let requests = &session.api().requests;
        assert_eq!(requests.len(), 4);
        // Row-major over (10,10)-(11,11), axes swapped on the wire
        let positions: Vec<(u32, u32)> = requests.iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(positions, vec![(10, 10), (10, 11), (11, 10), (11, 11)]);
        assert!(requests
            .iter()
            .all(|r| PaletteColor::from_hex(&r.color).is_some()));

        assert_eq!(session.sleeper().sleeps, vec![Duration::from_secs(3); 4]);
        assert!(dir.join("art_preview.png").exists());

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("Processing with"));
        assert!(output.contains("Canva's size: (100, 100)"));
        assert!(output.contains("the total time taken for placing pixels is 0min 12s"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_plan_matches_preview_pixels() {
        let dir = scratch_dir("plan");
        write_gradient(&dir.join("art.jpg"));

        let mut session = session(&dir, FakeCanvasApi::new(0, 50, 50), RunOptions::default());
        let prepared = session.prepare(&mut prompter("0\n0\n2\n1\n")).unwrap();

        assert_eq!(prepared.plan.len(), 6);
        assert_eq!((prepared.preview.width(), prepared.preview.height()), (3, 2));
        // Column-major plan
        assert_eq!(prepared.plan[1].rgb(), prepared.preview.get(0, 1));
        assert_eq!(prepared.plan[2].rgb(), prepared.preview.get(1, 0));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_inactive_war_stops_before_image_lookup() {
        // Empty directory: reaching the image scan would fail differently
        let dir = scratch_dir("inactive");
        let mut api = FakeCanvasApi::new(2, 100, 100);
        api.active = Ok(false);
        let mut session = session(&dir, api, RunOptions::default());

        let result = session.run(&mut prompter(""));
        assert!(matches!(result, Err(PlacerError::Inactive)));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_image_is_fatal() {
        let dir = scratch_dir("noimage");
        let mut session = session(&dir, FakeCanvasApi::new(2, 100, 100), RunOptions::default());

        let result = session.run(&mut prompter("1\n1\n2\n2\n\n"));
        assert!(matches!(result, Err(PlacerError::NoImageFound(_))));
        assert!(session.api().requests.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cancelled_confirmation_sends_nothing() {
        let dir = scratch_dir("cancel");
        write_gradient(&dir.join("art.jpg"));
        let mut session = session(&dir, FakeCanvasApi::new(2, 100, 100), RunOptions::default());

        let result = session.run(&mut prompter("1\n1\n2\n2\nn\n"));
        assert!(matches!(result, Err(PlacerError::Cancelled)));
        assert!(session.api().requests.is_empty());
        assert!(session.sleeper().sleeps.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_dry_run_with_corners_from_options() {
        let dir = scratch_dir("dryrun");
        write_gradient(&dir.join("art.jpg"));
        let options = RunOptions {
            first: Some(Coordinate::new(5, 5)),
            last: Some(Coordinate::new(9, 6)),
            dry_run: true,
            show_preview: true,
            ..RunOptions::default()
        };
        let mut session = session(&dir, FakeCanvasApi::new(2, 100, 100), options);

        let mut prompter = prompter("");
        let outcome = session.run(&mut prompter).unwrap();
        assert_eq!(outcome, RunOutcome::DryRun { pixels: 10 });
        assert!(session.api().requests.is_empty());

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("5x2"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_dry_run_still_reports_the_estimate() {
        let dir = scratch_dir("dryrun-estimate");
        write_gradient(&dir.join("art.jpg"));
        let options = RunOptions {
            first: Some(Coordinate::new(0, 0)),
            last: Some(Coordinate::new(9, 9)),
            dry_run: true,
            show_preview: false,
            ..RunOptions::default()
        };
        // Timer 4 gives a 5 s delay, 100 pixels take 500 s
        let mut session = session(&dir, FakeCanvasApi::new(4, 100, 100), options);

        let mut prompter = prompter("");
        let outcome = session.run(&mut prompter).unwrap();
        assert_eq!(outcome, RunOutcome::DryRun { pixels: 100 });
        assert!(session.sleeper().sleeps.is_empty());

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("the total time taken for placing pixels is 8min 20s"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_explicit_image_and_assume_yes() {
        let dir = scratch_dir("explicit");
        let image = dir.join("chosen.jpg");
        write_gradient(&image);
        write_gradient(&dir.join("aaa.jpg"));
        let options = RunOptions {
            image: Some(image),
            first: Some(Coordinate::new(0, 0)),
            last: Some(Coordinate::new(1, 1)),
            assume_yes: true,
            ..RunOptions::default()
        };
        let mut session = session(&dir, FakeCanvasApi::new(1, 10, 10), options);

        let mut prompter = prompter("");
        session.run(&mut prompter).unwrap();
        assert_eq!(session.api().requests.len(), 4);
        assert!(dir.join("chosen_preview.png").exists());
        assert!(!dir.join("aaa_preview.png").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_corners_from_options_are_fatal() {
        let dir = scratch_dir("badcorners");
        write_gradient(&dir.join("art.jpg"));
        let options = RunOptions {
            first: Some(Coordinate::new(5, 5)),
            last: Some(Coordinate::new(4, 4)),
            ..RunOptions::default()
        };
        let mut session = session(&dir, FakeCanvasApi::new(2, 100, 100), options);

        let result = session.run(&mut prompter(""));
        assert!(matches!(result, Err(PlacerError::InvalidInput(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
