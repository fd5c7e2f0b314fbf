use crate::error::{PlacerError, PlacerResult};
use crate::models::{CanvasState, Coordinate};
use crate::prompt::Prompter;
use log::{debug, warn};
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Coordinates are out of canvas bounds.")]
    OutOfBounds,

    #[error("Coordinates are not in the right order. If this is not a mistake press ctrl+c to retry from 0.")]
    WrongOrder,

    #[error("{0:?} is not a valid integer.")]
    NotAnInteger(String),
}

/// Rectangle of the canvas to paint, corners inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Region {
    pub fn x0(&self) -> u32 {
        self.x0
    }

    pub fn y0(&self) -> u32 {
        self.y0
    }

    pub fn x1(&self) -> u32 {
        self.x1
    }

    pub fn y1(&self) -> u32 {
        self.y1
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0 + 1
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Canvas positions in submission order: rows top to bottom, each row left to right
    pub fn destination_pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..=self.y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
    }
}

pub fn validate_first(
    canvas: &CanvasState,
    first: Coordinate,
) -> Result<Coordinate, ValidationError> {
    if canvas.contains(first.x, first.y) {
        Ok(first)
    } else {
        Err(ValidationError::OutOfBounds)
    }
}

/// Validate the bottom-right corner against the canvas and an accepted first corner
pub fn validate_last(
    canvas: &CanvasState,
    first: Coordinate,
    last: Coordinate,
) -> Result<Region, ValidationError> {
    if last.x >= i64::from(canvas.width) || last.y >= i64::from(canvas.height) {
        return Err(ValidationError::OutOfBounds);
    }
    if last.x <= first.x || last.y <= first.y {
        return Err(ValidationError::WrongOrder);
    }

    let first = validate_first(canvas, first)?;

    // Every value is now within 0..canvas size
    Ok(Region {
        x0: first.x as u32,
        y0: first.y as u32,
        x1: last.x as u32,
        y1: last.y as u32,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Prompting,
    Retrying(u32),
    Accepted,
    Aborted,
}

impl SelectionState {
    /// State after one rejected attempt; `Aborted` once `max_attempts` failures are reached
    pub fn after_failure(self, max_attempts: u32) -> Self {
        let failures = match self {
            SelectionState::Prompting => 1,
            SelectionState::Retrying(n) => n + 1,
            terminal => return terminal,
        };

        if failures >= max_attempts {
            SelectionState::Aborted
        } else {
            SelectionState::Retrying(failures)
        }
    }
}

pub struct RegionSelector {
    canvas: CanvasState,
    max_attempts: u32,
}

impl RegionSelector {
    pub fn new(canvas: CanvasState, max_attempts: u32) -> Self {
        Self {
            canvas,
            max_attempts,
        }
    }

    /// Ask for both corners interactively
    pub fn select<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> PlacerResult<Region> {
        let first = self.run_round(prompter, |canvas, prompter| {
            let coordinate = match ask_coordinate(prompter, "first")? {
                Ok(coordinate) => coordinate,
                Err(e) => return Ok(Err(e)),
            };
            Ok(validate_first(canvas, coordinate))
        })?;

        self.run_round(prompter, |canvas, prompter| {
            let coordinate = match ask_coordinate(prompter, "last")? {
                Ok(coordinate) => coordinate,
                Err(e) => return Ok(Err(e)),
            };
            Ok(validate_last(canvas, first, coordinate))
        })
    }

    /// Build a region from corners given up front, without prompting
    pub fn from_corners(&self, first: Coordinate, last: Coordinate) -> PlacerResult<Region> {
        validate_first(&self.canvas, first)
            .and_then(|first| validate_last(&self.canvas, first, last))
            .map_err(|e| PlacerError::InvalidInput(format!("{first} -> {last}: {e}")))
    }

    fn run_round<T, R, W, F>(
        &self,
        prompter: &mut Prompter<R, W>,
        mut attempt: F,
    ) -> PlacerResult<T>
    where
        R: BufRead,
        W: Write,
        F: FnMut(&CanvasState, &mut Prompter<R, W>) -> PlacerResult<Result<T, ValidationError>>,
    {
        let mut state = SelectionState::Prompting;

        loop {
            match attempt(&self.canvas, &mut *prompter)? {
                Ok(value) => {
                    debug!("Coordinate round finished: {:?}", SelectionState::Accepted);
                    return Ok(value);
                }
                Err(e) => {
                    warn!("Rejected coordinates: {e}");
                    prompter.say(&format!(
                        "Invalid input: {e} Please enter valid coordinates."
                    ))?;

                    state = state.after_failure(self.max_attempts);
                    debug!("Coordinate round state: {state:?}");
                    if state == SelectionState::Aborted {
                        prompter.say("Too many invalid inputs. Exiting.")?;
                        return Err(PlacerError::TooManyInvalidInputs);
                    }
                }
            }
        }
    }
}

fn ask_coordinate<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    which: &str,
) -> PlacerResult<Result<Coordinate, ValidationError>> {
    let x = match parse_integer(&prompter.ask(&format!(
        "Enter the x coordinate of the {which} pixel: "
    ))?) {
        Ok(x) => x,
        Err(e) => return Ok(Err(e)),
    };
    let y = match parse_integer(&prompter.ask(&format!(
        "Enter the y coordinate of the {which} pixel: "
    ))?) {
        Ok(y) => y,
        Err(e) => return Ok(Err(e)),
    };

    Ok(Ok(Coordinate::new(x, y)))
}

fn parse_integer(raw: &str) -> Result<i64, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::NotAnInteger(raw.to_string()))
}

/// Parse `x,y` as given on the command line
pub fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {raw:?}"))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x in {raw:?}"))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y in {raw:?}"))?;
    Ok(Coordinate::new(x, y))
}
