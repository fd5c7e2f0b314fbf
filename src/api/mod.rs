#[cfg(test)]
pub mod fake;
pub mod http;

use crate::error::{PlacerError, PlacerResult};
use crate::models::PixelRequest;

pub use http::HttpCanvasApi;

pub const ACTIVE_ENDPOINT: &str = "is_pixel_war_active.php";
pub const TIMER_ENDPOINT: &str = "get_timer.php";
pub const SIZE_ENDPOINT: &str = "readTaille.php";
pub const WRITE_PIXEL_ENDPOINT: &str = "write_pixel.php";

/// Result of one pixel placement; never fatal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed,
    Rejected { status: u16 },
    Failed(String),
}

/// The four calls the pixel war service offers a client
pub trait CanvasApi {
    fn is_active(&mut self) -> PlacerResult<bool>;
    fn timer(&mut self) -> PlacerResult<u64>;
    fn canvas_size(&mut self) -> PlacerResult<(u32, u32)>;
    fn write_pixel(&mut self, request: &PixelRequest) -> PlacementOutcome;
}

pub fn parse_active(body: &str) -> bool {
    body.trim().eq_ignore_ascii_case("true")
}

pub fn parse_timer(body: &str) -> PlacerResult<u64> {
    body.trim()
        .parse()
        .map_err(|_| malformed(TIMER_ENDPOINT, body))
}

/// Parse `"<width>,<height>"`; zero-sized canvases are rejected
pub fn parse_size(body: &str) -> PlacerResult<(u32, u32)> {
    let (width, height) = body
        .trim()
        .split_once(',')
        .ok_or_else(|| malformed(SIZE_ENDPOINT, body))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| malformed(SIZE_ENDPOINT, body))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| malformed(SIZE_ENDPOINT, body))?;

    if width == 0 || height == 0 {
        return Err(malformed(SIZE_ENDPOINT, body));
    }

    Ok((width, height))
}

fn malformed(endpoint: &str, body: &str) -> PlacerError {
    PlacerError::MalformedResponse {
        endpoint: endpoint.to_string(),
        body: body.to_string(),
    }
}
