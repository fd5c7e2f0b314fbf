use crate::api::CanvasApi;
use crate::error::{PlacerError, PlacerResult};
use crate::models::CanvasState;
use log::info;
use std::time::Duration;

/// Extra second added to the server timer so placements never arrive early
const DELAY_MARGIN_SECS: u64 = 1;

/// Read the game state once. Inactive wars stop here, before the other two calls.
pub fn fetch_canvas_state<A: CanvasApi>(api: &mut A) -> PlacerResult<CanvasState> {
    if !api.is_active()? {
        return Err(PlacerError::Inactive);
    }

    let raw_delay = api.timer()?;
    let (width, height) = api.canvas_size()?;

    let state = CanvasState {
        active: true,
        delay: Duration::from_secs(raw_delay.saturating_add(DELAY_MARGIN_SECS)),
        width,
        height,
    };
    info!(
        "Canvas is {width}x{height}, placing one pixel every {}s",
        state.delay.as_secs()
    );

    Ok(state)
}
