use super::{CanvasApi, PlacementOutcome};
use crate::error::{PlacerError, PlacerResult};
use crate::models::PixelRequest;
use std::collections::VecDeque;

/// In-memory service: canned startup answers and a log of placement requests
pub struct FakeCanvasApi {
    pub active: PlacerResult<bool>,
    pub timer: PlacerResult<u64>,
    pub size: PlacerResult<(u32, u32)>,
    pub outcomes: VecDeque<PlacementOutcome>,
    pub calls: Vec<&'static str>,
    pub requests: Vec<PixelRequest>,
}

impl FakeCanvasApi {
    pub fn new(timer: u64, width: u32, height: u32) -> Self {
        Self {
            active: Ok(true),
            timer: Ok(timer),
            size: Ok((width, height)),
            outcomes: VecDeque::new(),
            calls: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn unavailable(endpoint: &str, status: u16) -> PlacerError {
        PlacerError::ServiceUnavailable {
            endpoint: endpoint.to_string(),
            status,
        }
    }
}

fn replay<T: Clone>(value: &PlacerResult<T>) -> PlacerResult<T> {
    match value {
        Ok(v) => Ok(v.clone()),
        Err(PlacerError::ServiceUnavailable { endpoint, status }) => {
            Err(PlacerError::ServiceUnavailable {
                endpoint: endpoint.clone(),
                status: *status,
            })
        }
        Err(PlacerError::MalformedResponse { endpoint, body }) => {
            Err(PlacerError::MalformedResponse {
                endpoint: endpoint.clone(),
                body: body.clone(),
            })
        }
        Err(e) => Err(PlacerError::InvalidInput(e.to_string())),
    }
}

impl CanvasApi for FakeCanvasApi {
    fn is_active(&mut self) -> PlacerResult<bool> {
        self.calls.push("is_active");
        replay(&self.active)
    }

    fn timer(&mut self) -> PlacerResult<u64> {
        self.calls.push("timer");
        replay(&self.timer)
    }

    fn canvas_size(&mut self) -> PlacerResult<(u32, u32)> {
        self.calls.push("canvas_size");
        replay(&self.size)
    }

    fn write_pixel(&mut self, request: &PixelRequest) -> PlacementOutcome {
        self.calls.push("write_pixel");
        self.requests.push(request.clone());
        self.outcomes.pop_front().unwrap_or(PlacementOutcome::Placed)
    }
}
