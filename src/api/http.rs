use super::{
    parse_active, parse_size, parse_timer, CanvasApi, PlacementOutcome, ACTIVE_ENDPOINT,
    SIZE_ENDPOINT, TIMER_ENDPOINT, WRITE_PIXEL_ENDPOINT,
};
use crate::config::Config;
use crate::error::{PlacerError, PlacerResult};
use crate::models::PixelRequest;
use log::debug;

const USER_AGENT: &str = concat!("pixelwar-placer/", env!("CARGO_PKG_VERSION"));

pub struct HttpCanvasApi {
    client: reqwest::blocking::Client,
    config: Config,
}

impl HttpCanvasApi {
    pub fn new(config: Config) -> PlacerResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.http_timeout)
            .build()
            .map_err(|source| PlacerError::Transport {
                endpoint: config.base_url.clone(),
                source,
            })?;

        Ok(Self { client, config })
    }

    /// GET an endpoint and return its body, keeping HTTP errors out of the parsers
    fn get_text(&self, endpoint: &str) -> PlacerResult<String> {
        let url = self.config.endpoint_url(endpoint);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| PlacerError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacerError::ServiceUnavailable {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| PlacerError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        debug!("{endpoint} -> {body:?}");

        Ok(body)
    }
}

impl CanvasApi for HttpCanvasApi {
    fn is_active(&mut self) -> PlacerResult<bool> {
        Ok(parse_active(&self.get_text(ACTIVE_ENDPOINT)?))
    }

    fn timer(&mut self) -> PlacerResult<u64> {
        parse_timer(&self.get_text(TIMER_ENDPOINT)?)
    }

    fn canvas_size(&mut self) -> PlacerResult<(u32, u32)> {
        parse_size(&self.get_text(SIZE_ENDPOINT)?)
    }

    fn write_pixel(&mut self, request: &PixelRequest) -> PlacementOutcome {
        let url = self.config.endpoint_url(WRITE_PIXEL_ENDPOINT);

        match self.client.post(&url).json(request).send() {
            Ok(response) if response.status().is_success() => PlacementOutcome::Placed,
            Ok(response) => PlacementOutcome::Rejected {
                status: response.status().as_u16(),
            },
            Err(e) => PlacementOutcome::Failed(e.to_string()),
        }
    }
}
