//! Current-time tool with a pluggable time source.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::Deserialize;
use tracing::debug;

use pipeline_core::{CapabilityDescriptor, Tool, ToolArgs, ToolError, ToolOutput};

use crate::http::HttpAdapter;
use crate::tools::geoip::IpInfoApi;
use crate::valves::{TimeSource, Valves};

const ZONE_TIME_ENDPOINT: &str = "http://worldtimeapi.org/api/timezone";

/// Response from the zone time service.
#[derive(Debug, Deserialize)]
struct ZoneTime {
    datetime: String,
}

/// Fetches the current wall time for an IANA timezone.
#[derive(Clone)]
pub struct ZoneTimeApi {
    http: HttpAdapter,
}

impl ZoneTimeApi {
    pub fn new(http: HttpAdapter) -> Self {
        Self { http }
    }

    /// Current time in the given zone, offset included.
    pub async fn now_in_zone(&self, zone: &str) -> Result<DateTime<FixedOffset>, ToolError> {
        let url = format!("{}/{}", ZONE_TIME_ENDPOINT, zone.replace(' ', "_"));
        let response = self.http.get(&url, None).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ToolError::NotFound(format!(
                "Timezone '{zone}' not found"
            )));
        }
        if !response.status().is_success() {
            return Err(ToolError::Transport(format!(
                "{url} returned status {}",
                response.status()
            )));
        }

        let data: ZoneTime = response
            .json()
            .await
            .map_err(|e| ToolError::Transport(format!("Invalid JSON from {url}: {e}")))?;
        parse_zone_datetime(&data.datetime)
    }
}

fn parse_zone_datetime(datetime: &str) -> Result<DateTime<FixedOffset>, ToolError> {
    DateTime::parse_from_rfc3339(datetime).map_err(|e| {
        ToolError::Transport(format!("Unexpected datetime from time service: {e}"))
    })
}

/// Render a zoned instant as the tool's output line.
pub fn format_current_time(now: DateTime<FixedOffset>) -> String {
    let offset_seconds = now.offset().local_minus_utc();
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.abs();
    format!(
        "Current Time (UTC{}{:02}:{:02}) = {}",
        sign,
        abs / 3600,
        (abs % 3600) / 60,
        now.format("%H:%M:%S")
    )
}

/// Reports the current time.
///
/// The zone comes from the `time_source` valve: the system's local zone,
/// a fixed UTC offset, or the zone of the caller's IP geolocation.
pub struct CurrentTime {
    valves: Arc<Valves>,
    geo: IpInfoApi,
    zones: ZoneTimeApi,
}

impl CurrentTime {
    pub fn new(valves: Arc<Valves>, http: HttpAdapter) -> Self {
        Self {
            geo: IpInfoApi::new(http.clone(), valves.clone()),
            zones: ZoneTimeApi::new(http),
            valves,
        }
    }
}

#[async_trait]
impl Tool for CurrentTime {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "get_current_time",
            "Gets the current time, including the UTC offset of the active timezone.",
        )
    }

    async fn call(&self, _args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let strategy = self.valves.time_strategy()?;
        debug!("Resolving current time via {:?}", strategy);

        let now = match strategy {
            TimeSource::Local => Local::now().fixed_offset(),
            TimeSource::Fixed(offset) => Utc::now().with_timezone(&offset),
            TimeSource::IpGeolocation => {
                let info = self.geo.lookup(None).await?;
                let zone = info.timezone.ok_or_else(|| {
                    ToolError::NotFound(
                        "The geolocation service returned no timezone for this address".to_string(),
                    )
                })?;
                self.zones.now_in_zone(&zone).await?
            }
        };

        Ok(ToolOutput::text(format_current_time(now)))
    }
}
