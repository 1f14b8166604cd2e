//! IP geolocation tool using ipinfo.io.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use pipeline_core::{CapabilityDescriptor, ParamType, Tool, ToolArgs, ToolError, ToolOutput};

use crate::http::HttpAdapter;
use crate::valves::Valves;

const IPINFO_ENDPOINT: &str = "https://ipinfo.io";

/// Geolocation record for an IP address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpInfo {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Latitude,longitude pair as reported by the service.
    #[serde(default)]
    pub loc: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Adapter for ipinfo.io lookups.
///
/// The `ipinfo_token` valve is optional: unauthenticated lookups work at a
/// lower rate limit, so an empty token is not a misconfiguration.
#[derive(Clone)]
pub struct IpInfoApi {
    http: HttpAdapter,
    valves: Arc<Valves>,
}

impl IpInfoApi {
    pub fn new(http: HttpAdapter, valves: Arc<Valves>) -> Self {
        Self { http, valves }
    }

    /// Look up an address, or the caller's own address when `ip` is `None`.
    pub async fn lookup(&self, ip: Option<&str>) -> Result<IpInfo, ToolError> {
        let url = match ip {
            Some(ip) => {
                let parsed: IpAddr = ip.parse().map_err(|_| ToolError::InvalidParameter {
                    name: "ip".to_string(),
                    reason: format!("'{ip}' is not a valid IP address"),
                })?;
                format!("{}/{}/json", IPINFO_ENDPOINT, parsed)
            }
            None => format!("{}/json", IPINFO_ENDPOINT),
        };

        let token = self.valves.ipinfo_token.as_str();
        let bearer = (!token.is_empty()).then_some(token);

        debug!("Looking up geolocation");
        let value = self.http.get_json(&url, bearer).await?;
        serde_json::from_value(value)
            .map_err(|e| ToolError::Transport(format!("Unexpected response from ipinfo.io: {e}")))
    }
}

/// Render a geolocation record for the conversation.
pub fn format_ip_info(info: &IpInfo) -> String {
    let mut lines = Vec::new();

    if let Some(ip) = &info.ip {
        lines.push(format!("IP: {ip}"));
    }

    let place: Vec<&str> = [&info.city, &info.region, &info.country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    if !place.is_empty() {
        lines.push(format!("Location: {}", place.join(", ")));
    }

    if let Some(loc) = &info.loc {
        lines.push(format!("Coordinates: {loc}"));
    }
    if let Some(timezone) = &info.timezone {
        lines.push(format!("Timezone: {timezone}"));
    }

    if lines.is_empty() {
        "No location data available".to_string()
    } else {
        lines.join("\n")
    }
}

/// Resolves IP-based geolocation and timezone.
///
/// # Parameters
///
/// - `ip` (optional): Address to look up; defaults to the caller's own.
pub struct LocateIp {
    api: IpInfoApi,
}

impl LocateIp {
    pub fn new(valves: Arc<Valves>, http: HttpAdapter) -> Self {
        Self {
            api: IpInfoApi::new(http, valves),
        }
    }
}

#[async_trait]
impl Tool for LocateIp {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "get_location",
            "Resolves the city, region, country, coordinates, and timezone for an IP address.",
        )
        .optional_param(
            "ip",
            ParamType::String,
            "IP address to look up; omit for the caller's own address",
        )
    }

    async fn call(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let info = self.api.lookup(args.get_str("ip")).await?;
        let data = serde_json::to_value(&info).unwrap_or(Value::Null);
        Ok(ToolOutput::structured(format_ip_info(&info), data))
    }
}
