//! Built-in tool implementations.

mod calculator;
mod clock;
mod geoip;
mod lights;

pub use calculator::Calculator;
pub use clock::{format_current_time, CurrentTime, ZoneTimeApi};
pub use geoip::{format_ip_info, IpInfo, IpInfoApi, LocateIp};
pub use lights::{
    parse_lights, render_lights, resolve_entity, LightState, LightsApi, ListLights, TurnOffLight,
    TurnOnLight,
};
