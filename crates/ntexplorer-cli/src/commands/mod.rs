pub mod config;
pub mod parse;
pub mod prompt;
pub mod questions;
pub mod quiz;

use clap::Args;
use ntexplorer_core::geo::{first_available, FixedLocation, LocationSource, NoLocation};
use ntexplorer_core::{Config, GeoLocation};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// `--lat/--lon` flags shared by commands that build a request.
#[derive(Args, Debug, Clone, Copy)]
pub struct LocationArgs {
    /// Latitude for map grounding (overrides config)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,
    /// Longitude for map grounding (overrides config)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl LocationArgs {
    /// Flags first, then the `[location]` config section.
    pub fn resolve(&self, config: &Config) -> Option<GeoLocation> {
        let flags: Box<dyn LocationSource> = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Box::new(FixedLocation(GeoLocation::new(lat, lon))),
            _ => Box::new(NoLocation),
        };
        let configured: Box<dyn LocationSource> = match config.location.location() {
            Some(location) => Box::new(FixedLocation(location)),
            None => Box::new(NoLocation),
        };
        first_available(&[flags.as_ref(), configured.as_ref()])
    }
}
