//! Best-effort device location.
//!
//! A location only adds a grounding hint to the request. Not having one is
//! never an error.

use crate::recommend::GeoLocation;

pub trait LocationSource {
    /// Current position, or `None` if unknown or not permitted.
    fn locate(&self) -> Option<GeoLocation>;
}

/// No location available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationSource for NoLocation {
    fn locate(&self) -> Option<GeoLocation> {
        None
    }
}

/// A position supplied up front, from config or command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoLocation);

impl LocationSource for FixedLocation {
    fn locate(&self) -> Option<GeoLocation> {
        if self.0.is_valid() {
            Some(self.0)
        } else {
            tracing::warn!(
                latitude = self.0.latitude,
                longitude = self.0.longitude,
                "ignoring out-of-range location"
            );
            None
        }
    }
}

/// Pick the first source that yields a position.
pub fn first_available(sources: &[&dyn LocationSource]) -> Option<GeoLocation> {
    sources.iter().find_map(|source| source.locate())
}
