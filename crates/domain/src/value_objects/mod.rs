//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod green_impact;
mod progress;
mod waypoint;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use green_impact::{GreenImpact, KG_CO2_PER_MILE, RewardTier};
pub use progress::Progress;
pub use waypoint::{CURRENT_LOCATION_LABEL, CURRENT_LOCATION_SENTINEL, Waypoint};
