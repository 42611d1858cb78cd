//! Domain entities - Objects with identity and lifecycle

mod trip_state;

pub use trip_state::TripState;
