//! Address geocoding for the route planner
//!
//! Resolves free-text addresses to a canonical address string plus
//! coordinates using either the
//! [ArcGIS World Geocoding Service](https://geocode.arcgis.com) or
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern. [`GeocodingClient`] defines the
//! interface, implemented by [`ArcGisGeocodingClient`] and
//! [`NominatimGeocodingClient`]. Both cache results in memory so repeated
//! lookups of the same stop do not hit the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{ArcGisConfig, ArcGisGeocodingClient, GeocodingClient};
//!
//! let client = ArcGisGeocodingClient::new(&ArcGisConfig::default())?;
//! let place = client.geocode("100 Main St, Raleigh, North Carolina").await?;
//! println!("{} at {}", place.address, place.location);
//! ```

mod arcgis;
mod cache;
mod client;
mod config;
mod error;
mod nominatim;

pub use arcgis::ArcGisGeocodingClient;
pub use client::{GeocodedLocation, GeocodingClient};
pub use config::{ArcGisConfig, NominatimConfig};
pub use error::GeocodingError;
pub use nominatim::NominatimGeocodingClient;
