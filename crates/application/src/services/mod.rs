//! Application services - Use case implementations

mod ingestion;
mod navigation_link;
mod trip_planner_service;

pub use ingestion::{ADDRESS_COLUMN, IngestionReport, ingest_recognized_text, ingest_spreadsheet};
pub use navigation_link::{DEFAULT_MAPS_BASE_URL, NavigationLinkBuilder};
pub use trip_planner_service::{TripPlannerService, TwoPointRoute};
