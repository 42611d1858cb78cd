//! Plain-text rendering of trip state and routes

use std::fmt::Write;

use application::{IngestionReport, NavigationLinkBuilder, TwoPointRoute};
use domain::TripState;
use domain::value_objects::Waypoint;

/// Multi-line overview of the trip: ends, numbered stops, progress
pub fn plan(trip: &TripState) -> String {
    let mut out = String::new();

    let start = trip.start().map_or("(not set)", Waypoint::address);
    let end = trip.end().map_or("(not set)", Waypoint::address);
    let _ = writeln!(out, "📍 Start: {start}");

    if trip.stops().is_empty() {
        let _ = writeln!(out, "   No stops yet");
    }
    for (i, stop) in trip.stops().iter().enumerate() {
        let mark = if trip.is_completed(stop.address()) {
            "✅"
        } else {
            "⬜"
        };
        let _ = writeln!(out, "   {:>2}. {mark} {}", i + 1, stop.address());
    }

    let _ = writeln!(out, "🏁 End: {end}");
    let _ = write!(out, "📊 {}", trip.progress());
    out
}

/// Progress line with a percentage
pub fn progress(trip: &TripState) -> String {
    let progress = trip.progress();
    format!("{progress} ({:.0}%)", progress.percent_complete())
}

/// Distance, impact and directions for a point-to-point route
pub fn route(route: &TwoPointRoute, links: &NavigationLinkBuilder) -> String {
    let center = route.center();
    format!(
        "🚩 {}\n🏁 {}\n📏 Distance: {:.2} miles\n🗺️ Map center: {center}\n🌱 {}\n🔗 {}",
        route.origin.address,
        route.destination.address,
        route.miles,
        route.impact(),
        route.navigation_link(links)
    )
}

/// One-line summary of a spreadsheet import
pub fn ingestion(report: &IngestionReport) -> String {
    format!(
        "📥 Imported {} of {} rows ({} duplicate, {} blank)",
        report.added, report.rows, report.duplicates, report.blank
    )
}

#[cfg(test)]
mod tests {
    use application::ports::GeocodedPlace;
    use domain::value_objects::GeoLocation;

    use super::*;

    #[test]
    fn plan_lists_numbered_stops_with_marks() {
        let mut trip = TripState::new();
        trip.set_start("My Location");
        trip.add_stop("100 Main St").unwrap();
        trip.add_stop("300 Elm St").unwrap();
        trip.toggle_complete("100 Main St", true);

        let text = plan(&trip);
        assert!(text.contains("Start: My Location"));
        assert!(text.contains(" 1. ✅ 100 Main St"));
        assert!(text.contains(" 2. ⬜ 300 Elm St"));
        assert!(text.contains("End: (not set)"));
        assert!(text.ends_with("1/2 stops done, 1 remaining"));
    }

    #[test]
    fn plan_for_empty_trip() {
        let text = plan(&TripState::new());
        assert!(text.contains("No stops yet"));
    }

    #[test]
    fn progress_includes_percentage() {
        let mut trip = TripState::new();
        trip.add_stop("A St").unwrap();
        trip.add_stop("B St").unwrap();
        trip.toggle_complete("A St", true);
        assert!(progress(&trip).ends_with("(50%)"));
    }

    #[test]
    fn route_report_contains_distance_and_link() {
        let route = TwoPointRoute {
            origin: GeocodedPlace {
                address: "Raleigh".to_string(),
                location: GeoLocation::new(35.7796, -78.6382).unwrap(),
            },
            destination: GeocodedPlace {
                address: "Durham".to_string(),
                location: GeoLocation::new(35.994, -78.8986).unwrap(),
            },
            miles: 20.5,
        };

        let text = super::route(&route, &NavigationLinkBuilder::default());
        assert!(text.contains("Distance: 20.50 miles"));
        assert!(text.contains("CO2 Avoided: 8.28 kg"));
        assert!(text.contains("origin=Raleigh&destination=Durham"));
    }

    #[test]
    fn ingestion_summary() {
        let report = IngestionReport {
            rows: 5,
            added: 3,
            duplicates: 1,
            blank: 1,
        };
        assert_eq!(
            ingestion(&report),
            "📥 Imported 3 of 5 rows (1 duplicate, 1 blank)"
        );
    }
}
