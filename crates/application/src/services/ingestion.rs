//! Bulk stop ingestion
//!
//! Spreadsheet exports (CSV with an `Address` column) and text recognized
//! from a photo of a delivery manifest both end up here.

use std::io::Read;

use domain::TripState;
use domain::value_objects::Waypoint;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;

/// Header of the column holding stop addresses
pub const ADDRESS_COLUMN: &str = "Address";

/// Outcome of a spreadsheet import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestionReport {
    /// Data rows read (header excluded)
    pub rows: usize,
    /// Stops appended to the trip
    pub added: usize,
    /// Rows whose address was already a stop
    pub duplicates: usize,
    /// Rows with an empty or missing-value cell
    pub blank: usize,
}

/// Append every address from a CSV export to the trip
///
/// The header row must contain a column named exactly `Address`; other
/// columns are ignored. Cells are trimmed, missing-value markers skipped and
/// exact duplicates counted rather than rejected. Blank stops already in the
/// trip are cleaned up afterwards.
///
/// # Errors
///
/// `IngestionFormat` when the header lacks the address column or the CSV is
/// malformed. Nothing is added in either case.
#[instrument(skip(reader, trip))]
pub fn ingest_spreadsheet<R: Read>(
    reader: R,
    trip: &mut TripState,
) -> Result<IngestionReport, ApplicationError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let column = csv
        .headers()?
        .iter()
        .position(|h| h == ADDRESS_COLUMN)
        .ok_or_else(|| {
            ApplicationError::IngestionFormat(format!("no '{ADDRESS_COLUMN}' column in header"))
        })?;

    let mut report = IngestionReport::default();
    let mut addresses = Vec::new();
    for record in csv.records() {
        let record = record?;
        report.rows += 1;

        let waypoint = Waypoint::new(record.get(column).unwrap_or_default());
        if waypoint.is_blank() {
            report.blank += 1;
        } else {
            addresses.push(waypoint);
        }
    }

    let before = trip.stops().len();
    report.duplicates = trip.extend_raw(addresses.iter().map(Waypoint::address));
    trip.remove_blank();
    report.added = trip.stops().len().saturating_sub(before);

    if report.blank > 0 {
        debug!(blank = report.blank, "Skipped empty address cells");
    }
    info!(
        rows = report.rows,
        added = report.added,
        duplicates = report.duplicates,
        "Spreadsheet imported"
    );
    Ok(report)
}

/// Offer text recognized from an image as a single raw stop
///
/// No structured parsing happens; the trimmed text is the address.
///
/// # Errors
///
/// `Domain(BlankAddress)` for empty text, `Domain(DuplicateStop)` when the
/// text is already a stop.
pub fn ingest_recognized_text(
    text: &str,
    trip: &mut TripState,
) -> Result<Waypoint, ApplicationError> {
    let waypoint = Waypoint::new(text);
    if let Err(e) = trip.add_waypoint(waypoint.clone()) {
        warn!(error = %e, "Recognized text not added");
        return Err(e.into());
    }
    Ok(waypoint)
}
