// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::LocationError;
use chrono::{DateTime, Utc};
use common::coordinate::{Coordinate, GpsFix};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One line of a recorded course.
///
/// Empty or negative heading and speed columns mean the sensor could not
/// provide the value.
#[derive(Debug, Deserialize)]
struct RecordedFix {
    latitude: f64,
    longitude: f64,
    heading: Option<f64>,
    speed: Option<f64>,
    timestamp: DateTime<Utc>,
}

impl From<RecordedFix> for GpsFix {
    fn from(record: RecordedFix) -> Self {
        GpsFix::from_raw(
            Coordinate::new(record.latitude, record.longitude),
            record.heading.unwrap_or(-1.0),
            record.speed.unwrap_or(-1.0),
            record.timestamp,
        )
    }
}

/// Reads a recorded course from a CSV file.
///
/// The file needs the header `latitude,longitude,heading,speed,timestamp`,
/// timestamps are RFC 3339.
pub fn read_recording(path: &Path) -> Result<Vec<GpsFix>, LocationError> {
    let file = std::fs::File::open(path)?;
    let fixes = parse_recording(file)?;
    debug!("Read {} fixes from {}", fixes.len(), path.to_string_lossy());
    Ok(fixes)
}

/// Parses a recorded course in CSV format, see [`read_recording`].
pub fn parse_recording<R: Read>(reader: R) -> Result<Vec<GpsFix>, LocationError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut fixes = Vec::new();
    for result in rdr.deserialize::<RecordedFix>() {
        let record = result.map_err(|e| LocationError::InvalidRecord {
            line: e.position().map_or(0, |position| position.line()),
            reason: e.to_string(),
        })?;
        fixes.push(GpsFix::from(record));
    }
    Ok(fixes)
}
