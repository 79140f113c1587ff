// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::coordinate::GpsFix;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("fix {index} of the batch has a non finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

/// The recorded path of a course session.
///
/// A track is append-only while a session is tracking and is only emptied by
/// [`Track::clear`]. Fixes are kept in arrival order, which is not necessarily
/// timestamp order because providers deliver fixes in batches. The first fix
/// is the start point of the course.
///
/// # Example
///
/// ```rust
/// use common::{coordinate::{Coordinate, GpsFix}, track::Track};
///
/// let mut track = Track::default();
/// let fix = GpsFix::new(Coordinate::new(30.1325735, -97.6408249), None, None, chrono::Utc::now());
/// track.append_batch(&[fix]).unwrap();
/// assert_eq!(track.start_point(), Some(&fix));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    fixes: Vec<GpsFix>,
}

impl Track {
    /// Appends a batch of fixes in the given order.
    ///
    /// The batch is applied as a whole: if any fix has a non finite
    /// coordinate nothing is appended.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` – The number of appended fixes.
    /// * `Err(TrackError::NonFiniteCoordinate)` – The index of the first invalid fix in the batch.
    pub fn append_batch(&mut self, fixes: &[GpsFix]) -> Result<usize, TrackError> {
        Track::check_batch(fixes)?;
        self.fixes.extend_from_slice(fixes);
        Ok(fixes.len())
    }

    /// Checks that every fix of the batch can be recorded.
    pub fn check_batch(fixes: &[GpsFix]) -> Result<(), TrackError> {
        match fixes.iter().position(|fix| !fix.coordinate.is_finite()) {
            Some(index) => Err(TrackError::NonFiniteCoordinate { index }),
            None => Ok(()),
        }
    }

    /// Removes every recorded fix.
    pub fn clear(&mut self) {
        self.fixes.clear();
    }

    /// The declared start point of the course, the first recorded fix.
    pub fn start_point(&self) -> Option<&GpsFix> {
        self.fixes.first()
    }

    pub fn latest(&self) -> Option<&GpsFix> {
        self.fixes.last()
    }

    pub fn fixes(&self) -> &[GpsFix] {
        &self.fixes
    }

    /// Returns a copy of the recorded fixes that can be shared with readers
    /// while the session keeps appending.
    pub fn snapshot(&self) -> Arc<[GpsFix]> {
        Arc::from(self.fixes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Creates a `Track` instance by deserializing it from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<Vec<GpsFix>> for Track {
    fn from(fixes: Vec<GpsFix>) -> Self {
        Track { fixes }
    }
}
