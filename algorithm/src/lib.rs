// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Geofence and course completion algorithms.
//!
//! Every function in this crate is pure: it only reads the fixes it is given
//! and can be called from any thread holding a snapshot of a track.

pub mod direction;
pub mod finish_line;
pub mod geo_math;
pub mod geofence;
pub mod prediction;
pub mod summary;

pub use direction::is_heading_consistent;
pub use finish_line::{CrossingParams, find_crossing, has_crossed_finish_line, is_approaching};
pub use geo_math::{bearing, destination, distance};
pub use geofence::{contains, contains_radial, is_inside};
pub use prediction::predict;
pub use summary::summarize;

#[cfg(test)]
mod tests;
