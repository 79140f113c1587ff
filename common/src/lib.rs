// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Common Modul for the course recorder
//!
//! Provides the common data types that are used across every modul.

pub mod config;
pub mod coordinate;
pub mod geofence;
pub mod serde;
pub mod status;
pub mod summary;
pub mod test_helper;
pub mod track;
