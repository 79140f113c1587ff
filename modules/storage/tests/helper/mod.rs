// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use module_core::{EventBus, Module};
use std::{fs::remove_dir_all, path::PathBuf};
use storage::{FileTrackStore, TrackStorage};

/// Test folder of the given name below the temp directory.
pub fn get_path(test_folder_name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("office-marathon");
    path.push(test_folder_name);
    path
}

/// Removes leftovers of a previous run and returns the test folder.
pub fn setup_empty_test_folder(test_folder_name: &str) -> PathBuf {
    let path = get_path(test_folder_name);
    if path.exists() {
        remove_dir_all(&path)
            .unwrap_or_else(|e| panic!("Failed to remove test folder {path:?}. Error: {e}"));
    }
    path
}

pub fn create_storage_module(
    test_folder_name: &str,
    event_bus: &EventBus,
) -> tokio::task::JoinHandle<Result<(), ()>> {
    let store = FileTrackStore::new(&get_path(test_folder_name)).unwrap();
    let mut storage = TrackStorage::new(store, event_bus.context());
    tokio::spawn(async move { storage.run().await })
}
