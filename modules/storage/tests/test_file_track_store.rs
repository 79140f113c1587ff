// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::coordinate::Coordinate;
use common::test_helper::course::loop_course;
use common::track::TrackError;
use std::io::Write;
use storage::{FileTrackStore, StoreError};
mod helper;
use helper::setup_empty_test_folder;

#[tokio::test]
async fn missing_track_file_is_an_empty_track() {
    let folder = setup_empty_test_folder("missing_track_file_is_an_empty_track");
    let store = FileTrackStore::new(&folder).unwrap();

    let track = store.load().await.unwrap();

    assert!(track.is_empty());
    assert!(folder.exists());
}

#[tokio::test]
async fn batches_are_appended_in_order() {
    let folder = setup_empty_test_folder("batches_are_appended_in_order");
    let store = FileTrackStore::new(&folder).unwrap();
    let course = loop_course();

    store.append(&course[..5]).await.unwrap();
    store.append(&course[5..]).await.unwrap();

    let track = store.load().await.unwrap();
    assert_eq!(track.fixes(), course.as_slice());
}

#[tokio::test]
async fn stored_track_survives_a_new_store() {
    let folder = setup_empty_test_folder("stored_track_survives_a_new_store");
    let course = loop_course();
    FileTrackStore::new(&folder)
        .unwrap()
        .append(&course[..3])
        .await
        .unwrap();

    let track = FileTrackStore::new(&folder).unwrap().load().await.unwrap();

    assert_eq!(track.len(), 3);
    assert_eq!(track.start_point(), course.first());
}

#[tokio::test]
async fn clear_removes_all_fixes() {
    let folder = setup_empty_test_folder("clear_removes_all_fixes");
    let store = FileTrackStore::new(&folder).unwrap();
    store.append(&loop_course()).await.unwrap();

    store.clear().await.unwrap();

    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn report_line_of_invalid_record() {
    let folder = setup_empty_test_folder("report_line_of_invalid_record");
    let store = FileTrackStore::new(&folder).unwrap();
    store.append(&loop_course()[..2]).await.unwrap();
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(store.file_path())
        .unwrap();
    file.write_all(b"{\"coordinate\": 12}\n").unwrap();

    let result = store.load().await;

    assert!(matches!(result, Err(StoreError::InvalidRecord { line: 3, .. })));
}

#[tokio::test]
async fn non_finite_batch_is_not_written() {
    let folder = setup_empty_test_folder("non_finite_batch_is_not_written");
    let store = FileTrackStore::new(&folder).unwrap();
    let course = loop_course();
    store.append(&course[..2]).await.unwrap();
    let mut batch = course[2..5].to_vec();
    batch[1].coordinate = Coordinate::new(f64::NAN, batch[1].longitude());

    let result = store.append(&batch).await;

    assert!(matches!(
        result,
        Err(StoreError::InvalidBatch(TrackError::NonFiniteCoordinate { index: 1 }))
    ));
    let track = store.load().await.unwrap();
    assert_eq!(track.fixes(), &course[..2]);
}
