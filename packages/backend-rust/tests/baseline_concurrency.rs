use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use voice_screening_backend::services::BaselineTracker;

mod common;

use common::{body_json, create_test_app, get, post_json, send};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_samples_are_all_counted() {
    let app = create_test_app();
    let requests = 64;

    let handles: Vec<_> = (0..requests)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                send(app, post_json("/api/baseline/shared/samples", json!({}))).await.status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let body = body_json(send(app, get("/api/baseline/shared")).await).await;
    assert_eq!(body["data"]["samples_collected"], requests);
    assert_eq!(body["data"]["today_samples"], requests);
    assert_eq!(body["data"]["baseline_established"], true);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_subjects_stay_isolated() {
    let tracker = Arc::new(BaselineTracker::new(5, 10));
    let subjects = ["a", "b", "c", "d"];

    let handles: Vec<_> = subjects
        .iter()
        .enumerate()
        .flat_map(|(i, subject)| {
            let tracker = Arc::clone(&tracker);
            let subject = subject.to_string();
            (0..=i).map(move |_| {
                let tracker = Arc::clone(&tracker);
                let subject = subject.clone();
                tokio::task::spawn_blocking(move || tracker.record_sample(&subject))
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    for (i, subject) in subjects.iter().enumerate() {
        let progress = tracker.get_progress(subject);
        assert_eq!(progress.samples_collected, (i + 1) as u32);
        assert_eq!(progress.samples_remaining, 5 - (i + 1) as u32);
    }
    assert_eq!(tracker.subject_count(), subjects.len());
}
