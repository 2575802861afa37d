//! Engine client tests against a live Docker daemon.
//!
//! These are ignored by default; run them with `cargo test -- --ignored` on a
//! machine with a reachable daemon.

use playlutris::{Engine, EngineError};

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_missing_volume_is_fatal_when_creation_disabled() {
    let engine = Engine::connect().await.expect("daemon reachable");
    let err = engine
        .resolve_volume("playlutris-test-absent-volume", false)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::VolumeNotFound { .. }));
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_missing_volume_is_created_when_creation_enabled() {
    let engine = Engine::connect().await.expect("daemon reachable");
    let name = "playlutris-test-created-volume";
    let resolved = engine.resolve_volume(name, true).await.expect("created");
    assert_eq!(resolved, name);

    // Second resolution finds the volume without creating it again
    let resolved = engine.resolve_volume(name, false).await.expect("exists");
    assert_eq!(resolved, name);
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_missing_image_maps_to_image_not_found() {
    let engine = Engine::connect().await.expect("daemon reachable");
    let err = engine
        .resolve_image("playlutris-test-absent-image")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ImageNotFound { .. }));
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_kill_on_missing_container_is_gone() {
    let engine = Engine::connect().await.expect("daemon reachable");
    let err = engine
        .kill("playlutris-test-absent-container")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Gone { .. }));
}
