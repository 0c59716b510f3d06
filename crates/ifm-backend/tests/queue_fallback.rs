use std::f64::consts::PI;

use ifm_backend::{select_backend, BackendConfig, BackendSelection, QueuedSampler};
use ifm_core::Sampler;

#[test]
fn unknown_device_fails_to_connect() {
    let err = QueuedSampler::connect("nonexistent", 1).unwrap_err();
    assert_eq!(err.info().code, "unknown-device");
}

#[test]
fn queued_runs_are_reproducible_per_device_and_seed() {
    let angle = PI / 310.0;
    let mut sampler_a = QueuedSampler::connect("emu-1", 9).unwrap();
    let mut sampler_b = QueuedSampler::connect("emu-1", 9).unwrap();

    for _ in 0..20 {
        assert_eq!(
            sampler_a.run_sequence(angle, 30).unwrap(),
            sampler_b.run_sequence(angle, 30).unwrap()
        );
    }
    assert_eq!(
        sampler_a.run_single(angle * 30.0).unwrap(),
        sampler_b.run_single(angle * 30.0).unwrap()
    );
}

#[test]
fn jobs_after_shutdown_report_dead_worker() {
    let mut sampler = QueuedSampler::connect("emu-2", 4).unwrap();
    sampler.run_single(0.5).unwrap();
    sampler.shutdown();
    let err = sampler.run_single(0.5).unwrap_err();
    assert_eq!(err.info().code, "worker-gone");
}

#[test]
fn selection_prefers_requested_backend() {
    let (_, selection) = select_backend(&BackendConfig::Local, 3);
    assert_eq!(selection, BackendSelection::Local);

    let (_, selection) = select_backend(
        &BackendConfig::Queued {
            device: Some("emu-1".into()),
        },
        3,
    );
    assert_eq!(
        selection,
        BackendSelection::Queued {
            device: "emu-1".into()
        }
    );
}

#[test]
fn unreachable_device_falls_back_to_local() {
    let (mut sampler, selection) = select_backend(
        &BackendConfig::Queued {
            device: Some("offline-device".into()),
        },
        3,
    );
    match selection {
        BackendSelection::FallbackLocal { device, .. } => assert_eq!(device, "offline-device"),
        other => panic!("expected fallback, got {other:?}"),
    }
    // The substituted sampler is fully usable.
    let bits = sampler.run_sequence(PI / 310.0, 5).unwrap();
    assert_eq!(bits.len(), 5);
}
