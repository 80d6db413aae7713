//! Integration tests for hapticd
//!
//! These tests verify the end-to-end behavior of the service stack:
//! config -> device -> gate -> session manager.

use haptic_api::{
    ContinuousEventOptions, EffectDescriptor, FileHandle, UsageClass, VibratorPatternBuilder,
};
use haptic_config::{ServiceConfig, load_config, parse_config};
use haptic_core::{
    AllowAll, CallerContext, EndReason, VibrationEvent, VibrationManager,
};
use haptic_device::{MockVibrator, VibratorDevice};
use haptic_util::{DEVICE_OPERATION_FAILED, IS_NOT_SUPPORTED, PARAMETER_ERROR};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

fn caller() -> CallerContext {
    CallerContext::new("com.example.app", 1000, 42)
}

fn stack_from(config: ServiceConfig) -> Arc<VibrationManager> {
    let device: Arc<dyn VibratorDevice> = Arc::new(
        MockVibrator::new()
            .with_capabilities(config.device.capabilities.clone())
            .with_supported_effects(config.device.presets.iter().cloned()),
    );
    Arc::new(VibrationManager::new(
        device,
        Arc::new(AllowAll),
        config.limits,
    ))
}

fn default_stack() -> Arc<VibrationManager> {
    stack_from(ServiceConfig::default())
}

#[tokio::test]
async fn timed_vibration_lifecycle() {
    let manager = default_stack();
    let mut events = manager.subscribe();

    let id = manager
        .start(
            EffectDescriptor::Time { duration: 10 },
            UsageClass::Notification,
            &caller(),
        )
        .await
        .unwrap();

    let snapshot = manager.current().await.unwrap();
    assert_eq!(snapshot.session_id, id);
    assert_eq!(snapshot.usage, UsageClass::Notification);
    assert!(!snapshot.looping);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!manager.is_active().await);

    assert!(matches!(
        events.recv().await,
        Some(VibrationEvent::Started { .. })
    ));
    assert!(matches!(
        events.recv().await,
        Some(VibrationEvent::Ended { reason: EndReason::Completed, .. })
    ));
}

#[tokio::test]
async fn pattern_built_through_builder_plays() {
    let manager = default_stack();

    let mut builder = VibratorPatternBuilder::new();
    builder
        .add_continuous_event(
            0,
            80,
            Some(ContinuousEventOptions {
                intensity: Some(60),
                frequency: Some(40),
                ..Default::default()
            }),
        )
        .unwrap()
        .add_transient_event(100, None)
        .unwrap();
    let pattern = builder.build().unwrap();

    let id = manager
        .start(
            EffectDescriptor::Pattern(pattern),
            UsageClass::Media,
            &caller(),
        )
        .await
        .unwrap();

    assert_eq!(manager.current().await.unwrap().session_id, id);
    manager.stop().await.unwrap();
    assert!(!manager.is_active().await);
}

#[tokio::test]
async fn file_descriptor_refused_without_hd_haptic() {
    // Scenario: a device whose firmware lacks HD haptic support
    let config = parse_config(
        r#"
        config_version = 1

        [device]
        hd_haptic = false
    "#,
    )
    .unwrap();
    let manager = stack_from(config);

    let err = manager
        .start(
            EffectDescriptor::File(FileHandle::new(7)),
            UsageClass::Media,
            &caller(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), IS_NOT_SUPPORTED);
    assert!(!manager.is_active().await);

    // The same device still drives a plain timed buzz
    manager
        .start(
            EffectDescriptor::Time { duration: 5_000 },
            UsageClass::Media,
            &caller(),
        )
        .await
        .unwrap();
    manager.stop().await.unwrap();
}

#[tokio::test]
async fn alarm_outranks_game_buzz() {
    // Scenario: a game buzz is superseded by an alarm, and the reverse
    // request is refused while the alarm plays.
    let manager = default_stack();

    let game_id = manager
        .start(
            EffectDescriptor::Time { duration: 5_000 },
            UsageClass::Media,
            &caller(),
        )
        .await
        .unwrap();

    let alarm_id = manager
        .start(
            EffectDescriptor::Time { duration: 5_000 },
            UsageClass::Alarm,
            &caller(),
        )
        .await
        .unwrap();
    assert_ne!(game_id, alarm_id);
    assert_eq!(manager.current().await.unwrap().usage, UsageClass::Alarm);

    let err = manager
        .start(
            EffectDescriptor::Time { duration: 5_000 },
            UsageClass::Media,
            &caller(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), IS_NOT_SUPPORTED);
    assert_eq!(manager.current().await.unwrap().session_id, alarm_id);
}

#[tokio::test]
async fn preset_from_config_plays_and_unknown_is_refused() {
    let config = parse_config(
        r#"
        config_version = 1

        [device]
        presets = ["haptic.clock.timer"]
    "#,
    )
    .unwrap();
    let manager = stack_from(config);

    manager
        .start(
            EffectDescriptor::Preset {
                effect_id: "haptic.clock.timer".into(),
                count: 1,
            },
            UsageClass::Notification,
            &caller(),
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!manager.is_active().await);

    let err = manager
        .start(
            EffectDescriptor::Preset {
                effect_id: "haptic.unknown".into(),
                count: 1,
            },
            UsageClass::Notification,
            &caller(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), IS_NOT_SUPPORTED);
}

#[tokio::test]
async fn config_limits_tighten_validation() {
    let config = parse_config(
        r#"
        config_version = 1

        [limits]
        time_duration_max = 1000
    "#,
    )
    .unwrap();
    let manager = stack_from(config);

    let err = manager
        .start(
            EffectDescriptor::Time { duration: 1_001 },
            UsageClass::Touch,
            &caller(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), PARAMETER_ERROR);

    manager
        .start(
            EffectDescriptor::Time { duration: 1_000 },
            UsageClass::Touch,
            &caller(),
        )
        .await
        .unwrap();
    manager.stop().await.unwrap();
}

#[tokio::test]
async fn stop_from_idle_is_silent() {
    let manager = default_stack();
    manager.stop().await.unwrap();
    manager.stop().await.unwrap();
}

#[tokio::test]
async fn descriptor_type_mismatch_rejected_at_parse() {
    // A duration given as a string never reaches the gate
    let result: Result<EffectDescriptor, _> =
        serde_json::from_str(r#"{"type": "time", "duration": "500"}"#);
    assert!(result.is_err());
}

#[tokio::test]
async fn playback_failure_surfaces_as_device_error() {
    let device = Arc::new(MockVibrator::new());
    *device.fail_play.lock().unwrap() = true;

    let manager = Arc::new(VibrationManager::new(
        device,
        Arc::new(AllowAll),
        haptic_api::Limits::default(),
    ));
    let mut events = manager.subscribe();

    manager
        .start(
            EffectDescriptor::Time { duration: 100 },
            UsageClass::Touch,
            &caller(),
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!manager.is_active().await);

    assert!(matches!(
        events.recv().await,
        Some(VibrationEvent::Started { .. })
    ));
    match events.recv().await {
        Some(VibrationEvent::Ended { reason, .. }) => {
            assert_eq!(reason, EndReason::DeviceError);
        }
        other => panic!("expected Ended event, got {other:?}"),
    }
}

#[tokio::test]
async fn stop_failure_maps_to_device_operation_failed() {
    let device = Arc::new(MockVibrator::new());
    let manager = Arc::new(VibrationManager::new(
        device.clone(),
        Arc::new(AllowAll),
        haptic_api::Limits::default(),
    ));

    manager
        .start(
            EffectDescriptor::Time { duration: 5_000 },
            UsageClass::Touch,
            &caller(),
        )
        .await
        .unwrap();

    *device.fail_stop.lock().unwrap() = true;
    let err = manager.stop().await.unwrap_err();
    assert_eq!(err.code(), DEVICE_OPERATION_FAILED);
}

#[tokio::test]
async fn config_file_drives_the_stack() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        config_version = 1

        [device]
        hd_haptic = false
        presets = ["haptic.default.effect"]
    "#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let manager = stack_from(config);

    manager
        .start(
            EffectDescriptor::Preset {
                effect_id: "haptic.default.effect".into(),
                count: 1,
            },
            UsageClass::Ring,
            &caller(),
        )
        .await
        .unwrap();
    manager.stop().await.unwrap();
}
