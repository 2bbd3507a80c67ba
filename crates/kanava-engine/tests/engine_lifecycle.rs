#![forbid(unsafe_code)]

mod fixture;

use fixture::{drain, rig, settle};
use kanava_core::{ChannelId, QualityLevel, StreamKind};
use kanava_events::{EngineEvent, Event, MediaEvent};
use kanava_platform::{MediaElement, MediaError, PipHost};
use kanava_test_utils::test_channel;

fn manifest_parsed(live: bool) -> Event {
    Event::Engine(EngineEvent::ManifestParsed {
        live,
        levels: vec![
            QualityLevel::new(0, 480, 1_280_000),
            QualityLevel::new(1, 720, 2_560_000),
        ],
    })
}

#[tokio::test]
async fn load_then_unload_leaves_no_dangling_session() {
    let rig = rig();
    let channel = test_channel("alpha", StreamKind::Hls);

    rig.engine.load(&channel).await.unwrap();
    assert_eq!(rig.factory.live_sessions(), 1);
    assert!(rig.engine.has_session());

    assert!(rig.engine.unload());
    assert_eq!(rig.factory.live_sessions(), 0);
    assert!(!rig.engine.has_session());
    assert_eq!(rig.element.source(), None);
    assert_eq!(rig.element.reload_calls(), 1);
}

#[tokio::test]
async fn superseding_load_detaches_the_previous_session_first() {
    let rig = rig();

    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine
        .load(&test_channel("beta", StreamKind::Hls))
        .await
        .unwrap();

    let created = rig.factory.created();
    assert_eq!(created.len(), 2);
    assert!(created[0].is_destroyed());
    assert!(!created[1].is_destroyed());
    assert_eq!(rig.factory.live_sessions(), 1);
    assert_eq!(
        rig.engine.session_channel(),
        Some(ChannelId::new("beta"))
    );
}

#[tokio::test]
async fn unload_is_deferred_while_the_element_is_the_pip_target() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.pip.request().await.unwrap();

    assert!(!rig.engine.unload());
    assert_eq!(rig.factory.live_sessions(), 1);
    assert!(rig.engine.has_session());

    rig.pip.exit().await.unwrap();
    assert!(rig.engine.unload());
    assert_eq!(rig.factory.live_sessions(), 0);
}

#[tokio::test]
async fn mp4_load_sets_the_source_and_attempts_autoplay() {
    let rig = rig();
    let channel = test_channel("beta", StreamKind::Mp4);

    rig.engine.load(&channel).await.unwrap();

    assert_eq!(rig.element.source().as_deref(), Some(channel.stream_url.as_str()));
    assert_eq!(rig.element.play_calls(), 1);
    assert!(!rig.element.paused());
    assert_eq!(rig.factory.created().len(), 0);
}

#[tokio::test]
async fn adaptive_load_defers_autoplay_until_the_manifest_parses() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    assert_eq!(rig.element.play_calls(), 0);
    assert_eq!(rig.factory.created()[0].start_load_calls(), 1);

    rig.engine.dispatch(&manifest_parsed(true)).await;
    assert_eq!(rig.element.play_calls(), 1);
    assert!(rig.engine.is_live());
    assert_eq!(rig.engine.quality_levels().len(), 2);
}

#[tokio::test]
async fn hls_falls_back_to_native_playback_when_adaptive_is_unavailable() {
    let rig = rig();
    rig.factory.set_supported(false);
    rig.element.set_native_hls(true);
    let channel = test_channel("alpha", StreamKind::Hls);

    rig.engine.load(&channel).await.unwrap();

    assert_eq!(rig.element.source().as_deref(), Some(channel.stream_url.as_str()));
    assert_eq!(rig.element.play_calls(), 1);
    assert_eq!(rig.factory.created().len(), 0);
}

#[tokio::test]
async fn hls_with_no_playback_path_goes_terminal() {
    let rig = rig();
    rig.factory.set_supported(false);
    let mut rx = rig.bus.subscribe();

    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    settle().await;

    assert!(rig.engine.terminal_error().is_some());
    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Engine(EngineEvent::TerminalError { .. }))));
}

#[tokio::test]
async fn iframe_channels_are_not_driven_by_the_engine() {
    let rig = rig();
    rig.engine
        .load(&test_channel("delta", StreamKind::Iframe))
        .await
        .unwrap();

    assert!(!rig.engine.has_session());
    assert_eq!(rig.element.source(), None);
    assert_eq!(rig.factory.created().len(), 0);
}

#[tokio::test]
async fn policy_blocked_autoplay_surfaces_without_consuming_retries() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.element.fail_next_play(MediaError::PolicyBlocked);
    let mut rx = rig.bus.subscribe();

    rig.engine.dispatch(&manifest_parsed(true)).await;

    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Engine(EngineEvent::PlaybackBlocked))));
    assert_eq!(rig.engine.retry_count(), 0);
    assert!(rig.engine.terminal_error().is_none());
}

#[tokio::test]
async fn aborted_autoplay_is_swallowed_silently() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.element.fail_next_play(MediaError::Aborted);
    let mut rx = rig.bus.subscribe();

    rig.engine.dispatch(&manifest_parsed(false)).await;

    let events = drain(&mut rx);
    assert!(!events
        .iter()
        .any(|e| matches!(e, Event::Engine(EngineEvent::PlaybackBlocked))));
    assert!(rig.engine.terminal_error().is_none());
}

#[tokio::test]
async fn play_and_pause_are_idempotent() {
    let rig = rig();
    rig.engine
        .load(&test_channel("beta", StreamKind::Mp4))
        .await
        .unwrap();
    assert_eq!(rig.element.play_calls(), 1);

    // Already playing: a second play is a no-op.
    rig.engine.play().await;
    assert_eq!(rig.element.play_calls(), 1);

    rig.engine.pause();
    assert!(rig.element.paused());
    rig.engine.pause();
    assert!(rig.element.paused());

    rig.engine.play().await;
    assert_eq!(rig.element.play_calls(), 2);
}

#[tokio::test]
async fn vod_seek_clamps_to_duration() {
    let rig = rig();
    rig.engine
        .load(&test_channel("beta", StreamKind::Mp4))
        .await
        .unwrap();
    rig.element.set_duration(100.0);
    rig.element.set_current_time(95.0);

    rig.engine.seek(30.0);
    assert_eq!(rig.element.current_time(), 100.0);

    rig.engine.seek(-250.0);
    assert_eq!(rig.element.current_time(), 0.0);
    assert!(!rig.engine.is_live());
}

#[tokio::test]
async fn live_seek_clamps_to_the_seekable_window() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine.dispatch(&manifest_parsed(true)).await;
    rig.element.set_seekable_end(Some(120.0));
    rig.element.set_current_time(100.0);

    rig.engine.seek(30.0);
    assert_eq!(rig.element.current_time(), 120.0);

    // With no known seekable end the seek is dropped.
    rig.element.set_seekable_end(None);
    rig.engine.seek(30.0);
    assert_eq!(rig.element.current_time(), 120.0);
}

#[tokio::test]
async fn liveness_follows_duration_or_manifest() {
    let rig = rig();
    rig.engine
        .load(&test_channel("beta", StreamKind::Mp4))
        .await
        .unwrap();
    rig.element.set_duration(42.0);
    assert!(!rig.engine.is_live());

    rig.element.set_duration(f64::INFINITY);
    assert!(rig.engine.is_live());
}

#[tokio::test]
async fn quality_selection_requires_an_adaptive_session() {
    let rig = rig();
    rig.engine
        .load(&test_channel("beta", StreamKind::Mp4))
        .await
        .unwrap();
    assert!(rig.engine.set_quality(1).is_err());

    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine.set_quality(1).unwrap();
    assert_eq!(rig.factory.created()[0].current_level(), 1);
    assert_eq!(rig.engine.current_level(), 1);
}

#[tokio::test]
async fn level_switch_events_update_the_current_level() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine
        .dispatch(&Event::Engine(EngineEvent::LevelSwitched { level: 2 }))
        .await;
    assert_eq!(rig.engine.current_level(), 2);
}

#[tokio::test]
async fn media_events_pass_through_untouched() {
    // Progress is derived from element events only; the engine must not
    // react to plain time updates beyond watchdog bookkeeping.
    let rig = rig();
    rig.engine
        .load(&test_channel("beta", StreamKind::Mp4))
        .await
        .unwrap();
    rig.engine
        .dispatch(&Event::Media(MediaEvent::TimeUpdate { position_secs: 7.5 }))
        .await;
    assert_eq!(rig.element.play_calls(), 1);
}
