#![forbid(unsafe_code)]

mod fixture;

use std::time::Duration;

use fixture::{drain, rig, settle};
use kanava_core::StreamKind;
use kanava_events::{EngineEvent, Event, FaultKind, MediaEvent};
use kanava_platform::MediaElement;
use kanava_test_utils::test_channel;

fn network_fault() -> Event {
    Event::Engine(EngineEvent::Fault {
        kind: FaultKind::Network,
        fatal: true,
        details: "manifest load timed out".to_owned(),
    })
}

fn manifest_parsed(live: bool) -> Event {
    Event::Engine(EngineEvent::ManifestParsed {
        live,
        levels: Vec::new(),
    })
}

#[tokio::test(start_paused = true)]
async fn network_failures_back_off_exponentially_then_go_terminal() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    let mut rx = rig.bus.subscribe();

    for attempt in 1..=5u32 {
        rig.engine.dispatch(&network_fault()).await;

        let scheduled = drain(&mut rx)
            .into_iter()
            .find_map(|e| match e {
                Event::Engine(EngineEvent::RetryScheduled { attempt, delay }) => {
                    Some((attempt, delay))
                }
                _ => None,
            })
            .expect("a retry should be scheduled");
        let expected = Duration::from_millis(1000 * 2u64.pow(attempt - 1));
        assert_eq!(scheduled, (attempt, expected));

        tokio::time::advance(expected).await;
        settle().await;
        // Each backoff expiry reloads the channel with a fresh session.
        assert_eq!(rig.factory.created().len(), 1 + attempt as usize);
    }

    // The sixth consecutive failure exhausts the budget.
    rig.engine.dispatch(&network_fault()).await;
    settle().await;

    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Engine(EngineEvent::TerminalError { .. }))));
    assert!(rig.engine.terminal_error().is_some());
    assert_eq!(rig.factory.live_sessions(), 0);
}

#[tokio::test(start_paused = true)]
async fn a_successful_manifest_parse_resets_the_retry_budget() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();

    rig.engine.dispatch(&network_fault()).await;
    assert_eq!(rig.engine.retry_count(), 1);

    rig.engine.dispatch(&manifest_parsed(true)).await;
    assert_eq!(rig.engine.retry_count(), 0);
    assert!(rig.engine.terminal_error().is_none());
}

#[tokio::test]
async fn a_fresh_load_also_resets_the_retry_budget() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine.dispatch(&network_fault()).await;
    assert_eq!(rig.engine.retry_count(), 1);

    rig.engine
        .load(&test_channel("gamma", StreamKind::Hls))
        .await
        .unwrap();
    assert_eq!(rig.engine.retry_count(), 0);
}

#[tokio::test]
async fn fatal_media_errors_recover_in_place() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();

    rig.engine
        .dispatch(&Event::Engine(EngineEvent::Fault {
            kind: FaultKind::Media,
            fatal: true,
            details: "decode error".to_owned(),
        }))
        .await;

    let session = &rig.factory.created()[0];
    assert_eq!(session.recover_calls(), 1);
    assert!(!session.is_destroyed());
    assert_eq!(rig.engine.retry_count(), 0);
}

#[tokio::test]
async fn live_buffer_stalls_seek_to_the_live_edge() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine.dispatch(&manifest_parsed(true)).await;
    rig.element.set_seekable_end(Some(240.0));

    rig.engine
        .dispatch(&Event::Engine(EngineEvent::Fault {
            kind: FaultKind::BufferStall,
            fatal: false,
            details: "bufferStalledError".to_owned(),
        }))
        .await;

    assert_eq!(rig.element.current_time(), 240.0);
    assert_eq!(rig.factory.live_sessions(), 1);
}

#[tokio::test]
async fn vod_buffer_stalls_resume_loading_without_seeking() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine.dispatch(&manifest_parsed(false)).await;
    rig.element.set_current_time(33.0);

    rig.engine
        .dispatch(&Event::Engine(EngineEvent::Fault {
            kind: FaultKind::BufferStall,
            fatal: false,
            details: "bufferStalledError".to_owned(),
        }))
        .await;

    assert_eq!(rig.element.current_time(), 33.0);
    // Initial load plus the resume.
    assert_eq!(rig.factory.created()[0].start_load_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn stall_watchdog_on_live_seeks_to_the_edge_and_resumes() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine.dispatch(&manifest_parsed(true)).await;
    rig.element.set_seekable_end(Some(600.0));
    rig.element.pause();
    let plays_before = rig.element.play_calls();

    rig.engine
        .dispatch(&Event::Media(MediaEvent::Waiting))
        .await;
    tokio::time::advance(Duration::from_secs(11)).await;
    settle().await;

    assert_eq!(rig.element.current_time(), 600.0);
    assert_eq!(rig.element.play_calls(), plays_before + 1);
}

#[tokio::test(start_paused = true)]
async fn stall_watchdog_on_vod_reloads_through_the_retry_budget() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine.dispatch(&manifest_parsed(false)).await;
    let mut rx = rig.bus.subscribe();

    rig.engine
        .dispatch(&Event::Media(MediaEvent::Waiting))
        .await;
    tokio::time::advance(Duration::from_secs(11)).await;
    settle().await;

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Engine(EngineEvent::RetryScheduled { attempt: 1, .. })
    )));

    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(rig.factory.created().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn resumed_playback_disarms_the_stall_watchdog() {
    let rig = rig();
    rig.engine
        .load(&test_channel("alpha", StreamKind::Hls))
        .await
        .unwrap();
    rig.engine.dispatch(&manifest_parsed(true)).await;
    rig.element.set_seekable_end(Some(600.0));
    rig.element.set_current_time(595.0);
    let mut rx = rig.bus.subscribe();

    rig.engine
        .dispatch(&Event::Media(MediaEvent::Waiting))
        .await;
    rig.engine
        .dispatch(&Event::Media(MediaEvent::Playing))
        .await;
    tokio::time::advance(Duration::from_secs(20)).await;
    settle().await;

    assert_eq!(rig.element.current_time(), 595.0);
    assert!(drain(&mut rx).is_empty());
}
