use playback_overlay::config::Config;
use playback_overlay::controller::{PlaybackController, PlaybackHandle};
use playback_overlay::coordinator::{PlaybackSnapshot, SurfaceEvent};
use playback_overlay::overlay::{OverlayGesture, Visibility};
use playback_overlay::player::{PlayerEvent, PlayerEvents, PlayerState};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::LocalSet;

use crate::common::mocks::{
    HostLog, MockFactory, MockHost, MockSurface, MockView, PlayerLog, SurfaceLog, ViewLog,
};
use crate::common::test_config;

struct Harness {
    handle: PlaybackHandle,
    task: tokio::task::JoinHandle<()>,
    player: Arc<Mutex<PlayerLog>>,
    surface: Arc<Mutex<SurfaceLog>>,
    host: Arc<Mutex<HostLog>>,
}

/// Must be called inside a `LocalSet`
fn spawn_controller(config: Config) -> Harness {
    let player = Arc::new(Mutex::new(PlayerLog::default()));
    let view = Arc::new(Mutex::new(ViewLog::default()));
    let surface = Arc::new(Mutex::new(SurfaceLog::default()));
    let host = Arc::new(Mutex::new(HostLog::default()));

    let (handle, controller) = PlaybackController::new(
        config,
        Box::new(MockFactory::new(player.clone())),
        Box::new(MockView::new(view)),
        Box::new(MockSurface::new(surface.clone())),
    );
    controller.set_host_callback(Box::new(MockHost::new(host.clone())));
    let task = tokio::task::spawn_local(controller.run());

    Harness {
        handle,
        task,
        player,
        surface,
        host,
    }
}

fn latest_events(player: &Arc<Mutex<PlayerLog>>) -> PlayerEvents {
    player
        .lock()
        .unwrap()
        .events
        .last()
        .cloned()
        .expect("no player created")
}

async fn wait_for(
    handle: &PlaybackHandle,
    predicate: impl Fn(&PlaybackSnapshot) -> bool,
) -> PlaybackSnapshot {
    for _ in 0..200 {
        let snapshot = handle.snapshot().await.unwrap();
        if predicate(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached");
}

#[tokio::test]
async fn test_controller_drives_playback() {
    LocalSet::new()
        .run_until(async {
            let h = spawn_controller(test_config());
            h.player.lock().unwrap().duration_ms = 90_000;

            h.handle.set_source("rtsp://camera/1", "Front door").unwrap();
            h.handle.surface_event(SurfaceEvent::Created).unwrap();
            let snapshot = h.handle.snapshot().await.unwrap();
            assert_eq!(snapshot.player_state, PlayerState::Preparing);
            assert_eq!(snapshot.locator.as_deref(), Some("rtsp://camera/1"));

            assert!(latest_events(&h.player).emit(PlayerEvent::Prepared));
            let snapshot = wait_for(&h.handle, |s| s.player_state == PlayerState::Playing).await;
            assert_eq!(
                snapshot.presentation.duration_label.as_deref(),
                Some("01:30")
            );
            assert!(!snapshot.presentation.spinner_visible);

            h.handle.gesture(OverlayGesture::BackButton).unwrap();
            h.handle.snapshot().await.unwrap();
            assert_eq!(h.host.lock().unwrap().backs, 1);

            h.handle.release().await.unwrap();
            h.task.await.unwrap();

            let calls = h.player.lock().unwrap().calls.clone();
            assert_eq!(&calls[calls.len() - 3..], ["stop", "display:None", "release"]);
            assert_eq!(h.surface.lock().unwrap().detached, 1);
            assert!(h.handle.set_title("gone").is_err());
            assert!(h.handle.snapshot().await.is_err());
        })
        .await;
}

#[tokio::test]
async fn test_stale_events_through_channel_are_ignored() {
    LocalSet::new()
        .run_until(async {
            let h = spawn_controller(test_config());

            h.handle.surface_event(SurfaceEvent::Created).unwrap();
            h.handle.set_source("rtsp://camera/1", "One").unwrap();
            h.handle.snapshot().await.unwrap();
            let first = latest_events(&h.player);

            h.handle.set_source("rtsp://camera/2", "Two").unwrap();
            h.handle.snapshot().await.unwrap();
            let second = latest_events(&h.player);
            assert_eq!(second.generation(), first.generation() + 1);

            first.emit(PlayerEvent::Prepared);
            second.emit(PlayerEvent::BufferingStart);
            let snapshot = wait_for(&h.handle, |s| s.buffering).await;
            assert_eq!(snapshot.player_state, PlayerState::Preparing);

            h.handle.release().await.unwrap();
            h.task.await.unwrap();
        })
        .await;
}

#[tokio::test]
async fn test_timer_hides_chrome_while_playing() {
    let mut config = test_config();
    config.overlay.tick_interval_ms = 10;
    config.overlay.auto_hide_seconds = 1;

    LocalSet::new()
        .run_until(async move {
            let h = spawn_controller(config);
            h.player.lock().unwrap().duration_ms = 10_000;

            h.handle.set_source("rtsp://camera/1", "Front door").unwrap();
            h.handle.surface_event(SurfaceEvent::Created).unwrap();
            h.handle.snapshot().await.unwrap();
            latest_events(&h.player).emit(PlayerEvent::Prepared);

            let snapshot = wait_for(&h.handle, |s| {
                s.overlay.visibility == Visibility::Hidden && !s.overlay.transitioning
            })
            .await;
            assert!(snapshot.overlay.playing);

            h.handle.release().await.unwrap();
            h.task.await.unwrap();
        })
        .await;
}

#[tokio::test]
async fn test_dropping_handles_releases() {
    LocalSet::new()
        .run_until(async {
            let h = spawn_controller(test_config());
            h.handle.surface_event(SurfaceEvent::Created).unwrap();
            h.handle.set_source("rtsp://camera/1", "Front door").unwrap();

            let Harness {
                handle,
                task,
                player,
                surface,
                ..
            } = h;
            drop(handle);
            task.await.unwrap();

            let calls = player.lock().unwrap().calls.clone();
            assert_eq!(calls.last().map(String::as_str), Some("release"));
            assert_eq!(surface.lock().unwrap().detached, 1);
        })
        .await;
}
