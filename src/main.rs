use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

use playback_overlay::config::Config;
use playback_overlay::controller::PlaybackController;
use playback_overlay::coordinator::{RenderSurface, SurfaceEvent, SurfaceLayout};
use playback_overlay::overlay::{
    OverlayGesture, OverlayPresentation, OverlayView, TransitionDone, Visibility,
};
use playback_overlay::player::{HostCallback, SimulatedFactory, SurfaceHandle};
use playback_overlay::utils::PlayerError;

/// Prints every frame of chrome it is asked to draw
struct LogView;

impl OverlayView for LogView {
    fn render(&mut self, presentation: &OverlayPresentation) {
        info!(
            "[view] '{}' {} / {} seek={}/{} icon={:?} spinner={}",
            presentation.title,
            presentation.progress_label,
            presentation.duration_label.as_deref().unwrap_or("-"),
            presentation.seek_value,
            presentation.seek_max,
            presentation.play_icon,
            presentation.spinner_visible,
        );
    }

    fn animate_chrome(&mut self, target: Visibility, duration: Duration) -> TransitionDone {
        info!("[view] animating chrome to {:?} over {:?}", target, duration);
        Box::pin(tokio::time::sleep(duration))
    }
}

struct LogSurface;

impl RenderSurface for LogSurface {
    fn handle(&self) -> SurfaceHandle {
        SurfaceHandle(1)
    }

    fn apply_layout(&mut self, layout: SurfaceLayout) {
        info!("[surface] layout {:?}", layout);
    }

    fn detach_observer(&mut self) {
        info!("[surface] observer detached");
    }
}

struct LogHost;

impl HostCallback for LogHost {
    fn on_back_click(&self) {
        info!("[host] back");
    }

    fn on_full_screen_click(&self, full_screen: bool) {
        info!("[host] full screen requested: {}", full_screen);
    }

    fn on_error(&self, error: &PlayerError) {
        warn!("[host] playback error: {}", error);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("playback_overlay=debug,playback_overlay_demo=info")
        .init();

    info!("Starting playback overlay demo");

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    let (handle, controller) = PlaybackController::new(
        config,
        Box::new(SimulatedFactory::default()),
        Box::new(LogView),
        Box::new(LogSurface),
    );
    controller.set_host_callback(Box::new(LogHost));

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let controller_task = tokio::task::spawn_local(controller.run());

            handle.set_source("demo://big-buck-bunny", "Big Buck Bunny")?;
            handle.surface_event(SurfaceEvent::Created)?;
            handle.host_layout(1920, 1200)?;

            tokio::time::sleep(Duration::from_millis(800)).await;

            handle.gesture(OverlayGesture::SeekStart)?;
            handle.gesture(OverlayGesture::SeekMove(30))?;
            handle.gesture(OverlayGesture::SeekEnd(42))?;
            tokio::time::sleep(Duration::from_millis(500)).await;

            handle.gesture(OverlayGesture::PlayPauseButton)?;
            let snapshot = handle.snapshot().await?;
            info!(
                "Player {} at {}, chrome {:?}",
                snapshot.player_state.to_string(),
                snapshot.presentation.progress_label,
                snapshot.overlay.visibility
            );

            handle.gesture(OverlayGesture::BackButton)?;
            handle.release().await?;
            controller_task.await?;
            Ok::<_, anyhow::Error>(())
        })
        .await?;

    info!("Demo finished");
    Ok(())
}
