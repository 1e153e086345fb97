use anyhow::Result;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::coordinator::{
    HostBounds, PlaybackSnapshot, RenderSurface, SurfaceCoordinator, SurfaceEvent,
};
use crate::overlay::{Orientation, OverlayGesture, OverlaySignal, OverlayView};
use crate::player::session::HostCallback;
use crate::player::traits::PlayerFactory;
use crate::player::types::PlayerEvent;

/// Commands that can be sent to the playback controller
#[derive(Debug)]
pub enum PlaybackCommand {
    /// Set the media locator and title, loading once the surface is ready
    SetSource { locator: String, title: String },
    /// Update the title shown in the top bar
    SetTitle { title: String },
    /// Render surface lifecycle notification
    Surface(SurfaceEvent),
    /// Host widget finished a layout pass
    HostLayout(HostBounds),
    /// Device orientation changed
    Orientation(Orientation),
    /// User input on the overlay
    Gesture(OverlayGesture),
    /// Get a snapshot of player and overlay state
    GetSnapshot {
        respond_to: oneshot::Sender<PlaybackSnapshot>,
    },
    /// Tear everything down and stop the loop
    Release { respond_to: oneshot::Sender<()> },
}

/// Owns the coordinator on a single task and serialises every host command,
/// overlay timer signal and native player event onto it. The coordinator is
/// not `Send`, so `run` belongs on a `tokio::task::LocalSet`.
pub struct PlaybackController {
    coordinator: SurfaceCoordinator,
    commands: mpsc::UnboundedReceiver<PlaybackCommand>,
    signals: mpsc::UnboundedReceiver<OverlaySignal>,
    player_events: mpsc::UnboundedReceiver<(u64, PlayerEvent)>,
}

impl PlaybackController {
    /// Create a new playback controller with the given config
    pub fn new(
        config: Config,
        factory: Box<dyn PlayerFactory>,
        view: Box<dyn OverlayView>,
        surface: Box<dyn RenderSurface>,
    ) -> (PlaybackHandle, PlaybackController) {
        let (sender, commands) = mpsc::unbounded_channel();
        let (signal_tx, signals) = mpsc::unbounded_channel();
        let (event_tx, player_events) = mpsc::unbounded_channel();

        let coordinator =
            SurfaceCoordinator::new(config, factory, view, surface, signal_tx, event_tx);

        let controller = PlaybackController {
            coordinator,
            commands,
            signals,
            player_events,
        };
        let handle = PlaybackHandle { sender };

        (handle, controller)
    }

    /// Install the embedding application's callbacks. Must happen before
    /// `run`, on the owner thread.
    pub fn set_host_callback(&self, host: Box<dyn HostCallback>) {
        self.coordinator.set_host_callback(host);
    }

    /// Run the controller event loop until released or every handle is dropped
    pub async fn run(mut self) {
        debug!("PlaybackController event loop started");

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("All playback handles dropped");
                        self.coordinator.release();
                        break;
                    };
                    if !self.handle_command(command) {
                        break;
                    }
                }
                Some(signal) = self.signals.recv() => {
                    self.coordinator.handle_overlay_signal(signal);
                }
                Some((generation, event)) = self.player_events.recv() => {
                    trace!("Player #{} event: {:?}", generation, event);
                    self.coordinator.handle_player_event(generation, event);
                }
            }
        }

        debug!("PlaybackController event loop terminated");
    }

    /// Returns false once the loop should stop
    fn handle_command(&mut self, command: PlaybackCommand) -> bool {
        match command {
            PlaybackCommand::SetSource { locator, title } => {
                info!("Setting source: {}", locator);
                self.coordinator.set_source(&locator, &title);
            }
            PlaybackCommand::SetTitle { title } => {
                self.coordinator.set_title(&title);
            }
            PlaybackCommand::Surface(event) => {
                self.coordinator.handle_surface_event(event);
            }
            PlaybackCommand::HostLayout(bounds) => {
                self.coordinator.on_host_layout(bounds);
            }
            PlaybackCommand::Orientation(orientation) => {
                debug!("Orientation changed to {:?}", orientation);
                self.coordinator.on_orientation_changed(orientation);
            }
            PlaybackCommand::Gesture(gesture) => {
                trace!("Gesture: {:?}", gesture);
                self.coordinator.handle_gesture(gesture);
            }
            PlaybackCommand::GetSnapshot { respond_to } => {
                let _ = respond_to.send(self.coordinator.snapshot());
            }
            PlaybackCommand::Release { respond_to } => {
                self.coordinator.release();
                let _ = respond_to.send(());
                return false;
            }
        }
        true
    }
}

/// Handle to send commands to the playback controller
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    sender: mpsc::UnboundedSender<PlaybackCommand>,
}

impl PlaybackHandle {
    fn send(&self, command: PlaybackCommand) -> Result<()> {
        self.sender
            .send(command)
            .map_err(|_| anyhow::anyhow!("Playback controller disconnected"))
    }

    /// Set the media locator and title
    pub fn set_source(&self, locator: &str, title: &str) -> Result<()> {
        self.send(PlaybackCommand::SetSource {
            locator: locator.to_string(),
            title: title.to_string(),
        })
    }

    pub fn set_title(&self, title: &str) -> Result<()> {
        self.send(PlaybackCommand::SetTitle {
            title: title.to_string(),
        })
    }

    pub fn surface_event(&self, event: SurfaceEvent) -> Result<()> {
        self.send(PlaybackCommand::Surface(event))
    }

    pub fn host_layout(&self, width: i32, height: i32) -> Result<()> {
        self.send(PlaybackCommand::HostLayout(HostBounds { width, height }))
    }

    pub fn orientation_changed(&self, orientation: Orientation) -> Result<()> {
        self.send(PlaybackCommand::Orientation(orientation))
    }

    pub fn gesture(&self, gesture: OverlayGesture) -> Result<()> {
        self.send(PlaybackCommand::Gesture(gesture))
    }

    /// Get a snapshot of player and overlay state
    pub async fn snapshot(&self) -> Result<PlaybackSnapshot> {
        let (respond_to, response) = oneshot::channel();
        self.send(PlaybackCommand::GetSnapshot { respond_to })?;
        response
            .await
            .map_err(|_| anyhow::anyhow!("Failed to receive response from playback controller"))
    }

    /// Release the player and overlay and stop the controller loop
    pub async fn release(&self) -> Result<()> {
        let (respond_to, response) = oneshot::channel();
        self.send(PlaybackCommand::Release { respond_to })?;
        response
            .await
            .map_err(|_| anyhow::anyhow!("Failed to receive response from playback controller"))
    }
}
