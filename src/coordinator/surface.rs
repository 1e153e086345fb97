use crate::player::types::SurfaceHandle;

/// Host-side rendering surface the player draws into
pub trait RenderSurface {
    fn handle(&self) -> SurfaceHandle;
    /// Position and size the surface inside the host bounds
    fn apply_layout(&mut self, layout: SurfaceLayout);
    /// Stop delivering lifecycle notifications
    fn detach_observer(&mut self);
}

/// Surface lifecycle notifications from the host window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Created,
    Destroyed,
    Changed { format: i32, width: i32, height: i32 },
}

/// Size of the widget hosting the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostBounds {
    pub width: i32,
    pub height: i32,
}

/// Placement of the surface inside the host, in host pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLayout {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Largest rectangle of `aspect_ratio` that fits in `bounds`, centred.
/// Returns `None` for empty bounds or a degenerate ratio.
pub fn fit_surface(bounds: HostBounds, aspect_ratio: f32) -> Option<SurfaceLayout> {
    if bounds.width <= 0 || bounds.height <= 0 || !aspect_ratio.is_finite() || aspect_ratio <= 0.0
    {
        return None;
    }

    let frame_ratio = bounds.width as f32 / bounds.height as f32;

    let layout = if (frame_ratio - aspect_ratio).abs() <= f32::EPSILON {
        SurfaceLayout {
            x: 0,
            y: 0,
            width: bounds.width,
            height: bounds.height,
        }
    } else if frame_ratio > aspect_ratio {
        // Host is wider: pillarbox
        let width = (bounds.height as f32 * aspect_ratio) as i32;
        SurfaceLayout {
            x: (bounds.width - width) / 2,
            y: 0,
            width,
            height: bounds.height,
        }
    } else {
        // Host is taller: letterbox
        let height = (bounds.width as f32 / aspect_ratio) as i32;
        SurfaceLayout {
            x: 0,
            y: (bounds.height - height) / 2,
            width: bounds.width,
            height,
        }
    };

    Some(layout)
}
