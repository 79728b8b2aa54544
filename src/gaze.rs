// Gaze tracking: where the pupil and iris sit relative to the eye center

use crate::error::SurfaceError;
use crate::geometry::{Offset, Point, Vector2D};
use tracing::debug;

/// Fraction of half the surface width the pupil may travel
pub const PUPIL_TRAVEL: f64 = 0.35;

/// The iris follows the pupil at this fraction of its displacement
pub const IRIS_FOLLOW: f64 = 0.2;

/// Exact (unrounded) gaze result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaze {
    pub pupil: Vector2D,
    pub iris: Vector2D,
}

/// Pixel offsets stored between ticks and read by the painter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GazeState {
    pub pupil_offset: Offset,
    pub iris_offset: Offset,
}

impl From<Gaze> for GazeState {
    fn from(gaze: Gaze) -> Self {
        let pupil_offset = gaze.pupil.truncate();
        let iris_offset = (pupil_offset.to_vector() * IRIS_FOLLOW).truncate();
        Self {
            pupil_offset,
            iris_offset,
        }
    }
}

/// Maximum pupil travel for a surface of the given width
pub fn max_pupil_distance(surface_width: i32) -> f64 {
    (surface_width as f64 / 2.0) * PUPIL_TRAVEL
}

/// Point the pupil from `center` toward `cursor`, clamped to `max_pupil_distance`.
pub fn compute_gaze(center: Point, cursor: Point, max_pupil_distance: f64) -> Gaze {
    let v = (cursor - center).to_vector();
    let distance = v.length();

    if distance == 0.0 {
        return Gaze {
            pupil: Vector2D::ZERO,
            iris: Vector2D::ZERO,
        };
    }

    let unit = v * (1.0 / distance);
    let pupil = unit * distance.min(max_pupil_distance);
    Gaze {
        pupil,
        iris: pupil * IRIS_FOLLOW,
    }
}

/// Fall back to `fallback` (the primary display center) when the cursor
/// lookup fails. The next tick simply tries again.
pub fn resolve_cursor(lookup: Result<Point, SurfaceError>, fallback: Point) -> Point {
    match lookup {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "Cursor lookup failed, looking at display center");
            fallback
        }
    }
}
