// Eye rendering as three nested circles, plus the tray icon bitmap

use super::theme::*;
use super::EyeAppearance;
use crate::gaze::GazeState;
use crate::geometry::Size;
use crate::surface::Canvas;

/// Radii of the three circles for a surface of the given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeRadii {
    pub sclera: i32,
    pub iris: i32,
    pub pupil: i32,
}

impl EyeRadii {
    pub fn for_size(size: Size) -> Self {
        let center = size.center();
        let sclera = center.x.min(center.y) - EYE_MARGIN;
        let iris = sclera as f64 * IRIS_SCALE;
        Self {
            sclera,
            iris: iris as i32,
            pupil: (iris * PUPIL_SCALE) as i32,
        }
    }
}

pub fn paint_eye(canvas: &mut impl Canvas, size: Size, appearance: &EyeAppearance, gaze: &GazeState) {
    canvas.clear();

    let center = size.center();
    let radii = EyeRadii::for_size(size);

    // 1. Sclera
    canvas.circle(center, radii.sclera, appearance.sclera, Some(appearance.outline));

    // 2. Iris, drifting slightly with the pupil
    canvas.circle(
        center + gaze.iris_offset,
        radii.iris,
        appearance.iris,
        Some(appearance.outline),
    );

    // 3. Pupil, no outline
    canvas.circle(center + gaze.pupil_offset, radii.pupil, appearance.pupil, None);
}

/// RGBA pixels for the tray icon: a black disc on a transparent square
pub fn tray_icon_rgba() -> Vec<u8> {
    let size = TRAY_ICON_SIZE;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);

    let radius = (size - 2 * TRAY_ICON_INSET) as f32 / 2.0;
    let c = size as f32 / 2.0;

    for y in 0..size {
        for x in 0..size {
            // Sample at pixel centers
            let dx = x as f32 + 0.5 - c;
            let dy = y as f32 + 0.5 - c;
            let inside = (dx * dx + dy * dy).sqrt() <= radius;
            let a = if inside { 255 } else { 0 };
            rgba.extend_from_slice(&[0, 0, 0, a]);
        }
    }

    rgba
}
