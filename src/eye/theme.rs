use crate::surface::{Outline, Rgb};

// ── Eye palette ──────────────────────────────────────────────────────────────

/// Sclera: off-white
pub const CLR_SCLERA: Rgb = Rgb::new(245, 245, 245);

/// Default iris: muted blue
pub const CLR_IRIS: Rgb = Rgb::new(100, 150, 220);

/// Pupil: near black
pub const CLR_PUPIL: Rgb = Rgb::new(10, 10, 10);

pub const OUTLINE: Outline = Outline {
    color: Rgb::new(20, 20, 20),
    width: 3,
};

/// Color key painted behind the eye; the window treats it as see-through.
pub const CLR_TRANSPARENT_KEY: Rgb = Rgb::new(255, 0, 255);

// ── Proportions ──────────────────────────────────────────────────────────────

/// Gap between the sclera outline and the window edge
pub const EYE_MARGIN: i32 = 5;

/// Iris radius as a fraction of the sclera radius
pub const IRIS_SCALE: f64 = 0.7;

/// Pupil radius as a fraction of the iris radius
pub const PUPIL_SCALE: f64 = 0.5;

// ── Window ───────────────────────────────────────────────────────────────────

pub const WINDOW_X: i32 = 100;
pub const WINDOW_Y: i32 = 100;
pub const WINDOW_SIZE: i32 = 150;

// ── Tray icon ────────────────────────────────────────────────────────────────

pub const TRAY_ICON_SIZE: u32 = 64;

/// Inset of the black disc inside the tray icon
pub const TRAY_ICON_INSET: u32 = 4;

pub const TRAY_TOOLTIP: &str = "It's watching.";
