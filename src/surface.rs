//! Capabilities the eye needs from its host desktop.
//!
//! The eye logic only talks to these traits. The Win32 shell implements them
//! for real windows, and the tests implement them with recording fakes.

use crate::error::SurfaceError;
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub color: Rgb,
    pub width: i32,
}

/// Receives draw commands for one frame
pub trait Canvas {
    /// Reset the frame to the transparent background
    fn clear(&mut self);

    fn circle(&mut self, center: Point, radius: i32, fill: Rgb, outline: Option<Outline>);
}

/// The floating window the eye lives in
pub trait RenderSurface {
    fn size(&self) -> Size;

    /// Cursor position in surface coordinates
    fn cursor_position(&self) -> Result<Point, SurfaceError>;

    /// Center of the primary display, in surface coordinates
    fn display_center(&self) -> Point;

    fn request_redraw(&mut self);

    fn set_visible(&mut self, visible: bool);

    /// Top-left corner in screen coordinates
    fn origin(&self) -> Point;

    fn move_to(&mut self, origin: Point);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub duration: Duration,
}

/// Tray-style notification area
pub trait Notifier {
    fn is_visible(&self) -> bool;

    fn notify(&mut self, notification: &Notification);
}

pub trait ColorPicker {
    /// `None` when the user cancels
    fn pick(&mut self, initial: Rgb) -> Option<Rgb>;
}

/// Named actions offered by the eye and tray context menus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ChooseIrisColor,
    Banish,
    Restore,
    BanishPermanently,
}

pub const EYE_MENU: [MenuAction; 2] = [MenuAction::ChooseIrisColor, MenuAction::Banish];
pub const TRAY_MENU: [MenuAction; 2] = [MenuAction::Restore, MenuAction::BanishPermanently];

const ALL_ACTIONS: [MenuAction; 4] = [
    MenuAction::ChooseIrisColor,
    MenuAction::Banish,
    MenuAction::Restore,
    MenuAction::BanishPermanently,
];

impl MenuAction {
    /// Command id used by native menus
    pub fn id(self) -> u32 {
        match self {
            MenuAction::ChooseIrisColor => 1001,
            MenuAction::Banish => 1002,
            MenuAction::Restore => 1003,
            MenuAction::BanishPermanently => 1004,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        ALL_ACTIONS.into_iter().find(|a| a.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ChooseIrisColor => "Choose Iris Color",
            MenuAction::Banish => "Banish",
            MenuAction::Restore => "It's gone...",
            MenuAction::BanishPermanently => "Banish Permanently",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_ids_round_trip_and_are_unique() {
        for action in ALL_ACTIONS {
            assert_eq!(MenuAction::from_id(action.id()), Some(action));
        }
        assert_eq!(MenuAction::from_id(0), None);
    }

    #[test]
    fn test_menus_offer_two_actions_each() {
        assert_eq!(EYE_MENU[0].label(), "Choose Iris Color");
        assert_eq!(EYE_MENU[1].label(), "Banish");
        assert_eq!(TRAY_MENU[0].label(), "It's gone...");
        assert_eq!(TRAY_MENU[1].label(), "Banish Permanently");
    }

    #[test]
    fn test_rgb_deserializes_from_object() {
        let c: Rgb = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(c, Rgb::new(1, 2, 3));
    }
}
