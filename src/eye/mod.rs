//! The eye: gaze state, appearance, visibility and the actions its menus offer.
//!
//! `EyeApp` owns all mutable state. Host callbacks (timers, mouse, menus)
//! call into it with whichever capability they need for that event.

pub mod controls;
pub mod painting;
pub mod theme;

use controls::{DragState, Visibility};
use theme::*;

use crate::gaze::{self, GazeState};
use crate::geometry::{Point, Size};
use crate::reminders::{self, ReminderScheduler};
use crate::surface::{Canvas, MenuAction, Notifier, Outline, RenderSurface, Rgb};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeAppearance {
    pub sclera: Rgb,
    pub iris: Rgb,
    pub pupil: Rgb,
    pub outline: Outline,
}

impl Default for EyeAppearance {
    fn default() -> Self {
        Self {
            sclera: CLR_SCLERA,
            iris: CLR_IRIS,
            pupil: CLR_PUPIL,
            outline: OUTLINE,
        }
    }
}

/// What the host loop should do after handling an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Open a color picker seeded with this color, then `apply_iris_color`
    PickIrisColor(Rgb),
    Quit,
}

pub struct EyeApp<R: Rng = StdRng> {
    appearance: EyeAppearance,
    gaze: GazeState,
    visibility: Visibility,
    drag: DragState,
    scheduler: ReminderScheduler<R>,
}

impl<R: Rng> EyeApp<R> {
    pub fn new(appearance: EyeAppearance, scheduler: ReminderScheduler<R>) -> Self {
        Self {
            appearance,
            gaze: GazeState::default(),
            visibility: Visibility::Visible,
            drag: DragState::new(),
            scheduler,
        }
    }

    pub fn appearance(&self) -> &EyeAppearance {
        &self.appearance
    }

    pub fn gaze(&self) -> &GazeState {
        &self.gaze
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    // ── Gaze ─────────────────────────────────────────────────────────────────

    /// One frame: look at the cursor and ask for a repaint.
    pub fn tick(&mut self, surface: &mut impl RenderSurface) {
        if self.visibility == Visibility::Hidden {
            return;
        }

        let size = surface.size();
        let cursor = gaze::resolve_cursor(surface.cursor_position(), surface.display_center());
        let gaze = gaze::compute_gaze(size.center(), cursor, gaze::max_pupil_distance(size.width));

        self.gaze = GazeState::from(gaze);
        surface.request_redraw();
    }

    pub fn paint(&self, canvas: &mut impl Canvas, size: Size) {
        painting::paint_eye(canvas, size, &self.appearance, &self.gaze);
    }

    // ── Iris color ───────────────────────────────────────────────────────────

    /// Apply a picker result. Returns false (and changes nothing) on cancel.
    pub fn apply_iris_color(&mut self, choice: Option<Rgb>) -> bool {
        match choice {
            Some(color) => {
                debug!(r = color.r, g = color.g, b = color.b, "Iris color changed");
                self.appearance.iris = color;
                true
            }
            None => false,
        }
    }

    // ── Reminders ────────────────────────────────────────────────────────────

    /// Delay before the first reminder
    pub fn first_reminder_delay(&mut self) -> u32 {
        self.scheduler.next_delay_ms()
    }

    /// Show a reminder if the tray is around and return the next delay.
    /// While the tray is not visible the reminder is dropped, not queued.
    pub fn fire_reminder(&mut self, notifier: &mut impl Notifier) -> u32 {
        let reminder = self.scheduler.next_reminder();
        if notifier.is_visible() {
            debug!(message = reminder.message, next_ms = reminder.delay_ms, "Showing reminder");
            notifier.notify(&reminder.notification());
        } else {
            debug!(next_ms = reminder.delay_ms, "Tray not visible, skipping reminder");
        }
        reminder.delay_ms
    }

    // ── Visibility ───────────────────────────────────────────────────────────

    /// Visible → Hidden. The process keeps running in the tray.
    pub fn hide(&mut self, surface: &mut impl RenderSurface) {
        if self.visibility == Visibility::Hidden {
            return;
        }
        self.drag.release();
        self.visibility = Visibility::Hidden;
        surface.set_visible(false);
        info!("Eye hidden");
    }

    /// Hidden → Visible, announced once through the notifier.
    pub fn restore(&mut self, surface: &mut impl RenderSurface, notifier: &mut impl Notifier) {
        if self.visibility == Visibility::Visible {
            return;
        }
        self.visibility = Visibility::Visible;
        surface.set_visible(true);
        notifier.notify(&reminders::restore_notification());
        info!("Eye restored");
    }

    pub fn handle_action(
        &mut self,
        action: MenuAction,
        surface: &mut impl RenderSurface,
        notifier: &mut impl Notifier,
    ) -> Control {
        match action {
            MenuAction::ChooseIrisColor => Control::PickIrisColor(self.appearance.iris),
            MenuAction::Restore => {
                self.restore(surface, notifier);
                Control::Continue
            }
            MenuAction::Banish | MenuAction::BanishPermanently => {
                info!(action = action.label(), "Quit requested");
                Control::Quit
            }
        }
    }

    // ── Dragging ─────────────────────────────────────────────────────────────

    /// Left button pressed at `cursor` (screen coordinates)
    pub fn press(&mut self, cursor: Point, surface: &impl RenderSurface) {
        self.drag.press(cursor, surface.origin());
    }

    pub fn drag(&mut self, cursor: Point, left_held: bool, surface: &mut impl RenderSurface) {
        if let Some(origin) = self.drag.drag_to(cursor, left_held) {
            surface.move_to(origin);
        }
    }

    pub fn release(&mut self) {
        self.drag.release();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use crate::geometry::Offset;
    use crate::reminders::{ReminderCatalog, REMINDER_TITLE, RESTORE_TITLE};
    use crate::surface::{ColorPicker, Notification};
    use rand::SeedableRng;

    struct FakeSurface {
        size: Size,
        cursor: Option<Point>,
        display_center: Point,
        origin: Point,
        visible: bool,
        redraws: u32,
    }

    impl FakeSurface {
        fn new() -> Self {
            Self {
                size: Size::new(150, 150),
                cursor: Some(Point::new(75, 75)),
                display_center: Point::new(885, 465),
                origin: Point::new(100, 100),
                visible: true,
                redraws: 0,
            }
        }
    }

    impl RenderSurface for FakeSurface {
        fn size(&self) -> Size {
            self.size
        }

        fn cursor_position(&self) -> Result<Point, SurfaceError> {
            self.cursor
                .ok_or_else(|| SurfaceError::CursorUnavailable("off screen".into()))
        }

        fn display_center(&self) -> Point {
            self.display_center
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn origin(&self) -> Point {
            self.origin
        }

        fn move_to(&mut self, origin: Point) {
            self.origin = origin;
        }
    }

    struct FakeTray {
        visible: bool,
        shown: Vec<Notification>,
    }

    impl FakeTray {
        fn visible() -> Self {
            Self {
                visible: true,
                shown: Vec::new(),
            }
        }
    }

    impl Notifier for FakeTray {
        fn is_visible(&self) -> bool {
            self.visible
        }

        fn notify(&mut self, notification: &Notification) {
            self.shown.push(notification.clone());
        }
    }

    struct FakePicker(Option<Rgb>);

    impl ColorPicker for FakePicker {
        fn pick(&mut self, _initial: Rgb) -> Option<Rgb> {
            self.0
        }
    }

    fn app() -> EyeApp<StdRng> {
        let scheduler =
            ReminderScheduler::with_rng(ReminderCatalog::builtin(), StdRng::seed_from_u64(5));
        EyeApp::new(EyeAppearance::default(), scheduler)
    }

    #[test]
    fn test_tick_centered_cursor_looks_straight() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        app.tick(&mut surface);
        assert_eq!(*app.gaze(), GazeState::default());
        assert_eq!(surface.redraws, 1);
    }

    #[test]
    fn test_tick_far_cursor_is_clamped() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        surface.cursor = Some(Point::new(775, 75));
        app.tick(&mut surface);
        assert_eq!(app.gaze().pupil_offset, Offset::new(26, 0));
        assert_eq!(app.gaze().iris_offset, Offset::new(5, 0));
    }

    #[test]
    fn test_tick_uses_display_center_when_cursor_lost() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        surface.cursor = None;
        surface.display_center = Point::new(75, 1075);
        app.tick(&mut surface);
        assert_eq!(app.gaze().pupil_offset, Offset::new(0, 26));
        assert_eq!(surface.redraws, 1);
    }

    #[test]
    fn test_tick_is_skipped_while_hidden() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        app.hide(&mut surface);
        surface.cursor = Some(Point::new(775, 75));
        app.tick(&mut surface);
        assert_eq!(*app.gaze(), GazeState::default());
        assert_eq!(surface.redraws, 0);
    }

    #[test]
    fn test_cancelled_color_pick_keeps_iris() {
        let mut app = app();
        assert!(!app.apply_iris_color(FakePicker(None).pick(CLR_IRIS)));
        assert_eq!(app.appearance().iris, CLR_IRIS);
    }

    #[test]
    fn test_confirmed_color_pick_only_touches_iris() {
        let mut app = app();
        let red = Rgb::new(200, 0, 0);
        assert!(app.apply_iris_color(Some(red)));
        assert_eq!(app.appearance().iris, red);
        assert_eq!(app.appearance().sclera, CLR_SCLERA);
        assert_eq!(app.appearance().pupil, CLR_PUPIL);
    }

    #[test]
    fn test_pick_iris_color_flow() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        let mut tray = FakeTray::visible();
        let teal = Rgb::new(0, 128, 128);

        let control = app.handle_action(MenuAction::ChooseIrisColor, &mut surface, &mut tray);
        let Control::PickIrisColor(initial) = control else {
            panic!("expected a color pick, got {:?}", control);
        };
        assert!(app.apply_iris_color(FakePicker(Some(teal)).pick(initial)));
        assert_eq!(app.appearance().iris, teal);

        assert!(!app.apply_iris_color(FakePicker(None).pick(teal)));
        assert_eq!(app.appearance().iris, teal);
    }

    #[test]
    fn test_reminder_shown_when_tray_visible() {
        let mut app = app();
        let mut tray = FakeTray::visible();
        let delay = app.fire_reminder(&mut tray);
        assert!(reminders::DELAY_RANGE_MS.contains(&delay));
        assert_eq!(tray.shown.len(), 1);
        assert_eq!(tray.shown[0].title, REMINDER_TITLE);
        assert!(ReminderCatalog::builtin()
            .entries()
            .contains(&tray.shown[0].body.as_str()));
    }

    #[test]
    fn test_reminder_skipped_when_tray_hidden() {
        let mut app = app();
        let mut tray = FakeTray {
            visible: false,
            shown: Vec::new(),
        };
        let delay = app.fire_reminder(&mut tray);
        assert!(tray.shown.is_empty());
        assert!(reminders::DELAY_RANGE_MS.contains(&delay));
    }

    #[test]
    fn test_hide_and_restore_cycle() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        let mut tray = FakeTray::visible();

        // Restoring a visible eye does nothing
        app.restore(&mut surface, &mut tray);
        assert!(tray.shown.is_empty());

        app.hide(&mut surface);
        assert_eq!(app.visibility(), Visibility::Hidden);
        assert!(!surface.visible);

        app.restore(&mut surface, &mut tray);
        assert_eq!(app.visibility(), Visibility::Visible);
        assert!(surface.visible);
        assert_eq!(tray.shown.len(), 1);
        assert_eq!(tray.shown[0].title, RESTORE_TITLE);

        app.restore(&mut surface, &mut tray);
        assert_eq!(tray.shown.len(), 1);
    }

    #[test]
    fn test_actions_map_to_control() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        let mut tray = FakeTray::visible();

        let mut run =
            |app: &mut EyeApp<StdRng>, action| app.handle_action(action, &mut surface, &mut tray);
        assert_eq!(
            run(&mut app, MenuAction::ChooseIrisColor),
            Control::PickIrisColor(CLR_IRIS)
        );
        assert_eq!(run(&mut app, MenuAction::Restore), Control::Continue);
        assert_eq!(run(&mut app, MenuAction::Banish), Control::Quit);
        assert_eq!(run(&mut app, MenuAction::BanishPermanently), Control::Quit);
    }

    #[test]
    fn test_quit_is_reachable_while_hidden() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        let mut tray = FakeTray::visible();
        app.hide(&mut surface);
        let control = app.handle_action(MenuAction::BanishPermanently, &mut surface, &mut tray);
        assert_eq!(control, Control::Quit);
    }

    #[test]
    fn test_drag_moves_surface() {
        let mut app = app();
        let mut surface = FakeSurface::new();
        app.press(Point::new(140, 130), &surface);
        app.drag(Point::new(440, 330), true, &mut surface);
        assert_eq!(surface.origin, Point::new(400, 300));

        app.release();
        app.drag(Point::new(0, 0), true, &mut surface);
        assert_eq!(surface.origin, Point::new(400, 300));
        assert!(!app.is_dragging());
    }
}
