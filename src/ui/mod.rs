pub mod dialogs;
pub mod gdi;

use dialogs::ColorDialog;
use gdi::{colorref, GdiCanvas};

use crate::config::AppConfig;
use crate::error::{AppError, SurfaceError};
use crate::eye::theme::CLR_TRANSPARENT_KEY;
use crate::eye::{Control, EyeApp, EyeAppearance};
use crate::geometry::{Point, Size};
use crate::reminders::ReminderScheduler;
use crate::surface::{ColorPicker, MenuAction, RenderSurface, EYE_MENU};
use crate::tray::{Tray, WM_TRAY_ICON};

use std::cell::RefCell;
use tracing::{debug, info, warn};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::*;

const CLASS_NAME: &str = "VagueReminderEyeWnd\0";
const GAZE_TIMER_ID: usize = 100;
const REMINDER_TIMER_ID: usize = 101;

/// `MK_LBUTTON` bit in the WM_MOUSEMOVE wParam
const MK_LBUTTON_BIT: usize = 0x0001;

/// Per-window state, reachable from the window procedure through GWLP_USERDATA.
/// Modal loops (menus, the color dialog) re-enter the procedure, so every
/// piece is cell-guarded and borrowed only for the duration of one step.
struct WndState {
    app: RefCell<EyeApp>,
    tray: RefCell<Tray>,
    colors: RefCell<ColorDialog>,
    frame_interval_ms: u32,
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn lparam_point(lparam: LPARAM) -> POINT {
    POINT {
        x: (lparam.0 & 0xFFFF) as i16 as i32,
        y: ((lparam.0 >> 16) & 0xFFFF) as i16 as i32,
    }
}

/// Show a popup menu for `actions`; the choice comes back as WM_COMMAND.
pub fn popup_menu(hwnd: HWND, actions: &[MenuAction], at: POINT) {
    unsafe {
        let menu = match CreatePopupMenu() {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "Failed to create popup menu");
                return;
            }
        };

        for (i, action) in actions.iter().enumerate() {
            if i > 0 && *action == MenuAction::Banish {
                let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
            }
            let text = wide(action.label());
            let _ = AppendMenuW(menu, MF_STRING, action.id() as usize, PCWSTR(text.as_ptr()));
        }

        // Required for TrackPopupMenu to dismiss correctly
        let _ = SetForegroundWindow(hwnd);

        let _ = TrackPopupMenu(
            menu,
            TPM_LEFTALIGN | TPM_BOTTOMALIGN,
            at.x,
            at.y,
            Some(0),
            hwnd,
            None,
        );

        let _ = DestroyMenu(menu);
    }
}

/// `RenderSurface` over the eye window handle
#[derive(Clone, Copy)]
struct Win32Surface {
    hwnd: HWND,
    frame_interval_ms: u32,
}

impl Win32Surface {
    fn to_client(&self, mut pt: POINT) -> Point {
        unsafe {
            let _ = ScreenToClient(self.hwnd, &mut pt);
        }
        Point::new(pt.x, pt.y)
    }
}

impl RenderSurface for Win32Surface {
    fn size(&self) -> Size {
        let mut rc = RECT::default();
        unsafe {
            let _ = GetClientRect(self.hwnd, &mut rc);
        }
        Size::new(rc.right - rc.left, rc.bottom - rc.top)
    }

    fn cursor_position(&self) -> Result<Point, SurfaceError> {
        let mut pt = POINT::default();
        unsafe { GetCursorPos(&mut pt) }
            .map_err(|e| SurfaceError::CursorUnavailable(e.to_string()))?;
        Ok(self.to_client(pt))
    }

    fn display_center(&self) -> Point {
        let pt = unsafe {
            POINT {
                x: GetSystemMetrics(SM_CXSCREEN) / 2,
                y: GetSystemMetrics(SM_CYSCREEN) / 2,
            }
        };
        self.to_client(pt)
    }

    fn request_redraw(&mut self) {
        unsafe {
            let _ = InvalidateRect(Some(self.hwnd), None, false);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        unsafe {
            if visible {
                let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
                SetTimer(Some(self.hwnd), GAZE_TIMER_ID, self.frame_interval_ms, None);
            } else {
                let _ = KillTimer(Some(self.hwnd), GAZE_TIMER_ID);
                let _ = ShowWindow(self.hwnd, SW_HIDE);
            }
        }
    }

    fn origin(&self) -> Point {
        let mut rc = RECT::default();
        unsafe {
            let _ = GetWindowRect(self.hwnd, &mut rc);
        }
        Point::new(rc.left, rc.top)
    }

    fn move_to(&mut self, origin: Point) {
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                None,
                origin.x,
                origin.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }
}

/// The floating eye. Destroys the window and frees its state on drop.
pub struct EyeWindow {
    hwnd: HWND,
    state: *mut WndState,
}

impl EyeWindow {
    pub fn create(config: &AppConfig) -> Result<Self, AppError> {
        let class_name = wide(CLASS_NAME);
        let title = wide("Vague Reminder");

        unsafe {
            let hinstance = GetModuleHandleW(PCWSTR::null()).unwrap_or_default();

            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(wnd_proc),
                hInstance: hinstance.into(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                return Err(AppError::WindowClass);
            }

            let appearance = EyeAppearance {
                iris: config.iris_color,
                ..EyeAppearance::default()
            };
            let state = Box::into_raw(Box::new(WndState {
                app: RefCell::new(EyeApp::new(appearance, ReminderScheduler::new())),
                tray: RefCell::new(Tray::new()),
                colors: RefCell::new(ColorDialog::new(HWND::default())),
                frame_interval_ms: config.frame_interval_ms,
            }));

            let hwnd = CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_LAYERED,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_POPUP,
                config.x,
                config.y,
                config.size,
                config.size,
                None,
                None,
                Some(hinstance.into()),
                Some(state as *const std::ffi::c_void),
            );

            let hwnd = match hwnd {
                Ok(h) => h,
                Err(e) => {
                    drop(Box::from_raw(state));
                    return Err(AppError::CreateWindow(e.to_string()));
                }
            };

            // Everything painted in the key color is see-through
            let _ = SetLayeredWindowAttributes(hwnd, colorref(CLR_TRANSPARENT_KEY), 0, LWA_COLORKEY);

            *(*state).colors.borrow_mut() = ColorDialog::new(hwnd);
            (*state).tray.borrow_mut().add(hwnd);

            info!(x = config.x, y = config.y, size = config.size, "Eye window created");
            Ok(Self { hwnd, state })
        }
    }

    /// Show the eye and start both timers
    pub fn show(&self) {
        unsafe {
            let state = &*self.state;
            let mut surface = Win32Surface {
                hwnd: self.hwnd,
                frame_interval_ms: state.frame_interval_ms,
            };
            surface.set_visible(true);

            let delay = state.app.borrow_mut().first_reminder_delay();
            debug!(delay_ms = delay, "First reminder scheduled");
            SetTimer(Some(self.hwnd), REMINDER_TIMER_ID, delay, None);
        }
    }
}

impl Drop for EyeWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
            drop(Box::from_raw(self.state));
        }
    }
}

/// Run a menu action against the window state
fn dispatch(state: &WndState, surface: &mut Win32Surface, action: MenuAction) {
    let control = match (state.app.try_borrow_mut(), state.tray.try_borrow_mut()) {
        (Ok(mut app), Ok(mut tray)) => app.handle_action(action, surface, &mut *tray),
        _ => {
            debug!(?action, "State busy, dropping menu action");
            return;
        }
    };

    match control {
        Control::Continue => {}
        Control::PickIrisColor(initial) => {
            // The dialog pumps messages; nothing may stay borrowed across it
            let choice = match state.colors.try_borrow_mut() {
                Ok(mut dialog) => dialog.pick(initial),
                Err(_) => return,
            };
            if let Ok(mut app) = state.app.try_borrow_mut() {
                if app.apply_iris_color(choice) {
                    surface.request_redraw();
                }
            }
        }
        Control::Quit => {
            if let Ok(mut tray) = state.tray.try_borrow_mut() {
                tray.remove();
            }
            unsafe { PostQuitMessage(0) };
        }
    }
}

/// Window procedure
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCCREATE {
        let cs = &*(lparam.0 as *const CREATESTRUCTW);
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, cs.lpCreateParams as isize);
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }
    if msg == WM_NCDESTROY {
        // The state box is owned by EyeWindow; just detach it
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WndState;
    if ptr.is_null() {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }
    let state = &*ptr;
    let mut surface = Win32Surface {
        hwnd,
        frame_interval_ms: state.frame_interval_ms,
    };

    match msg {
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);

            // Double-buffer to avoid flicker
            let mut client = RECT::default();
            let _ = GetClientRect(hwnd, &mut client);

            let mem_dc = CreateCompatibleDC(Some(hdc));
            let mem_bmp = CreateCompatibleBitmap(hdc, client.right, client.bottom);
            let old_bmp = SelectObject(mem_dc, HGDIOBJ::from(mem_bmp));

            if let Ok(app) = state.app.try_borrow() {
                let mut canvas = GdiCanvas::new(mem_dc, client);
                app.paint(&mut canvas, Size::new(client.right, client.bottom));
            }

            let _ = BitBlt(
                hdc,
                0,
                0,
                client.right,
                client.bottom,
                Some(mem_dc),
                0,
                0,
                SRCCOPY,
            );

            SelectObject(mem_dc, old_bmp);
            let _ = DeleteObject(HGDIOBJ::from(mem_bmp));
            let _ = DeleteDC(mem_dc);
            let _ = EndPaint(hwnd, &ps);
            LRESULT(0)
        }

        WM_TIMER => {
            match wparam.0 {
                GAZE_TIMER_ID => {
                    if let Ok(mut app) = state.app.try_borrow_mut() {
                        app.tick(&mut surface);
                    }
                }
                REMINDER_TIMER_ID => {
                    let next = match (state.app.try_borrow_mut(), state.tray.try_borrow_mut()) {
                        (Ok(mut app), Ok(mut tray)) => Some(app.fire_reminder(&mut *tray)),
                        _ => None,
                    };
                    // Busy inside a modal loop: leave the timer armed and try next time
                    if let Some(delay) = next {
                        SetTimer(Some(hwnd), REMINDER_TIMER_ID, delay, None);
                    }
                }
                _ => {}
            }
            LRESULT(0)
        }

        WM_LBUTTONDOWN => {
            let mut pt = lparam_point(lparam);
            let _ = ClientToScreen(hwnd, &mut pt);
            if let Ok(mut app) = state.app.try_borrow_mut() {
                app.press(Point::new(pt.x, pt.y), &surface);
                SetCapture(hwnd);
            }
            LRESULT(0)
        }

        WM_MOUSEMOVE => {
            if let Ok(mut app) = state.app.try_borrow_mut() {
                if app.is_dragging() {
                    let mut pt = lparam_point(lparam);
                    let _ = ClientToScreen(hwnd, &mut pt);
                    let left_held = wparam.0 & MK_LBUTTON_BIT != 0;
                    app.drag(Point::new(pt.x, pt.y), left_held, &mut surface);
                }
            }
            LRESULT(0)
        }

        WM_LBUTTONUP => {
            if let Ok(mut app) = state.app.try_borrow_mut() {
                if app.is_dragging() {
                    app.release();
                    let _ = ReleaseCapture();
                }
            }
            LRESULT(0)
        }

        WM_CONTEXTMENU => {
            let mut pt = lparam_point(lparam);
            // Keyboard-invoked menus report (-1, -1)
            if pt.x == -1 && pt.y == -1 {
                let _ = GetCursorPos(&mut pt);
            }
            popup_menu(hwnd, &EYE_MENU, pt);
            LRESULT(0)
        }

        WM_COMMAND => {
            let cmd = (wparam.0 & 0xFFFF) as u32;
            if let Some(action) = MenuAction::from_id(cmd) {
                dispatch(state, &mut surface, action);
            }
            LRESULT(0)
        }

        WM_TRAY_ICON => {
            let event = (lparam.0 & 0xFFFF) as u32;
            match event {
                WM_LBUTTONUP => dispatch(state, &mut surface, MenuAction::Restore),
                WM_RBUTTONUP => {
                    if let Ok(tray) = state.tray.try_borrow() {
                        tray.show_context_menu();
                    }
                }
                _ => {}
            }
            LRESULT(0)
        }

        WM_CLOSE => {
            // Banish to the tray instead of quitting
            if let Ok(mut app) = state.app.try_borrow_mut() {
                app.hide(&mut surface);
            }
            LRESULT(0)
        }

        WM_DESTROY => {
            let _ = KillTimer(Some(hwnd), GAZE_TIMER_ID);
            let _ = KillTimer(Some(hwnd), REMINDER_TIMER_ID);
            if let Ok(mut tray) = state.tray.try_borrow_mut() {
                tray.remove();
            }
            PostQuitMessage(0);
            LRESULT(0)
        }

        WM_ERASEBKGND => {
            // Handled in WM_PAINT with double buffering
            LRESULT(1)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
