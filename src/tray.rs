// System tray icon with context menu and balloon notifications

use crate::eye::painting::tray_icon_rgba;
use crate::eye::theme::{TRAY_ICON_SIZE, TRAY_TOOLTIP};
use crate::surface::{Notification, NotificationKind, Notifier, TRAY_MENU};
use crate::ui;
use tracing::{info, warn};
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::Graphics::Gdi::{CreateBitmap, DeleteObject, HGDIOBJ};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_INFO, NIF_MESSAGE, NIF_TIP, NIIF_INFO, NIIF_WARNING, NIM_ADD,
    NIM_DELETE, NIM_MODIFY, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateIconIndirect, DestroyIcon, GetCursorPos, HICON, ICONINFO, WM_APP,
};

/// Custom message ID for tray icon callbacks
pub const WM_TRAY_ICON: u32 = WM_APP + 1;

const TRAY_UID: u32 = 1;

/// Copy `s` into a fixed UTF-16 buffer, truncating and NUL-terminating
fn copy_wide(dst: &mut [u16], s: &str) {
    let wide: Vec<u16> = s.encode_utf16().collect();
    let len = wide.len().min(dst.len().saturating_sub(1));
    dst[..len].copy_from_slice(&wide[..len]);
    dst[len] = 0;
}

/// Build an HICON from the RGBA bitmap the eye module draws
fn create_icon() -> windows::core::Result<HICON> {
    let size = TRAY_ICON_SIZE as i32;
    let bgra: Vec<u8> = tray_icon_rgba()
        .chunks(4)
        .flat_map(|p| [p[2], p[1], p[0], p[3]])
        .collect();
    // 1bpp AND mask, all zero: the color bitmap's alpha decides transparency
    let mask = vec![0u8; (TRAY_ICON_SIZE * TRAY_ICON_SIZE / 8) as usize];

    unsafe {
        let color = CreateBitmap(size, size, 1, 32, Some(bgra.as_ptr() as *const _));
        let mask_bmp = CreateBitmap(size, size, 1, 1, Some(mask.as_ptr() as *const _));

        let info = ICONINFO {
            fIcon: true.into(),
            xHotspot: 0,
            yHotspot: 0,
            hbmMask: mask_bmp,
            hbmColor: color,
        };
        let icon = CreateIconIndirect(&info);

        let _ = DeleteObject(HGDIOBJ::from(color));
        let _ = DeleteObject(HGDIOBJ::from(mask_bmp));
        icon
    }
}

/// The notification-area icon. Removed again on drop.
pub struct Tray {
    hwnd: HWND,
    icon: Option<HICON>,
    added: bool,
}

impl Tray {
    pub fn new() -> Self {
        Self {
            hwnd: HWND::default(),
            icon: None,
            added: false,
        }
    }

    fn base_data(&self) -> NOTIFYICONDATAW {
        NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: TRAY_UID,
            ..Default::default()
        }
    }

    /// Add the icon, routing its mouse events to `hwnd`. Returns true on success.
    pub fn add(&mut self, hwnd: HWND) -> bool {
        self.hwnd = hwnd;

        if self.icon.is_none() {
            match create_icon() {
                Ok(icon) => self.icon = Some(icon),
                Err(e) => warn!(error = %e, "Failed to build tray icon image"),
            }
        }

        let mut nid = self.base_data();
        nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        nid.uCallbackMessage = WM_TRAY_ICON;
        if let Some(icon) = self.icon {
            nid.hIcon = icon;
        }
        copy_wide(&mut nid.szTip, TRAY_TOOLTIP);

        self.added = unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool();
        if self.added {
            info!("Tray icon added");
        } else {
            warn!("Failed to add tray icon; reminders will be skipped");
        }
        self.added
    }

    pub fn remove(&mut self) {
        if !self.added {
            return;
        }
        let nid = self.base_data();
        unsafe {
            let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
        }
        self.added = false;
    }

    /// Show the tray context menu at the cursor
    pub fn show_context_menu(&self) {
        let mut pt = POINT::default();
        unsafe {
            let _ = GetCursorPos(&mut pt);
        }
        ui::popup_menu(self.hwnd, &TRAY_MENU, pt);
    }
}

impl Default for Tray {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Tray {
    fn drop(&mut self) {
        self.remove();
        if let Some(icon) = self.icon.take() {
            unsafe {
                let _ = DestroyIcon(icon);
            }
        }
    }
}

impl Notifier for Tray {
    fn is_visible(&self) -> bool {
        self.added
    }

    fn notify(&mut self, notification: &Notification) {
        if !self.added {
            return;
        }

        let mut nid = self.base_data();
        nid.uFlags = NIF_INFO;
        copy_wide(&mut nid.szInfoTitle, &notification.title);
        copy_wide(&mut nid.szInfo, &notification.body);
        nid.dwInfoFlags = match notification.kind {
            NotificationKind::Info => NIIF_INFO,
            NotificationKind::Warning => NIIF_WARNING,
        };
        // Ignored by Windows Vista and later, where the system decides
        nid.Anonymous.uTimeout = notification.duration.as_millis() as u32;

        if !unsafe { Shell_NotifyIconW(NIM_MODIFY, &nid) }.as_bool() {
            warn!(title = %notification.title, "Failed to show balloon notification");
        }
    }
}
