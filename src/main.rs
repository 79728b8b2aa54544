// Prevents console window in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// The core builds everywhere; only the Windows shell drives it
#![cfg_attr(not(windows), allow(dead_code))]

mod config;
mod error;
mod eye;
mod gaze;
mod geometry;
mod reminders;
mod surface;
#[cfg(windows)]
mod tray;
#[cfg(windows)]
mod ui;

use error::AppError;

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vague_reminder=info")),
        )
        .init();

    run()
}

#[cfg(windows)]
fn run() -> Result<(), AppError> {
    use tracing::info;
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, TranslateMessage, MSG,
    };

    // Single-instance check
    if is_already_running() {
        info!("Already watching from another process");
        return Ok(());
    }

    let cfg = config::load_config();
    let window = ui::EyeWindow::create(&cfg)?;
    window.show();

    // Win32 message loop
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    // Tears down the window, its timers and the tray icon
    drop(window);
    info!("Banished");
    Ok(())
}

#[cfg(not(windows))]
fn run() -> Result<(), AppError> {
    tracing::error!("The eye only opens on a Windows desktop");
    Err(AppError::UnsupportedPlatform)
}

#[cfg(windows)]
const SINGLE_INSTANCE_MUTEX: &str = "VagueReminderMutex\0";

/// Check if another instance is already running
#[cfg(windows)]
fn is_already_running() -> bool {
    use windows::core::PCWSTR;
    use windows::Win32::System::Threading::{
        CreateMutexW, OpenMutexW, SYNCHRONIZATION_ACCESS_RIGHTS,
    };

    let name: Vec<u16> = SINGLE_INSTANCE_MUTEX.encode_utf16().collect();

    unsafe {
        // Try to open existing mutex
        let existing = OpenMutexW(
            SYNCHRONIZATION_ACCESS_RIGHTS(0x001F0001), // MUTEX_ALL_ACCESS
            false,
            PCWSTR(name.as_ptr()),
        );
        if existing.is_ok() {
            return true;
        }

        // Create the mutex; the handle lives as long as the process
        let _ = CreateMutexW(None, true, PCWSTR(name.as_ptr()));
        false
    }
}
