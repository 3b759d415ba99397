use std::ffi::CStr;

use cocoa::base::{id, nil};
use cocoa::foundation::NSString;
use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation, CGKeyCode};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use objc::{class, msg_send, sel, sel_impl};

use super::FrontmostApp;
use crate::shared::errors::{AppError, AppResult};

// ANSI key code for V
const K_VK_ANSI_V: CGKeyCode = 0x09;

/// NSApplicationActivateIgnoringOtherApps
const ACTIVATE_IGNORING_OTHER_APPS: usize = 1;

/// Whether the process may post synthetic events (AXIsProcessTrusted)
pub fn check_accessibility_permissions() -> bool {
    #[link(name = "ApplicationServices", kind = "framework")]
    extern "C" {
        fn AXIsProcessTrusted() -> bool;
    }
    unsafe { AXIsProcessTrusted() }
}

/// Same check, but shows the system prompt when not yet trusted.
///
/// A grant only takes effect after the app restarts.
pub fn ensure_accessibility_permissions() -> bool {
    use core_foundation::base::TCFType;
    use core_foundation::boolean::CFBoolean;
    use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
    use core_foundation::string::CFString;

    #[link(name = "ApplicationServices", kind = "framework")]
    extern "C" {
        fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
    }

    let key = CFString::from_static_string("AXTrustedCheckOptionPrompt");
    let value = CFBoolean::true_value();
    let options = CFDictionary::from_CFType_pairs(&[(key.as_CFType(), value.as_CFType())]);

    let trusted = unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) };
    if trusted {
        tracing::info!("accessibility permissions granted");
    } else {
        tracing::warn!("accessibility permissions not granted, system prompt shown");
    }
    trusted
}

unsafe fn ns_string_to_owned(value: id) -> Option<String> {
    if value == nil {
        return None;
    }
    let ptr = NSString::UTF8String(value);
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

/// The frontmost application, via NSWorkspace
pub fn frontmost_app() -> AppResult<FrontmostApp> {
    unsafe {
        let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
        let front_app: id = msg_send![workspace, frontmostApplication];
        if front_app == nil {
            return Err(AppError::System("no frontmost application".to_string()));
        }

        let pid: i32 = msg_send![front_app, processIdentifier];
        let name: id = msg_send![front_app, localizedName];
        Ok(FrontmostApp {
            pid,
            name: ns_string_to_owned(name).unwrap_or_else(|| "Unknown".to_string()),
        })
    }
}

/// Re-activate `app`, looked up by process id
pub fn restore_focus(app: &FrontmostApp) -> AppResult<()> {
    unsafe {
        let running: id = msg_send![
            class!(NSRunningApplication),
            runningApplicationWithProcessIdentifier: app.pid
        ];
        if running == nil {
            return Err(AppError::System(format!(
                "application '{}' (pid {}) is no longer running",
                app.name, app.pid
            )));
        }

        let activated: bool = msg_send![running, activateWithOptions: ACTIVATE_IGNORING_OTHER_APPS];
        if !activated {
            return Err(AppError::System(format!("failed to activate '{}'", app.name)));
        }
    }

    tracing::debug!(app = %app.name, pid = app.pid, "focus restored");
    Ok(())
}

fn simulate_keypress(key_code: CGKeyCode, flags: CGEventFlags) -> AppResult<()> {
    let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
        .map_err(|_| AppError::System("failed to create CGEventSource".to_string()))?;

    let key_down = CGEvent::new_keyboard_event(source.clone(), key_code, true)
        .map_err(|_| AppError::System("failed to create key down event".to_string()))?;
    key_down.set_flags(flags);
    key_down.post(CGEventTapLocation::HID);

    let key_up = CGEvent::new_keyboard_event(source, key_code, false)
        .map_err(|_| AppError::System("failed to create key up event".to_string()))?;
    key_up.set_flags(flags);
    key_up.post(CGEventTapLocation::HID);

    Ok(())
}

/// Post Cmd+V to whichever app has focus
pub fn simulate_cmd_v() -> AppResult<()> {
    if !check_accessibility_permissions() {
        return Err(AppError::AccessibilityDenied);
    }
    simulate_keypress(K_VK_ANSI_V, CGEventFlags::CGEventFlagCommand)
}
