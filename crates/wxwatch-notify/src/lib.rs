//! Notification sinks for wxwatch.
//!
//! The change detector alerts through the `Notifier` trait; this crate
//! supplies the implementations and picks one for the host platform at
//! startup. Delivery is best-effort everywhere: a sink that cannot reach
//! its backend logs the failure and drops the alert.

mod console;
mod desktop;

pub use console::ConsoleNotifier;
pub use desktop::DesktopNotifier;

use wxwatch_core::Notifier;

/// Pick the best sink the host supports.
pub fn platform_notifier() -> Box<dyn Notifier> {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    {
        Box::new(DesktopNotifier::new())
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        Box::new(ConsoleNotifier)
    }
}
