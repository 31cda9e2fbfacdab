//! Desktop popup delivery via the platform's notification command.

use wxwatch_core::Notifier;

/// Sink backed by `notify-send` (Linux) or `osascript` (macOS). On other
/// platforms it degrades to console output.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn deliver(&self, title: &str, body: &str) {
        if let Err(e) = dispatch(title, body) {
            tracing::warn!("notification delivery failed: {e}");
        }
    }
}

#[cfg(target_os = "linux")]
fn dispatch(title: &str, body: &str) -> std::io::Result<()> {
    let status = std::process::Command::new("notify-send")
        .arg(title)
        .arg(body)
        .status()?;
    if !status.success() {
        return Err(std::io::Error::other(format!(
            "notify-send exited with {status}"
        )));
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn dispatch(title: &str, body: &str) -> std::io::Result<()> {
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape_osascript(body),
        escape_osascript(title)
    );
    let status = std::process::Command::new("osascript")
        .arg("-e")
        .arg(script)
        .status()?;
    if !status.success() {
        return Err(std::io::Error::other(format!(
            "osascript exited with {status}"
        )));
    }
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn dispatch(title: &str, body: &str) -> std::io::Result<()> {
    println!("Notification: {title} - {body}");
    Ok(())
}

/// AppleScript string literals only need backslash and double-quote
/// escaping.
#[cfg(target_os = "macos")]
fn escape_osascript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
