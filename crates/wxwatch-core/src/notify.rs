//! Notification capability seam.

/// Delivers a user-facing alert to whatever the host environment supports.
///
/// Implementations are best-effort: delivery problems are logged by the
/// implementation and never surfaced to the caller, so a broken desktop
/// notification bus cannot stall the polling loop.
pub trait Notifier {
    fn deliver(&self, title: &str, body: &str);
}
