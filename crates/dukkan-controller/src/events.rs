//! Events emitted by controllers for the hosting UI to react to.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// What a transient failure notice is about. Each mutation kind raises a
/// distinguishable notice so the UI can word them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    ToggleFailed,
    DeleteFailed,
    UploadFailed,
}

/// Out-of-band controller output: side effects the rendering layer must
/// perform but which are not part of the list phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Credentials were rejected and have been cleared; navigate to login.
    RedirectToLogin,
    /// A mutation failed and was rolled back.
    Notice { kind: NoticeKind, message: String },
}

/// Creates the controller event channel.
pub fn channel() -> (
    UnboundedSender<ControllerEvent>,
    UnboundedReceiver<ControllerEvent>,
) {
    unbounded_channel()
}
