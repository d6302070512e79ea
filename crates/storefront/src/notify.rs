//! Ephemeral toast notifications.
//!
//! At most one toast exists at a time. Each toast walks a fixed lifecycle
//! driven by a single scheduler task:
//!
//! ```text
//! Hidden --show_delay--> Visible --display--> Hiding --removal_delay--> Removed
//! ```
//!
//! Raising a new toast aborts the previous scheduler and replaces the toast
//! immediately. The current toast is published on a `tokio::sync::watch`
//! channel; `None` means nothing is on screen.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::NotificationTiming;

/// Severity of a toast, rendered as its `toast-<kind>` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Lifecycle phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Inserted but not yet shown, so the enter transition can run.
    Hidden,
    /// On screen.
    Visible,
    /// Exit transition running.
    Hiding,
    /// Gone.
    Removed,
}

impl ToastPhase {
    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::Visible),
            Self::Visible => Some(Self::Hiding),
            Self::Hiding => Some(Self::Removed),
            Self::Removed => None,
        }
    }

    /// How long a toast stays in this phase.
    #[must_use]
    pub const fn dwell(self, timing: &NotificationTiming) -> Option<Duration> {
        match self {
            Self::Hidden => Some(timing.show_delay),
            Self::Visible => Some(timing.display),
            Self::Hiding => Some(timing.removal_delay),
            Self::Removed => None,
        }
    }
}

/// A message to show the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: ToastKind,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

/// The toast currently owned by the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Increases with every toast raised.
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

/// Raises toasts and schedules their lifecycle.
#[derive(Debug)]
pub struct Notifier {
    timing: NotificationTiming,
    state: Arc<watch::Sender<Option<Toast>>>,
    next_id: u64,
    scheduler: Option<JoinHandle<()>>,
}

impl Notifier {
    #[must_use]
    pub fn new(timing: NotificationTiming) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            timing,
            state: Arc::new(state),
            next_id: 1,
            scheduler: None,
        }
    }

    /// Watch the current toast.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Toast>> {
        self.state.subscribe()
    }

    /// The toast on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<Toast> {
        self.state.borrow().clone()
    }

    /// Raise `notice`, superseding any current toast. Returns the new toast id.
    ///
    /// The lifecycle needs a Tokio runtime to expire the toast. Outside one the
    /// notice is logged and nothing is shown.
    pub fn notify(&mut self, notice: Notice) -> u64 {
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.abort();
        }

        let id = self.next_id;
        self.next_id += 1;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(id, message = %notice.message, "No runtime to schedule toast, dropped");
            self.state.send_replace(None);
            return id;
        };

        tracing::debug!(id, kind = notice.kind.as_str(), message = %notice.message, "Toast raised");

        self.state.send_replace(Some(Toast {
            id,
            message: notice.message,
            kind: notice.kind,
            phase: ToastPhase::Hidden,
        }));
        self.scheduler = Some(runtime.spawn(run_lifecycle(
            Arc::clone(&self.state),
            id,
            self.timing,
        )));
        id
    }

    /// Remove the current toast without waiting for its lifecycle.
    pub fn dismiss(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.abort();
        }
        self.state.send_replace(None);
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.abort();
        }
    }
}

/// Advance toast `id` through its phases, stopping if it is superseded.
async fn run_lifecycle(
    state: Arc<watch::Sender<Option<Toast>>>,
    id: u64,
    timing: NotificationTiming,
) {
    let mut phase = ToastPhase::Hidden;

    while let (Some(dwell), Some(next)) = (phase.dwell(&timing), phase.next()) {
        tokio::time::sleep(dwell).await;
        phase = next;

        let still_current = state.send_if_modified(|current| match current {
            Some(toast) if toast.id == id => {
                if phase == ToastPhase::Removed {
                    *current = None;
                } else {
                    toast.phase = phase;
                }
                true
            }
            _ => false,
        });

        if !still_current {
            return;
        }
    }
}
