use chrono::{DateTime, Duration, Local};

pub const TOAST_LIFETIME_MS: i64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Notice,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: DateTime<Local>,
}

/// Fire-and-forget message display.
pub trait Notifier {
    fn show(&mut self, kind: ToastKind, message: &str);
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&mut self, kind: ToastKind, message: &str, now: DateTime<Local>) {
        self.toasts.push(Toast {
            kind,
            message: message.to_string(),
            shown_at: now,
        });
    }

    /// Drop toasts older than the display lifetime.
    pub fn prune(&mut self, now: DateTime<Local>) {
        let lifetime = Duration::milliseconds(TOAST_LIFETIME_MS);
        self.toasts.retain(|t| now - t.shown_at < lifetime);
    }

    /// Newest toast still on screen.
    pub fn current(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Live toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn show(&mut self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Notice => tracing::info!(message, "toast"),
            ToastKind::Error => tracing::warn!(message, "toast"),
        }
        self.push_at(kind, message, Local::now());
    }
}
