use std::time::{Duration, Instant};

/// How long a toast stays up unless dismissed.
pub(crate) const TOAST_DURATION: Duration = Duration::from_millis(3200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ToastKind {
    #[default]
    Success,
    Warning,
    Danger,
    Info,
}

impl ToastKind {
    pub(crate) fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Warning => "!",
            Self::Danger => "✖",
            Self::Info => "i",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Toast {
    pub(crate) id: u64,
    pub(crate) message: String,
    pub(crate) kind: ToastKind,
    pub(crate) shown_at: Instant,
}

impl Toast {
    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_DURATION
    }
}

/// Stack of live toasts, oldest first.
#[derive(Debug, Default)]
pub(crate) struct ToastHost {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            shown_at: now,
        });
        id
    }

    /// Drop expired toasts; returns how many were removed.
    pub(crate) fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }

    pub(crate) fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        before != self.toasts.len()
    }

    pub(crate) fn dismiss_latest(&mut self) -> bool {
        match self.toasts.last().map(|t| t.id) {
            Some(id) => self.dismiss(id),
            None => false,
        }
    }

    pub(crate) fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
