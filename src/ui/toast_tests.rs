#![allow(clippy::unwrap_used)]

use std::time::{Duration, Instant};

use super::toast::*;

#[test]
fn test_kind_defaults_to_success() {
    assert_eq!(ToastKind::default(), ToastKind::Success);
    assert_ne!(ToastKind::Danger.icon(), ToastKind::Success.icon());
}

#[test]
fn test_toasts_stack_in_order() {
    let now = Instant::now();
    let mut host = ToastHost::new();
    assert!(host.is_empty());
    host.push("first", ToastKind::Success, now);
    host.push("second", ToastKind::Warning, now);
    let messages: Vec<&str> = host.toasts().iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second"]);
}

#[test]
fn test_toast_auto_dismiss() {
    let start = Instant::now();
    let mut host = ToastHost::new();
    host.push("old", ToastKind::Info, start);
    host.push("new", ToastKind::Info, start + Duration::from_millis(2000));

    assert_eq!(host.prune(start + Duration::from_millis(3199)), 0);
    assert_eq!(host.prune(start + TOAST_DURATION), 1);
    assert_eq!(host.toasts().len(), 1);
    assert_eq!(host.toasts()[0].message, "new");
    assert_eq!(host.prune(start + Duration::from_millis(5200)), 1);
    assert!(host.is_empty());
}

#[test]
fn test_toast_explicit_dismiss() {
    let now = Instant::now();
    let mut host = ToastHost::new();
    let a = host.push("a", ToastKind::Success, now);
    let b = host.push("b", ToastKind::Danger, now);
    assert!(host.dismiss(a));
    assert!(!host.dismiss(a));
    assert_eq!(host.toasts()[0].id, b);
    assert!(host.dismiss_latest());
    assert!(!host.dismiss_latest());
}

#[test]
fn test_toast_ids_are_unique() {
    let now = Instant::now();
    let mut host = ToastHost::new();
    let a = host.push("a", ToastKind::Success, now);
    host.dismiss(a);
    let b = host.push("b", ToastKind::Success, now);
    assert_ne!(a, b);
}

#[test]
fn test_toast_expiry_before_shown() {
    let now = Instant::now();
    let toast = Toast {
        id: 0,
        message: String::new(),
        kind: ToastKind::Info,
        shown_at: now + Duration::from_secs(1),
    };
    assert!(!toast.is_expired(now));
}
