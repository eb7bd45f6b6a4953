//! Event-stream adapters for the `tabs` namespace.
//!
//! One long-lived host listener per subscription. Each firing converts the
//! host's positional arguments and forwards them in the host's order —
//! transparent pass-through, no buffering or coalescing.
//!
//! Event payloads are contractually present, so a malformed one converts to
//! its default rather than failing; a payload the table cannot read is a
//! codec defect for tests to catch, not a runtime condition.

use crate::events::{positional, subscribe, Subscription};
use crate::host::Host;

use super::{ActiveInfo, ChangeInfo, HighlightInfo, MoveInfo, RemoveInfo, Tab};

/// Fires when a tab is created. The tab's `url` may still be absent at this
/// point; `on_updated` reports it once set.
pub fn on_created(host: &dyn Host, callback: impl Fn(Tab) + 'static) -> Subscription {
    subscribe(host, "tabs.onCreated", move |args| {
        callback(Tab::from_host(positional(args, 0)).unwrap_or_default());
    })
}

/// Fires when a tab's properties change: `(tab_id, change_info, tab)`.
pub fn on_updated(
    host: &dyn Host,
    callback: impl Fn(i64, ChangeInfo, Tab) + 'static,
) -> Subscription {
    subscribe(host, "tabs.onUpdated", move |args| {
        let tab_id = positional(args, 0).as_i64().unwrap_or_default();
        let change = ChangeInfo::from_host(positional(args, 1)).unwrap_or_default();
        let tab = Tab::from_host(positional(args, 2)).unwrap_or_default();
        callback(tab_id, change, tab);
    })
}

/// Fires when the active tab in a window changes.
pub fn on_activated(host: &dyn Host, callback: impl Fn(ActiveInfo) + 'static) -> Subscription {
    subscribe(host, "tabs.onActivated", move |args| {
        callback(ActiveInfo::from_host(positional(args, 0)).unwrap_or_default());
    })
}

/// Fires when a tab is closed: `(tab_id, remove_info)`.
pub fn on_removed(host: &dyn Host, callback: impl Fn(i64, RemoveInfo) + 'static) -> Subscription {
    subscribe(host, "tabs.onRemoved", move |args| {
        let tab_id = positional(args, 0).as_i64().unwrap_or_default();
        let info = RemoveInfo::from_host(positional(args, 1)).unwrap_or_default();
        callback(tab_id, info);
    })
}

/// Fires when a tab moves within a window: `(tab_id, move_info)`.
pub fn on_moved(host: &dyn Host, callback: impl Fn(i64, MoveInfo) + 'static) -> Subscription {
    subscribe(host, "tabs.onMoved", move |args| {
        let tab_id = positional(args, 0).as_i64().unwrap_or_default();
        let info = MoveInfo::from_host(positional(args, 1)).unwrap_or_default();
        callback(tab_id, info);
    })
}

/// Fires when the highlighted tabs in a window change.
pub fn on_highlighted(
    host: &dyn Host,
    callback: impl Fn(HighlightInfo) + 'static,
) -> Subscription {
    subscribe(host, "tabs.onHighlighted", move |args| {
        callback(HighlightInfo::from_host(positional(args, 0)).unwrap_or_default());
    })
}

/// Fires when a tab is replaced by another, e.g. by prerendering:
/// `(added_tab_id, removed_tab_id)`.
pub fn on_replaced(host: &dyn Host, callback: impl Fn(i64, i64) + 'static) -> Subscription {
    subscribe(host, "tabs.onReplaced", move |args| {
        let added = positional(args, 0).as_i64().unwrap_or_default();
        let removed = positional(args, 1).as_i64().unwrap_or_default();
        callback(added, removed);
    })
}
