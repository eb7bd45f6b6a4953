//! Event-subscription lifecycle shared by all event adapters.
//!
//! Each subscription registers exactly one long-lived host listener. Firings
//! pass through in the host's order with no buffering, coalescing, or
//! deduplication; any backpressure policy belongs to the caller.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::Value;

use crate::host::{Host, HostListener, ListenerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Registered,
    Unregistered,
}

/// Handle for one registered host listener.
pub struct Subscription {
    event: &'static str,
    listener_id: ListenerId,
    state: Rc<Cell<SubscriptionState>>,
}

impl Subscription {
    pub fn event(&self) -> &'static str {
        self.event
    }

    pub fn listener_id(&self) -> ListenerId {
        self.listener_id
    }

    pub fn state(&self) -> SubscriptionState {
        self.state.get()
    }

    /// Remove the host listener. Returns false if already removed.
    pub fn unsubscribe(&self, host: &dyn Host) -> bool {
        if self.state.get() == SubscriptionState::Unregistered {
            return false;
        }
        let removed = host.remove_listener(self.event, self.listener_id);
        if removed {
            self.state.set(SubscriptionState::Unregistered);
        }
        removed
    }
}

/// Register one host listener that forwards each firing's positional
/// arguments to `forward`.
pub(crate) fn subscribe(
    host: &dyn Host,
    event: &'static str,
    forward: impl Fn(&[Value]) + 'static,
) -> Subscription {
    let listener: HostListener = Rc::new(forward);
    let listener_id = host.add_listener(event, listener);
    Subscription {
        event,
        listener_id,
        state: Rc::new(Cell::new(SubscriptionState::Registered)),
    }
}

static NULL: Value = Value::Null;

/// Positional event argument, absent-tolerant: a missing position reads as
/// absent, like a missing field.
pub(crate) fn positional(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&NULL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn test_subscribe_registers_one_listener() {
        let host = MockHost::new();
        let sub = subscribe(&host, "tabs.onCreated", |_| {});
        assert_eq!(sub.event(), "tabs.onCreated");
        assert_eq!(sub.state(), SubscriptionState::Registered);
        assert_eq!(host.listener_count("tabs.onCreated"), 1);
    }

    #[test]
    fn test_firings_pass_through_in_order() {
        let host = MockHost::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = subscribe(&host, "tabs.onRemoved", move |args| {
            seen_clone.borrow_mut().push(positional(args, 0).clone());
        });
        for i in 0..4 {
            host.fire_event("tabs.onRemoved", &[json!(i)]);
        }
        assert_eq!(*seen.borrow(), vec![json!(0), json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let host = MockHost::new();
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let sub = subscribe(&host, "tabs.onMoved", move |_| {
            count_clone.set(count_clone.get() + 1);
        });
        host.fire_event("tabs.onMoved", &[]);
        assert!(sub.unsubscribe(&host));
        host.fire_event("tabs.onMoved", &[]);
        assert_eq!(count.get(), 1);
        assert_eq!(sub.state(), SubscriptionState::Unregistered);
        assert!(!sub.unsubscribe(&host));
    }

    #[test]
    fn test_positional_out_of_range_is_null() {
        let args = [json!(1)];
        assert_eq!(positional(&args, 0), &json!(1));
        assert_eq!(positional(&args, 1), &Value::Null);
    }
}
