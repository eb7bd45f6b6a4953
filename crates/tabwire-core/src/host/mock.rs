use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use super::{Host, HostCallback, HostError, HostListener, ListenerId};

/// One outbound call as the host saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub args: Vec<Value>,
}

/// A mock host for testing. Scripted responses are consumed per method in
/// order; a method with no scripted response completes with `null`, which is
/// how the real host completes a call that failed into the side channel.
///
/// By default callbacks fire during `call` (the synchronous shape). In
/// deferred mode they are queued until [`MockHost::deliver_next`], so tests
/// can observe the `Pending` state.
pub struct MockHost {
    calls: RefCell<Vec<RecordedCall>>,
    responses: RefCell<HashMap<&'static str, Vec<Value>>>,
    pending: RefCell<Vec<(HostCallback, Value)>>,
    listeners: RefCell<HashMap<&'static str, Vec<(ListenerId, HostListener)>>>,
    deferred: Cell<bool>,
    last_error: RefCell<Option<HostError>>,
    next_listener_id: Cell<ListenerId>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            responses: RefCell::new(HashMap::new()),
            pending: RefCell::new(Vec::new()),
            listeners: RefCell::new(HashMap::new()),
            deferred: Cell::new(false),
            last_error: RefCell::new(None),
            next_listener_id: Cell::new(1),
        }
    }

    /// Queue a response for the next call to `method`.
    pub fn with_response(self, method: &'static str, response: Value) -> Self {
        self.responses
            .borrow_mut()
            .entry(method)
            .or_default()
            .push(response);
        self
    }

    /// Queue callbacks instead of firing them during `call`.
    pub fn deferred(self) -> Self {
        self.deferred.set(true);
        self
    }

    /// Populate the side-channel error slot.
    pub fn with_last_error(self, message: impl Into<String>) -> Self {
        *self.last_error.borrow_mut() = Some(HostError {
            message: message.into(),
        });
        self
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Fire the oldest queued callback with its scripted response.
    pub fn deliver_next(&self) -> bool {
        let next = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() {
                return false;
            }
            pending.remove(0)
        };
        (next.0)(&next.1);
        true
    }

    /// Hand back the oldest queued callback without firing it, so tests can
    /// drive it by hand (e.g. fire it twice).
    pub fn take_pending(&self) -> Option<(HostCallback, Value)> {
        let mut pending = self.pending.borrow_mut();
        if pending.is_empty() {
            None
        } else {
            Some(pending.remove(0))
        }
    }

    /// Fire an event to all its listeners, as the host would.
    pub fn fire_event(&self, event: &str, args: &[Value]) {
        let listeners: Vec<HostListener> = self
            .listeners
            .borrow()
            .get(event)
            .map(|subs| subs.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();
        for listener in listeners {
            listener(args);
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .get(event)
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    fn next_response(&self, method: &'static str) -> Value {
        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(method) {
            Some(queue) if !queue.is_empty() => queue.remove(0),
            _ => Value::Null,
        }
    }
}

impl Host for MockHost {
    fn call(&self, method: &'static str, args: Vec<Value>, callback: HostCallback) {
        self.calls.borrow_mut().push(RecordedCall { method, args });
        let response = self.next_response(method);
        if self.deferred.get() {
            self.pending.borrow_mut().push((callback, response));
        } else {
            callback(&response);
        }
    }

    fn add_listener(&self, event: &'static str, listener: HostListener) -> ListenerId {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .entry(event)
            .or_default()
            .push((id, listener));
        id
    }

    fn remove_listener(&self, event: &'static str, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(subs) = listeners.get_mut(event) {
            let before = subs.len();
            subs.retain(|(listener_id, _)| *listener_id != id);
            subs.len() < before
        } else {
            false
        }
    }

    fn last_error(&self) -> Option<HostError> {
        self.last_error.borrow().clone()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}
