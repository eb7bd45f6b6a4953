//! Call-handle lifecycle for method-call adapters.
//!
//! Every bound host entry point is classified up front into exactly one
//! delivery shape, and each method call is tracked by a [`CallHandle`] that
//! guarantees the continuation fires at most once, no matter what the host
//! does with its callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use crate::host::{Host, HostCallback};

/// Delivery shape of one host entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// Completes within the invocation turn; the handle never shows
    /// `Pending`. The bound `tabs` surface is callback-only, so no current
    /// entry point carries this shape, but the machinery supports hosts that
    /// complete synchronously.
    SyncCall,
    /// The host defers delivery to a later event-loop turn.
    AsyncCall,
    /// Long-lived listener, fires zero or more times until removed.
    EventStream,
}

/// Every bound entry point with its shape.
pub const ENTRY_POINTS: &[(&str, CallShape)] = &[
    ("tabs.get", CallShape::AsyncCall),
    ("tabs.query", CallShape::AsyncCall),
    ("tabs.create", CallShape::AsyncCall),
    ("tabs.update", CallShape::AsyncCall),
    ("tabs.remove", CallShape::AsyncCall),
    ("tabs.duplicate", CallShape::AsyncCall),
    ("tabs.reload", CallShape::AsyncCall),
    ("tabs.sendMessage", CallShape::AsyncCall),
    ("tabs.getZoom", CallShape::AsyncCall),
    ("tabs.setZoom", CallShape::AsyncCall),
    ("tabs.getZoomSettings", CallShape::AsyncCall),
    ("tabs.setZoomSettings", CallShape::AsyncCall),
    ("tabs.onCreated", CallShape::EventStream),
    ("tabs.onUpdated", CallShape::EventStream),
    ("tabs.onActivated", CallShape::EventStream),
    ("tabs.onRemoved", CallShape::EventStream),
    ("tabs.onMoved", CallShape::EventStream),
    ("tabs.onHighlighted", CallShape::EventStream),
    ("tabs.onReplaced", CallShape::EventStream),
    ("runtime.onMessage", CallShape::EventStream),
];

/// Look up the shape of a bound entry point.
pub fn classify(entry_point: &str) -> Option<CallShape> {
    ENTRY_POINTS
        .iter()
        .find(|(name, _)| *name == entry_point)
        .map(|(_, shape)| *shape)
}

/// Lifecycle of one method call. Terminal state is `Fulfilled`; there is no
/// failed state, because host failures travel through the side channel and
/// still fulfill the call with an absent result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    /// Arguments converted, host call issued.
    Created,
    /// Awaiting the host callback on a later event-loop turn.
    Pending,
    /// Callback fired and continuation invoked.
    Fulfilled,
}

/// Tracks one request from issuance to fulfillment.
#[derive(Clone)]
pub struct CallHandle {
    state: Rc<Cell<CallState>>,
}

impl CallHandle {
    pub fn state(&self) -> CallState {
        self.state.get()
    }

    pub fn is_fulfilled(&self) -> bool {
        self.state.get() == CallState::Fulfilled
    }
}

/// Issue one method call. The host callback may fire during `call` (a
/// synchronous host) or on a later turn; either way the continuation runs at
/// most once and the handle ends `Fulfilled`. A second firing of the host
/// callback is ignored.
pub(crate) fn issue<T, D, K>(
    host: &dyn Host,
    method: &'static str,
    args: Vec<Value>,
    decode: D,
    done: K,
) -> CallHandle
where
    T: 'static,
    D: Fn(&Value) -> T + 'static,
    K: FnOnce(T) + 'static,
{
    let state = Rc::new(Cell::new(CallState::Created));
    let continuation: Rc<RefCell<Option<Box<dyn FnOnce(T)>>>> =
        Rc::new(RefCell::new(Some(Box::new(done))));
    let callback_state = Rc::clone(&state);
    let callback: HostCallback = Rc::new(move |result: &Value| {
        let taken = continuation.borrow_mut().take();
        if let Some(k) = taken {
            callback_state.set(CallState::Fulfilled);
            k(decode(result));
        }
    });
    host.call(method, args, callback);
    if state.get() == CallState::Created {
        state.set(CallState::Pending);
    }
    CallHandle { state }
}
