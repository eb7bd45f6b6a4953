//! The seam between the adapters and the host platform.
//!
//! One [`Host`] implementation exists per platform binding; tests use the
//! [`MockHost`] double. Method and event names are the host's own namespaced
//! names (`tabs.get`, `tabs.onUpdated`), and argument order is the host's
//! documented positional order.

mod mock;

pub use mock::{MockHost, RecordedCall};

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies a registered event listener for later removal.
pub type ListenerId = u64;

/// Host-native completion callback for one method call.
///
/// `Fn` rather than `FnOnce`: the host owns the invocation and nothing stops
/// a misbehaving host from firing twice. The single-fire guard lives in the
/// call handle, not here.
pub type HostCallback = Rc<dyn Fn(&Value)>;

/// Host-native event listener: positional arguments, fired zero or more
/// times until removed.
pub type HostListener = Rc<dyn Fn(&[Value])>;

/// The host's out-of-band failure slot, readable within a callback's dynamic
/// scope. A set error never alters delivery — the continuation still fires,
/// with no result; checking the slot is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("host error: {message}")]
pub struct HostError {
    pub message: String,
}

/// The host platform's callback/event API surface.
///
/// Single-threaded by design: the host runs a cooperative event loop, so
/// callbacks are `Rc` and the trait carries no `Send` bounds.
pub trait Host {
    /// Invoke a namespaced host method with positional arguments, supplying
    /// the single host-native completion callback.
    fn call(&self, method: &'static str, args: Vec<Value>, callback: HostCallback);

    /// Register a long-lived listener on a namespaced host event.
    fn add_listener(&self, event: &'static str, listener: HostListener) -> ListenerId;

    /// Remove a previously registered listener. Returns false if unknown.
    fn remove_listener(&self, event: &'static str, id: ListenerId) -> bool;

    /// Read the side-channel error slot.
    fn last_error(&self) -> Option<HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        let err = HostError {
            message: "No tab with id: 42.".to_owned(),
        };
        assert_eq!(err.to_string(), "host error: No tab with id: 42.");
    }

    #[test]
    fn test_host_error_crosses_boundary_as_json() {
        let err = HostError {
            message: "gone".to_owned(),
        };
        let json = serde_json::to_string(&err).unwrap();
        let parsed: HostError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, err);
    }
}
