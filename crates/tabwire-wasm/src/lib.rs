mod host;
mod state;

use std::rc::Rc;

use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::Value;
use tabwire_core::host::{Host, HostCallback, HostError, HostListener, ListenerId};

// ── BrowserHost ──────────────────────────────────────────────────────
// Routes adapter calls out through the JS imports and parks the Rust
// callbacks until the host delivers through the trampoline exports below.

/// Outbound call envelope handed to the JS side.
#[derive(Serialize)]
struct OutboundCall<'a> {
    id: u64,
    method: &'a str,
    args: &'a [Value],
}

/// `Host` implementation backed by the JS extension runtime.
pub struct BrowserHost;

impl Host for BrowserHost {
    fn call(&self, method: &'static str, args: Vec<Value>, callback: HostCallback) {
        let rt = state::get();
        let id = rt.next_call_id;
        rt.next_call_id += 1;
        let envelope = OutboundCall {
            id,
            method,
            args: &args,
        };
        match serde_json::to_string(&envelope) {
            Ok(json) => {
                rt.pending.insert(id, callback);
                host::call(method, &json);
            }
            Err(e) => {
                host::log(0, &format!("tabwire: failed to encode call {method}: {e}"));
            }
        }
    }

    fn add_listener(&self, event: &'static str, listener: HostListener) -> ListenerId {
        let rt = state::get();
        let id = rt.next_listener_id;
        rt.next_listener_id += 1;
        rt.listeners.insert(id, listener);
        host::listen(event, id);
        id
    }

    fn remove_listener(&self, event: &'static str, id: ListenerId) -> bool {
        let rt = state::get();
        if rt.listeners.remove(&id).is_some() {
            host::unlisten(event, id);
            true
        } else {
            false
        }
    }

    fn last_error(&self) -> Option<HostError> {
        host::last_error().map(|message| HostError { message })
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn read_str(ptr: *const u8, len: u32) -> Option<&'static str> {
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len as usize) };
    std::str::from_utf8(bytes).ok()
}

// ── LIFECYCLE EXPORTS ────────────────────────────────────────────────

/// Initialize the tabwire boundary. Returns 0 on success.
#[unsafe(no_mangle)]
pub extern "C" fn tabwire_init() -> i32 {
    state::init();
    host::log(2, "tabwire: boundary initialized");
    0
}

/// Allocate memory in WASM linear memory (for host to write into).
#[unsafe(no_mangle)]
pub extern "C" fn tabwire_alloc(size: u32) -> *mut u8 {
    let layout = std::alloc::Layout::from_size_align(size as usize, 1).unwrap();
    unsafe { std::alloc::alloc(layout) }
}

/// Deallocate memory in WASM linear memory.
#[unsafe(no_mangle)]
pub extern "C" fn tabwire_dealloc(ptr: *mut u8, size: u32) {
    let layout = std::alloc::Layout::from_size_align(size as usize, 1).unwrap();
    unsafe { std::alloc::dealloc(ptr, layout) }
}

// ── TRAMPOLINE EXPORTS ───────────────────────────────────────────────

fn deliver_inner(call_id: u64, json: &str) -> anyhow::Result<()> {
    let result: Value = serde_json::from_str(json).context("malformed result payload")?;
    let callback = state::get()
        .pending
        .remove(&call_id)
        .ok_or_else(|| anyhow!("unknown call id {call_id}"))?;
    callback(&result);
    Ok(())
}

/// Deliver a host callback result for a pending call (completes the async
/// trampoline). The payload is the JSON-encoded callback argument, `null`
/// when the host callback received none.
/// Returns 0 on success, -1 on invalid utf-8, -2 on any other failure
/// (logged).
#[unsafe(no_mangle)]
pub extern "C" fn tabwire_deliver(call_id: u64, json_ptr: *const u8, json_len: u32) -> i32 {
    let json = match read_str(json_ptr, json_len) {
        Some(s) => s,
        None => return -1,
    };
    match deliver_inner(call_id, json) {
        Ok(()) => 0,
        Err(e) => {
            host::log(1, &format!("tabwire: deliver failed: {e:#}"));
            -2
        }
    }
}

fn fire_inner(listener_id: ListenerId, json: &str) -> anyhow::Result<()> {
    let args: Vec<Value> = serde_json::from_str(json).context("malformed event payload")?;
    // Clone out of the registry before invoking: the listener stays
    // registered and may itself issue calls that touch the runtime.
    let listener = state::get()
        .listeners
        .get(&listener_id)
        .map(Rc::clone)
        .ok_or_else(|| anyhow!("unknown listener id {listener_id}"))?;
    listener(&args);
    Ok(())
}

/// Dispatch one event firing to a registered listener. The payload is the
/// JSON array of the host's positional event arguments.
/// Returns 0 on success, -1 on invalid utf-8, -2 on any other failure
/// (logged).
#[unsafe(no_mangle)]
pub extern "C" fn tabwire_fire_event(
    listener_id: u64,
    json_ptr: *const u8,
    json_len: u32,
) -> i32 {
    let json = match read_str(json_ptr, json_len) {
        Some(s) => s,
        None => return -1,
    };
    match fire_inner(listener_id, json) {
        Ok(()) => 0,
        Err(e) => {
            host::log(1, &format!("tabwire: event dispatch failed: {e:#}"));
            -2
        }
    }
}

// ── TESTS ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use tabwire_core::calls::CallState;
    use tabwire_core::tabs;

    // One test owns the global runtime end to end: the harness runs tests on
    // multiple threads and the raw-pointer state is single-threaded by design.
    #[test]
    fn test_boundary_round_trip() {
        assert_eq!(tabwire_init(), 0);

        // Method call: issue through the core adapter, deliver by call id.
        let got = Rc::new(RefCell::new(None));
        let got_clone = Rc::clone(&got);
        let handle = tabs::get(&BrowserHost, 7, move |tab| {
            *got_clone.borrow_mut() = tab;
        });
        assert_eq!(handle.state(), CallState::Pending);
        assert_eq!(state::get().pending.len(), 1);

        let payload = json!({
            "id": 7, "index": 0, "windowId": 3, "pinned": false,
            "highlighted": false, "active": true, "incognito": false,
            "frozen": false, "groupId": -1
        })
        .to_string();
        assert_eq!(
            tabwire_deliver(1, payload.as_ptr(), payload.len() as u32),
            0
        );
        assert!(handle.is_fulfilled());
        assert!(state::get().pending.is_empty());
        let tab = got.borrow().clone().unwrap();
        assert_eq!(tab.id, Some(7));
        assert_eq!(tab.window_id, 3);
        assert_eq!(tab.url, None);

        // Delivering the same call id again is an error, not a second fire.
        assert_eq!(
            tabwire_deliver(1, payload.as_ptr(), payload.len() as u32),
            -2
        );

        // Event stream: subscribe, fire twice in order, unsubscribe.
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let sub = tabs::on_activated(&BrowserHost, move |info| {
            seen_clone.borrow_mut().push(info.tab_id);
        });
        let firing = |tab_id: i64| json!([{"tabId": tab_id, "windowId": 1}]).to_string();
        for tab_id in [4, 9] {
            let args = firing(tab_id);
            assert_eq!(
                tabwire_fire_event(sub.listener_id(), args.as_ptr(), args.len() as u32),
                0
            );
        }
        assert_eq!(*seen.borrow(), vec![4, 9]);
        assert!(sub.unsubscribe(&BrowserHost));
        let args = firing(2);
        assert_eq!(
            tabwire_fire_event(sub.listener_id(), args.as_ptr(), args.len() as u32),
            -2
        );
        assert_eq!(*seen.borrow(), vec![4, 9]);

        // Malformed payloads are rejected without panicking.
        let bad = b"not json";
        assert_eq!(tabwire_deliver(99, bad.as_ptr(), bad.len() as u32), -2);
        let invalid: &[u8] = &[0xFF, 0xFE];
        assert_eq!(tabwire_deliver(99, invalid.as_ptr(), invalid.len() as u32), -1);
    }

    #[test]
    fn test_alloc_dealloc() {
        let ptr = tabwire_alloc(1024);
        assert!(!ptr.is_null());
        unsafe {
            std::ptr::write(ptr, 42u8);
            assert_eq!(std::ptr::read(ptr), 42u8);
        }
        tabwire_dealloc(ptr, 1024);
    }

    #[test]
    fn test_read_str() {
        let bytes = b"tabs.get";
        assert_eq!(read_str(bytes.as_ptr(), bytes.len() as u32), Some("tabs.get"));
        let invalid: &[u8] = &[0xFF, 0xFE];
        assert_eq!(read_str(invalid.as_ptr(), invalid.len() as u32), None);
    }
}
