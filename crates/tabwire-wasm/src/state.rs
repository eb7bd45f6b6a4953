//! Global WASM state — the pending-call and listener registries.
//!
//! WASM is single-threaded, so we use a raw pointer to avoid Rust 2024's
//! `static_mut_refs` restrictions. Access is always safe in single-threaded
//! WASM.

use std::collections::HashMap;

use tabwire_core::host::{HostCallback, HostListener, ListenerId};

/// The complete boundary state: callbacks parked until the host delivers.
pub struct Runtime {
    pub pending: HashMap<u64, HostCallback>,
    pub listeners: HashMap<ListenerId, HostListener>,
    pub next_call_id: u64,
    pub next_listener_id: ListenerId,
}

/// Raw pointer to the heap-allocated runtime. WASM is single-threaded so
/// this is safe.
static mut RT_PTR: *mut Runtime = std::ptr::null_mut();

/// Initialize the global runtime. Replaces any existing runtime, dropping
/// parked callbacks with it.
pub fn init() {
    let rt = Box::new(Runtime {
        pending: HashMap::new(),
        listeners: HashMap::new(),
        next_call_id: 1,
        next_listener_id: 1,
    });
    unsafe {
        if !RT_PTR.is_null() {
            drop(Box::from_raw(RT_PTR));
        }
        RT_PTR = Box::into_raw(rt);
    }
}

/// Get a mutable reference to the runtime. Panics if not initialized.
pub fn get() -> &'static mut Runtime {
    unsafe {
        if RT_PTR.is_null() {
            panic!("tabwire runtime not initialized — call tabwire_init first");
        }
        &mut *RT_PTR
    }
}
