//! Host imports — functions provided by the JS extension runtime.
//!
//! On wasm32 targets these are real extern "C" imports from the host.
//! On native targets (for testing), they are no-op stubs.

#[cfg(target_arch = "wasm32")]
mod ffi {
    unsafe extern "C" {
        pub fn host_call(
            method_ptr: *const u8,
            method_len: u32,
            envelope_ptr: *const u8,
            envelope_len: u32,
        );
        pub fn host_listen(event_ptr: *const u8, event_len: u32, listener_id: u64);
        pub fn host_unlisten(event_ptr: *const u8, event_len: u32, listener_id: u64);
        pub fn host_last_error(out_ptr: *mut u8, max_len: u32) -> u32;
        pub fn host_log(level: i32, msg_ptr: *const u8, msg_len: u32);
    }
}

/// Safe wrapper: issue a namespaced host method call. The envelope is the
/// JSON-encoded [`crate::OutboundCall`]; the host answers through
/// `tabwire_deliver` with the envelope's call id.
pub fn call(method: &str, envelope: &str) {
    #[cfg(target_arch = "wasm32")]
    unsafe {
        ffi::host_call(
            method.as_ptr(),
            method.len() as u32,
            envelope.as_ptr(),
            envelope.len() as u32,
        );
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (method, envelope);
    }
}

/// Safe wrapper: register a host listener that fires back through
/// `tabwire_fire_event` with this listener id.
pub fn listen(event: &str, listener_id: u64) {
    #[cfg(target_arch = "wasm32")]
    unsafe {
        ffi::host_listen(event.as_ptr(), event.len() as u32, listener_id);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (event, listener_id);
    }
}

/// Safe wrapper: remove a host listener.
pub fn unlisten(event: &str, listener_id: u64) {
    #[cfg(target_arch = "wasm32")]
    unsafe {
        ffi::host_unlisten(event.as_ptr(), event.len() as u32, listener_id);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (event, listener_id);
    }
}

/// Safe wrapper: read the host's side-channel error slot. Empty means unset.
pub fn last_error() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let mut buf = [0u8; 512];
        let len = unsafe { ffi::host_last_error(buf.as_mut_ptr(), buf.len() as u32) };
        if len == 0 {
            None
        } else {
            let end = (len as usize).min(buf.len());
            Some(String::from_utf8_lossy(&buf[..end]).into_owned())
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Safe wrapper: log a string at a given level.
pub fn log(level: i32, msg: &str) {
    #[cfg(target_arch = "wasm32")]
    unsafe {
        ffi::host_log(level, msg.as_ptr(), msg.len() as u32);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (level, msg);
    }
}
