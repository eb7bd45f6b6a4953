//! Boundary conversion between Rust callers and a browser extension host's
//! callback/event API (`tabs.*`, `runtime.onMessage`).
//!
//! Two cooperating pieces, both stateless with respect to host data:
//!
//! - the **value codec** ([`values`] plus the record tables in [`tabs`] and
//!   [`messaging`]): pure conversion between the host's camelCase JSON
//!   objects and snake_case Rust structs — `Option<T>` for host-optional
//!   fields, closed enums for the host's string-literal sets;
//! - the **call adapter** ([`calls`], [`events`], and the adapter functions
//!   in [`tabs`] and [`messaging`]): one wrapper per host entry point, owning
//!   argument shaping, invocation through the [`host::Host`] seam, and
//!   exactly-once delivery for method calls or in-order pass-through for
//!   event streams.
//!
//! All platform behavior lives in the host. Failures it signals out-of-band
//! are readable via [`host::Host::last_error`] within a callback's dynamic
//! scope and never interrupt delivery.

pub mod calls;
pub mod events;
pub mod host;
pub mod messaging;
pub mod tabs;
pub mod values;
