//! Records and enumerations of the host's `tabs` namespace, with their
//! conversion tables, plus the method and event adapters built on them.
//!
//! Each record's `from_host`/`to_host` pair is the single authoritative field
//! mapping between the host's camelCase objects and these snake_case structs.
//! The two directions are kept adjacent and must list the same fields: a
//! field present in one direction but not the other is a silent data-loss
//! bug. No reflection or name transformation — every field is named exactly
//! once per direction so the mapping stays auditable.
//!
//! Enumeration tables tolerate unknown literals: the host's literal sets are
//! versioned independently of this adapter, so an unrecognized literal reads
//! as absent rather than failing.

mod events;
mod methods;

pub use events::{
    on_activated, on_created, on_highlighted, on_moved, on_removed, on_replaced, on_updated,
};
pub use methods::{
    create, duplicate, get, get_zoom, get_zoom_settings, query, reload, remove, set_zoom,
    set_zoom_settings, update,
};

use serde_json::Value;

use crate::values::{
    field, opt_bool, opt_f64, opt_i64, opt_str, req_bool, req_i64, set, set_opt, HostObject,
};

// ── Enumerations ─────────────────────────────────────────────────────

/// Lifecycle status of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStatus {
    Unloaded,
    Loading,
    Complete,
}

impl TabStatus {
    pub fn from_host(literal: &str) -> Option<Self> {
        match literal {
            "unloaded" => Some(Self::Unloaded),
            "loading" => Some(Self::Loading),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }

    pub fn as_host(self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Complete => "complete",
        }
    }
}

/// Why a tab was muted or unmuted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutedInfoReason {
    /// A user input action set the muted state.
    User,
    /// Tab capture muted the tab.
    Capture,
    /// An extension set the muted state.
    Extension,
}

impl MutedInfoReason {
    pub fn from_host(literal: &str) -> Option<Self> {
        match literal {
            "user" => Some(Self::User),
            "capture" => Some(Self::Capture),
            "extension" => Some(Self::Extension),
            _ => None,
        }
    }

    pub fn as_host(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Capture => "capture",
            Self::Extension => "extension",
        }
    }
}

/// The type of window a tab belongs to, as used in query filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Normal,
    Popup,
    Panel,
    App,
    Devtools,
}

impl WindowType {
    pub fn from_host(literal: &str) -> Option<Self> {
        match literal {
            "normal" => Some(Self::Normal),
            "popup" => Some(Self::Popup),
            "panel" => Some(Self::Panel),
            "app" => Some(Self::App),
            "devtools" => Some(Self::Devtools),
            _ => None,
        }
    }

    pub fn as_host(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Popup => "popup",
            Self::Panel => "panel",
            Self::App => "app",
            Self::Devtools => "devtools",
        }
    }
}

/// How zoom changes are handled by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomSettingsMode {
    Automatic,
    Manual,
    Disabled,
}

impl ZoomSettingsMode {
    pub fn from_host(literal: &str) -> Option<Self> {
        match literal {
            "automatic" => Some(Self::Automatic),
            "manual" => Some(Self::Manual),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    pub fn as_host(self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Manual => "manual",
            Self::Disabled => "disabled",
        }
    }
}

/// Whether zoom changes persist per origin or per tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomSettingsScope {
    PerOrigin,
    PerTab,
}

impl ZoomSettingsScope {
    pub fn from_host(literal: &str) -> Option<Self> {
        match literal {
            "per-origin" => Some(Self::PerOrigin),
            "per-tab" => Some(Self::PerTab),
            _ => None,
        }
    }

    pub fn as_host(self) -> &'static str {
        match self {
            Self::PerOrigin => "per-origin",
            Self::PerTab => "per-tab",
        }
    }
}

fn enum_field<T>(obj: &HostObject, key: &str, table: fn(&str) -> Option<T>) -> Option<T> {
    field(obj, key).and_then(Value::as_str).and_then(table)
}

// ── Records ──────────────────────────────────────────────────────────

/// A tab's muted state and the reason it was last changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutedInfo {
    pub muted: bool,
    pub reason: Option<MutedInfoReason>,
    /// ID of the extension that changed the muted state, when `reason` is
    /// `Extension`.
    pub extension_id: Option<String>,
}

impl MutedInfo {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            muted: req_bool(obj, "muted"),
            reason: enum_field(obj, "reason", MutedInfoReason::from_host),
            extension_id: opt_str(obj, "extensionId"),
        })
    }

    pub fn to_host(&self) -> Value {
        let mut obj = HostObject::new();
        set(&mut obj, "muted", Value::from(self.muted));
        set_opt(&mut obj, "reason", self.reason.map(|r| Value::from(r.as_host())));
        set_opt(
            &mut obj,
            "extensionId",
            self.extension_id.clone().map(Value::from),
        );
        Value::Object(obj)
    }
}

/// Zoom behavior of a tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoomSettings {
    pub mode: Option<ZoomSettingsMode>,
    pub scope: Option<ZoomSettingsScope>,
    pub default_zoom_factor: Option<f64>,
}

impl ZoomSettings {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            mode: enum_field(obj, "mode", ZoomSettingsMode::from_host),
            scope: enum_field(obj, "scope", ZoomSettingsScope::from_host),
            default_zoom_factor: opt_f64(obj, "defaultZoomFactor"),
        })
    }

    pub fn to_host(&self) -> Value {
        let mut obj = HostObject::new();
        set_opt(&mut obj, "mode", self.mode.map(|m| Value::from(m.as_host())));
        set_opt(&mut obj, "scope", self.scope.map(|s| Value::from(s.as_host())));
        set_opt(
            &mut obj,
            "defaultZoomFactor",
            self.default_zoom_factor.map(Value::from),
        );
        Value::Object(obj)
    }
}

/// A tab as the host reports it. Fields the host may withhold (e.g. `url`
/// without the right permission) are optional; the rest default when a
/// malformed payload omits them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tab {
    /// Absent for tabs not managed by the session API, e.g. devtools.
    pub id: Option<i64>,
    pub index: i64,
    pub window_id: i64,
    pub group_id: i64,
    pub opener_tab_id: Option<i64>,
    pub active: bool,
    pub highlighted: bool,
    pub pinned: bool,
    pub incognito: bool,
    pub frozen: bool,
    pub discarded: bool,
    pub auto_discardable: bool,
    pub audible: Option<bool>,
    pub muted_info: Option<MutedInfo>,
    pub status: Option<TabStatus>,
    pub url: Option<String>,
    pub pending_url: Option<String>,
    pub title: Option<String>,
    pub fav_icon_url: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub session_id: Option<String>,
    pub last_accessed: Option<f64>,
}

impl Tab {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            id: opt_i64(obj, "id"),
            index: req_i64(obj, "index"),
            window_id: req_i64(obj, "windowId"),
            group_id: req_i64(obj, "groupId"),
            opener_tab_id: opt_i64(obj, "openerTabId"),
            active: req_bool(obj, "active"),
            highlighted: req_bool(obj, "highlighted"),
            pinned: req_bool(obj, "pinned"),
            incognito: req_bool(obj, "incognito"),
            frozen: req_bool(obj, "frozen"),
            discarded: req_bool(obj, "discarded"),
            auto_discardable: req_bool(obj, "autoDiscardable"),
            audible: opt_bool(obj, "audible"),
            muted_info: field(obj, "mutedInfo").and_then(MutedInfo::from_host),
            status: enum_field(obj, "status", TabStatus::from_host),
            url: opt_str(obj, "url"),
            pending_url: opt_str(obj, "pendingUrl"),
            title: opt_str(obj, "title"),
            fav_icon_url: opt_str(obj, "favIconUrl"),
            width: opt_i64(obj, "width"),
            height: opt_i64(obj, "height"),
            session_id: opt_str(obj, "sessionId"),
            last_accessed: opt_f64(obj, "lastAccessed"),
        })
    }

    pub fn to_host(&self) -> Value {
        let mut obj = HostObject::new();
        set_opt(&mut obj, "id", self.id.map(Value::from));
        set(&mut obj, "index", Value::from(self.index));
        set(&mut obj, "windowId", Value::from(self.window_id));
        set(&mut obj, "groupId", Value::from(self.group_id));
        set_opt(&mut obj, "openerTabId", self.opener_tab_id.map(Value::from));
        set(&mut obj, "active", Value::from(self.active));
        set(&mut obj, "highlighted", Value::from(self.highlighted));
        set(&mut obj, "pinned", Value::from(self.pinned));
        set(&mut obj, "incognito", Value::from(self.incognito));
        set(&mut obj, "frozen", Value::from(self.frozen));
        set(&mut obj, "discarded", Value::from(self.discarded));
        set(&mut obj, "autoDiscardable", Value::from(self.auto_discardable));
        set_opt(&mut obj, "audible", self.audible.map(Value::from));
        set_opt(
            &mut obj,
            "mutedInfo",
            self.muted_info.as_ref().map(MutedInfo::to_host),
        );
        set_opt(&mut obj, "status", self.status.map(|s| Value::from(s.as_host())));
        set_opt(&mut obj, "url", self.url.clone().map(Value::from));
        set_opt(&mut obj, "pendingUrl", self.pending_url.clone().map(Value::from));
        set_opt(&mut obj, "title", self.title.clone().map(Value::from));
        set_opt(&mut obj, "favIconUrl", self.fav_icon_url.clone().map(Value::from));
        set_opt(&mut obj, "width", self.width.map(Value::from));
        set_opt(&mut obj, "height", self.height.map(Value::from));
        set_opt(&mut obj, "sessionId", self.session_id.clone().map(Value::from));
        set_opt(&mut obj, "lastAccessed", self.last_accessed.map(Value::from));
        Value::Object(obj)
    }
}

/// Filter for `tabs.query`. Outbound-only; absent fields are omitted so the
/// host applies no constraint for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryInfo {
    pub active: Option<bool>,
    pub audible: Option<bool>,
    pub auto_discardable: Option<bool>,
    pub current_window: Option<bool>,
    pub discarded: Option<bool>,
    pub frozen: Option<bool>,
    pub group_id: Option<i64>,
    pub highlighted: Option<bool>,
    pub index: Option<i64>,
    pub last_focused_window: Option<bool>,
    pub muted: Option<bool>,
    pub pinned: Option<bool>,
    pub status: Option<TabStatus>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub window_id: Option<i64>,
    pub window_type: Option<WindowType>,
}

impl QueryInfo {
    pub fn to_host(&self) -> Value {
        let mut obj = HostObject::new();
        set_opt(&mut obj, "active", self.active.map(Value::from));
        set_opt(&mut obj, "audible", self.audible.map(Value::from));
        set_opt(
            &mut obj,
            "autoDiscardable",
            self.auto_discardable.map(Value::from),
        );
        set_opt(&mut obj, "currentWindow", self.current_window.map(Value::from));
        set_opt(&mut obj, "discarded", self.discarded.map(Value::from));
        set_opt(&mut obj, "frozen", self.frozen.map(Value::from));
        set_opt(&mut obj, "groupId", self.group_id.map(Value::from));
        set_opt(&mut obj, "highlighted", self.highlighted.map(Value::from));
        set_opt(&mut obj, "index", self.index.map(Value::from));
        set_opt(
            &mut obj,
            "lastFocusedWindow",
            self.last_focused_window.map(Value::from),
        );
        set_opt(&mut obj, "muted", self.muted.map(Value::from));
        set_opt(&mut obj, "pinned", self.pinned.map(Value::from));
        set_opt(&mut obj, "status", self.status.map(|s| Value::from(s.as_host())));
        set_opt(&mut obj, "title", self.title.clone().map(Value::from));
        set_opt(&mut obj, "url", self.url.clone().map(Value::from));
        set_opt(&mut obj, "windowId", self.window_id.map(Value::from));
        set_opt(
            &mut obj,
            "windowType",
            self.window_type.map(|w| Value::from(w.as_host())),
        );
        Value::Object(obj)
    }
}

/// Properties for `tabs.create`. Outbound-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateProperties {
    pub active: Option<bool>,
    pub index: Option<i64>,
    pub opener_tab_id: Option<i64>,
    pub pinned: Option<bool>,
    pub url: Option<String>,
    pub window_id: Option<i64>,
}

impl CreateProperties {
    pub fn to_host(&self) -> Value {
        let mut obj = HostObject::new();
        set_opt(&mut obj, "active", self.active.map(Value::from));
        set_opt(&mut obj, "index", self.index.map(Value::from));
        set_opt(&mut obj, "openerTabId", self.opener_tab_id.map(Value::from));
        set_opt(&mut obj, "pinned", self.pinned.map(Value::from));
        set_opt(&mut obj, "url", self.url.clone().map(Value::from));
        set_opt(&mut obj, "windowId", self.window_id.map(Value::from));
        Value::Object(obj)
    }
}

/// Properties for `tabs.update`. Outbound-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProperties {
    pub active: Option<bool>,
    pub auto_discardable: Option<bool>,
    pub highlighted: Option<bool>,
    pub muted: Option<bool>,
    pub opener_tab_id: Option<i64>,
    pub pinned: Option<bool>,
    pub url: Option<String>,
}

impl UpdateProperties {
    pub fn to_host(&self) -> Value {
        let mut obj = HostObject::new();
        set_opt(&mut obj, "active", self.active.map(Value::from));
        set_opt(
            &mut obj,
            "autoDiscardable",
            self.auto_discardable.map(Value::from),
        );
        set_opt(&mut obj, "highlighted", self.highlighted.map(Value::from));
        set_opt(&mut obj, "muted", self.muted.map(Value::from));
        set_opt(&mut obj, "openerTabId", self.opener_tab_id.map(Value::from));
        set_opt(&mut obj, "pinned", self.pinned.map(Value::from));
        set_opt(&mut obj, "url", self.url.clone().map(Value::from));
        Value::Object(obj)
    }
}

/// Properties for `tabs.reload`. Outbound-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReloadProperties {
    pub bypass_cache: Option<bool>,
}

impl ReloadProperties {
    pub fn to_host(&self) -> Value {
        let mut obj = HostObject::new();
        set_opt(&mut obj, "bypassCache", self.bypass_cache.map(Value::from));
        Value::Object(obj)
    }
}

/// Changed tab properties delivered by `tabs.onUpdated`. Inbound-only; every
/// field is optional because the host only reports what changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeInfo {
    pub audible: Option<bool>,
    pub auto_discardable: Option<bool>,
    pub discarded: Option<bool>,
    pub fav_icon_url: Option<String>,
    pub frozen: Option<bool>,
    pub group_id: Option<i64>,
    pub muted_info: Option<MutedInfo>,
    pub pinned: Option<bool>,
    pub status: Option<TabStatus>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl ChangeInfo {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            audible: opt_bool(obj, "audible"),
            auto_discardable: opt_bool(obj, "autoDiscardable"),
            discarded: opt_bool(obj, "discarded"),
            fav_icon_url: opt_str(obj, "favIconUrl"),
            frozen: opt_bool(obj, "frozen"),
            group_id: opt_i64(obj, "groupId"),
            muted_info: field(obj, "mutedInfo").and_then(MutedInfo::from_host),
            pinned: opt_bool(obj, "pinned"),
            status: enum_field(obj, "status", TabStatus::from_host),
            title: opt_str(obj, "title"),
            url: opt_str(obj, "url"),
        })
    }
}

/// Payload of `tabs.onActivated`. Inbound-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveInfo {
    pub tab_id: i64,
    pub window_id: i64,
}

impl ActiveInfo {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            tab_id: req_i64(obj, "tabId"),
            window_id: req_i64(obj, "windowId"),
        })
    }
}

/// Payload of `tabs.onRemoved`. Inbound-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveInfo {
    pub window_id: i64,
    /// True when the tab went away because its window is closing.
    pub is_window_closing: bool,
}

impl RemoveInfo {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            window_id: req_i64(obj, "windowId"),
            is_window_closing: req_bool(obj, "isWindowClosing"),
        })
    }
}

/// Payload of `tabs.onMoved`. Inbound-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveInfo {
    pub window_id: i64,
    pub from_index: i64,
    pub to_index: i64,
}

impl MoveInfo {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            window_id: req_i64(obj, "windowId"),
            from_index: req_i64(obj, "fromIndex"),
            to_index: req_i64(obj, "toIndex"),
        })
    }
}

/// Payload of `tabs.onHighlighted`. Inbound-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightInfo {
    pub window_id: i64,
    pub tab_ids: Vec<i64>,
}

impl HighlightInfo {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            window_id: req_i64(obj, "windowId"),
            tab_ids: field(obj, "tabIds")
                .and_then(Value::as_array)
                .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
                .unwrap_or_default(),
        })
    }
}
