//! Method-call adapters for the `tabs` namespace.
//!
//! Each adapter shapes its arguments through the codec (absent fields and
//! omitted leading arguments leave no trace), invokes the host method, and
//! fires the continuation exactly once with the converted result. A host
//! failure lands in the side channel and still fulfills the call with an
//! absent result.
//!
//! Leading optional `tab_id` arguments are positional: when absent they are
//! omitted entirely and the host falls back to the current window's active
//! tab.

use serde_json::Value;

use super::{CreateProperties, QueryInfo, ReloadProperties, Tab, UpdateProperties, ZoomSettings};
use crate::calls::{issue, CallHandle};
use crate::host::Host;

fn decode_unit(_: &Value) {}

fn decode_tab_list(value: &Value) -> Option<Vec<Tab>> {
    value
        .as_array()
        .map(|tabs| tabs.iter().filter_map(Tab::from_host).collect())
}

/// Retrieve one tab by ID.
pub fn get(host: &dyn Host, tab_id: i64, done: impl FnOnce(Option<Tab>) + 'static) -> CallHandle {
    issue(host, "tabs.get", vec![Value::from(tab_id)], Tab::from_host, done)
}

/// Retrieve all tabs matching the filter.
pub fn query(
    host: &dyn Host,
    info: &QueryInfo,
    done: impl FnOnce(Option<Vec<Tab>>) + 'static,
) -> CallHandle {
    issue(host, "tabs.query", vec![info.to_host()], decode_tab_list, done)
}

/// Open a new tab.
pub fn create(
    host: &dyn Host,
    properties: &CreateProperties,
    done: impl FnOnce(Option<Tab>) + 'static,
) -> CallHandle {
    issue(
        host,
        "tabs.create",
        vec![properties.to_host()],
        Tab::from_host,
        done,
    )
}

/// Modify a tab's properties.
pub fn update(
    host: &dyn Host,
    tab_id: Option<i64>,
    properties: &UpdateProperties,
    done: impl FnOnce(Option<Tab>) + 'static,
) -> CallHandle {
    let mut args = Vec::new();
    if let Some(id) = tab_id {
        args.push(Value::from(id));
    }
    args.push(properties.to_host());
    issue(host, "tabs.update", args, Tab::from_host, done)
}

/// Close one or more tabs.
pub fn remove(host: &dyn Host, tab_ids: &[i64], done: impl FnOnce() + 'static) -> CallHandle {
    issue(
        host,
        "tabs.remove",
        vec![Value::from(tab_ids.to_vec())],
        decode_unit,
        |()| done(),
    )
}

/// Duplicate a tab.
pub fn duplicate(
    host: &dyn Host,
    tab_id: i64,
    done: impl FnOnce(Option<Tab>) + 'static,
) -> CallHandle {
    issue(
        host,
        "tabs.duplicate",
        vec![Value::from(tab_id)],
        Tab::from_host,
        done,
    )
}

/// Reload a tab, optionally bypassing the cache.
pub fn reload(
    host: &dyn Host,
    tab_id: Option<i64>,
    properties: Option<&ReloadProperties>,
    done: impl FnOnce() + 'static,
) -> CallHandle {
    let mut args = Vec::new();
    if let Some(id) = tab_id {
        args.push(Value::from(id));
    }
    if let Some(props) = properties {
        args.push(props.to_host());
    }
    issue(host, "tabs.reload", args, decode_unit, |()| done())
}

/// Read a tab's zoom factor.
pub fn get_zoom(
    host: &dyn Host,
    tab_id: Option<i64>,
    done: impl FnOnce(Option<f64>) + 'static,
) -> CallHandle {
    let args = tab_id.map(Value::from).into_iter().collect();
    issue(host, "tabs.getZoom", args, Value::as_f64, done)
}

/// Set a tab's zoom factor. Zero restores the tab's default.
pub fn set_zoom(
    host: &dyn Host,
    tab_id: Option<i64>,
    zoom_factor: f64,
    done: impl FnOnce() + 'static,
) -> CallHandle {
    let mut args: Vec<Value> = tab_id.map(Value::from).into_iter().collect();
    args.push(Value::from(zoom_factor));
    issue(host, "tabs.setZoom", args, decode_unit, |()| done())
}

/// Read a tab's zoom settings.
pub fn get_zoom_settings(
    host: &dyn Host,
    tab_id: Option<i64>,
    done: impl FnOnce(Option<ZoomSettings>) + 'static,
) -> CallHandle {
    let args = tab_id.map(Value::from).into_iter().collect();
    issue(host, "tabs.getZoomSettings", args, ZoomSettings::from_host, done)
}

/// Change a tab's zoom settings.
pub fn set_zoom_settings(
    host: &dyn Host,
    tab_id: Option<i64>,
    settings: &ZoomSettings,
    done: impl FnOnce() + 'static,
) -> CallHandle {
    let mut args: Vec<Value> = tab_id.map(Value::from).into_iter().collect();
    args.push(settings.to_host());
    issue(host, "tabs.setZoomSettings", args, decode_unit, |()| done())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;
    use crate::tabs::{TabStatus, ZoomSettingsMode};
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_get_converts_sparse_host_tab() {
        let host = MockHost::new().with_response(
            "tabs.get",
            json!({
                "id": 7, "index": 0, "windowId": 3, "pinned": false,
                "highlighted": false, "active": true, "incognito": false,
                "frozen": false, "groupId": -1
            }),
        );
        let seen = Rc::new(RefCell::new(None));
        let seen_clone = Rc::clone(&seen);
        let handle = get(&host, 7, move |tab| *seen_clone.borrow_mut() = tab);
        assert!(handle.is_fulfilled());

        let calls = host.recorded_calls();
        assert_eq!(calls[0].method, "tabs.get");
        assert_eq!(calls[0].args, vec![json!(7)]);

        let tab = seen.borrow().clone().unwrap();
        assert_eq!(tab.id, Some(7));
        assert_eq!(tab.window_id, 3);
        assert_eq!(tab.fav_icon_url, None);
        assert_eq!(tab.title, None);
        assert_eq!(tab.url, None);
    }

    #[test]
    fn test_get_missing_tab_delivers_absent() {
        let host = MockHost::new().with_last_error("No tab with id: 99.");
        let seen = Rc::new(RefCell::new(Some(Tab::default())));
        let seen_clone = Rc::clone(&seen);
        get(&host, 99, move |tab| *seen_clone.borrow_mut() = tab);
        assert!(seen.borrow().is_none());
    }

    #[test]
    fn test_query_filter_carries_only_present_keys() {
        let host = MockHost::new().with_response("tabs.query", json!([]));
        let filter = QueryInfo {
            active: Some(true),
            ..Default::default()
        };
        query(&host, &filter, |_| {});
        assert_eq!(host.recorded_calls()[0].args, vec![json!({"active": true})]);
    }

    #[test]
    fn test_query_converts_each_tab() {
        let host = MockHost::new().with_response(
            "tabs.query",
            json!([
                {"id": 1, "index": 0, "windowId": 1, "groupId": -1, "active": true,
                 "status": "complete"},
                {"id": 2, "index": 1, "windowId": 1, "groupId": -1, "active": false,
                 "status": "loading"}
            ]),
        );
        let seen = Rc::new(RefCell::new(None));
        let seen_clone = Rc::clone(&seen);
        query(&host, &QueryInfo::default(), move |tabs| {
            *seen_clone.borrow_mut() = tabs;
        });
        let tabs = seen.borrow().clone().unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].id, Some(1));
        assert_eq!(tabs[1].status, Some(TabStatus::Loading));
    }

    #[test]
    fn test_update_omits_absent_leading_tab_id() {
        let host = MockHost::new();
        let props = UpdateProperties {
            pinned: Some(true),
            ..Default::default()
        };
        update(&host, None, &props, |_| {});
        update(&host, Some(4), &props, |_| {});
        let calls = host.recorded_calls();
        assert_eq!(calls[0].args, vec![json!({"pinned": true})]);
        assert_eq!(calls[1].args, vec![json!(4), json!({"pinned": true})]);
    }

    #[test]
    fn test_remove_sends_id_list() {
        let host = MockHost::new();
        let done = Rc::new(Cell::new(false));
        let done_clone = Rc::clone(&done);
        remove(&host, &[3, 4, 5], move || done_clone.set(true));
        assert_eq!(host.recorded_calls()[0].args, vec![json!([3, 4, 5])]);
        assert!(done.get());
    }

    #[test]
    fn test_create_passes_properties() {
        let host = MockHost::new();
        let props = CreateProperties {
            url: Some("https://example.com/".to_owned()),
            active: Some(false),
            ..Default::default()
        };
        create(&host, &props, |_| {});
        assert_eq!(
            host.recorded_calls()[0].args,
            vec![json!({"active": false, "url": "https://example.com/"})]
        );
    }

    #[test]
    fn test_reload_argument_shapes() {
        let host = MockHost::new();
        reload(&host, None, None, || {});
        reload(
            &host,
            Some(2),
            Some(&ReloadProperties {
                bypass_cache: Some(true),
            }),
            || {},
        );
        let calls = host.recorded_calls();
        assert!(calls[0].args.is_empty());
        assert_eq!(calls[1].args, vec![json!(2), json!({"bypassCache": true})]);
    }

    #[test]
    fn test_zoom_round_trip() {
        let host = MockHost::new()
            .with_response("tabs.getZoom", json!(1.5))
            .with_response(
                "tabs.getZoomSettings",
                json!({"mode": "automatic", "scope": "per-origin", "defaultZoomFactor": 1.0}),
            );
        let zoom = Rc::new(Cell::new(None));
        let zoom_clone = Rc::clone(&zoom);
        get_zoom(&host, Some(1), move |z| zoom_clone.set(z));
        assert_eq!(zoom.get(), Some(1.5));

        let settings = Rc::new(RefCell::new(None));
        let settings_clone = Rc::clone(&settings);
        get_zoom_settings(&host, None, move |s| *settings_clone.borrow_mut() = s);
        assert_eq!(
            settings.borrow().as_ref().and_then(|s: &ZoomSettings| s.mode),
            Some(ZoomSettingsMode::Automatic)
        );

        set_zoom(&host, Some(1), 2.0, || {});
        let calls = host.recorded_calls();
        assert_eq!(calls[0].args, vec![json!(1)]);
        assert!(calls[1].args.is_empty());
        assert_eq!(calls[2].args, vec![json!(1), json!(2.0)]);
    }

    #[test]
    fn test_set_zoom_settings_arguments() {
        let host = MockHost::new();
        let settings = ZoomSettings {
            mode: Some(ZoomSettingsMode::Disabled),
            ..Default::default()
        };
        set_zoom_settings(&host, None, &settings, || {});
        assert_eq!(
            host.recorded_calls()[0].args,
            vec![json!({"mode": "disabled"})]
        );
    }
}
