//! Messaging between the extension and tab content: the `MessageSender`
//! record, `tabs.sendMessage`, and the `runtime.onMessage` stream.
//!
//! Message payloads are opaque to this layer and pass through as host-native
//! values; only the sender envelope is converted. The host's reply channel
//! (`sendResponse`) is not modeled here — reply plumbing belongs to the
//! binding surface above.

use serde_json::Value;

use crate::calls::{issue, CallHandle};
use crate::events::{positional, subscribe, Subscription};
use crate::host::Host;
use crate::tabs::Tab;
use crate::values::{field, non_null, opt_i64, opt_str, set_opt, HostObject};

/// Who sent a message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageSender {
    /// The sending tab, when the message came from a content script.
    pub tab: Option<Tab>,
    /// Frame within `tab` that opened the connection; 0 is the top frame.
    pub frame_id: Option<i64>,
    /// Extension ID of the sender, when sent by an extension.
    pub id: Option<String>,
    pub url: Option<String>,
    pub origin: Option<String>,
    pub document_id: Option<String>,
}

impl MessageSender {
    pub fn from_host(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            tab: field(obj, "tab").and_then(Tab::from_host),
            frame_id: opt_i64(obj, "frameId"),
            id: opt_str(obj, "id"),
            url: opt_str(obj, "url"),
            origin: opt_str(obj, "origin"),
            document_id: opt_str(obj, "documentId"),
        })
    }

    pub fn to_host(&self) -> Value {
        let mut obj = HostObject::new();
        set_opt(&mut obj, "tab", self.tab.as_ref().map(Tab::to_host));
        set_opt(&mut obj, "frameId", self.frame_id.map(Value::from));
        set_opt(&mut obj, "id", self.id.clone().map(Value::from));
        set_opt(&mut obj, "url", self.url.clone().map(Value::from));
        set_opt(&mut obj, "origin", self.origin.clone().map(Value::from));
        set_opt(&mut obj, "documentId", self.document_id.clone().map(Value::from));
        Value::Object(obj)
    }
}

/// Send a message to a tab's content scripts. The reply is whatever the
/// receiver responded with, absent when nothing responded.
pub fn send_message(
    host: &dyn Host,
    tab_id: i64,
    message: Value,
    done: impl FnOnce(Option<Value>) + 'static,
) -> CallHandle {
    issue(
        host,
        "tabs.sendMessage",
        vec![Value::from(tab_id), message],
        |reply| non_null(reply).cloned(),
        done,
    )
}

/// Subscribe to incoming runtime messages: `(message, sender)`.
pub fn on_message(
    host: &dyn Host,
    callback: impl Fn(Option<Value>, MessageSender) + 'static,
) -> Subscription {
    subscribe(host, "runtime.onMessage", move |args| {
        let message = non_null(positional(args, 0)).cloned();
        let sender = MessageSender::from_host(positional(args, 1)).unwrap_or_default();
        callback(message, sender);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_message_sender_round_trip() {
        let sender = MessageSender {
            tab: Some(Tab {
                id: Some(3),
                index: 1,
                window_id: 2,
                group_id: -1,
                active: true,
                ..Default::default()
            }),
            frame_id: Some(0),
            id: None,
            url: Some("https://example.com/page".to_owned()),
            origin: Some("https://example.com".to_owned()),
            document_id: None,
        };
        let host_value = sender.to_host();
        let obj = host_value.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("documentId"));
        assert_eq!(MessageSender::from_host(&host_value), Some(sender));
    }

    #[test]
    fn test_message_sender_from_host_tolerates_absence() {
        assert_eq!(MessageSender::from_host(&Value::Null), None);
        assert_eq!(
            MessageSender::from_host(&json!({})),
            Some(MessageSender::default())
        );
    }

    #[test]
    fn test_send_message_passes_payload_and_decodes_reply() {
        let host = MockHost::new().with_response("tabs.sendMessage", json!({"ack": true}));
        let reply = Rc::new(RefCell::new(None));
        let reply_clone = Rc::clone(&reply);
        send_message(&host, 5, json!({"kind": "ping"}), move |r| {
            *reply_clone.borrow_mut() = r;
        });
        assert_eq!(
            host.recorded_calls()[0].args,
            vec![json!(5), json!({"kind": "ping"})]
        );
        assert_eq!(*reply.borrow(), Some(json!({"ack": true})));
    }

    #[test]
    fn test_send_message_without_reply_delivers_absent() {
        let host = MockHost::new();
        let reply = Rc::new(RefCell::new(Some(json!(0))));
        let reply_clone = Rc::clone(&reply);
        send_message(&host, 5, json!("ping"), move |r| {
            *reply_clone.borrow_mut() = r;
        });
        assert!(reply.borrow().is_none());
    }

    #[test]
    fn test_on_message_converts_sender() {
        let host = MockHost::new();
        let seen = Rc::new(RefCell::new(None));
        let seen_clone = Rc::clone(&seen);
        let _sub = on_message(&host, move |message, sender| {
            *seen_clone.borrow_mut() = Some((message, sender));
        });
        host.fire_event(
            "runtime.onMessage",
            &[
                json!({"kind": "ping"}),
                json!({
                    "tab": {"id": 3, "index": 0, "windowId": 1, "groupId": -1, "active": true},
                    "frameId": 0,
                    "url": "https://example.com/"
                }),
            ],
        );
        let (message, sender) = seen.borrow().clone().unwrap();
        assert_eq!(message, Some(json!({"kind": "ping"})));
        assert_eq!(sender.tab.as_ref().and_then(|t| t.id), Some(3));
        assert_eq!(sender.frame_id, Some(0));
    }
}
