//! World-state feed: full snapshots pushed asynchronously.
//!
//! The view only sees [`StateFeed::subscribe`]; the transport behind it is
//! interchangeable. [`WebSocketFeed`] treats every text frame as one JSON
//! snapshot document.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use crate::error::FeedError;
use crate::model::SnakeState;
use crate::util::clog;

pub type SnapshotCallback = Rc<dyn Fn(SnakeState)>;
pub type ErrorCallback = Rc<dyn Fn(FeedError)>;

pub trait StateFeed {
    fn subscribe(&self, on_snapshot: SnapshotCallback, on_error: ErrorCallback) -> Subscription;
}

/// Detaches from the feed on [`Subscription::unsubscribe`] or on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    pub fn empty() -> Self {
        Self { teardown: None }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// One pushed document. `null` or blank text means the document does not exist.
pub fn decode_snapshot(text: &str) -> Result<SnakeState, FeedError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FeedError::MissingDocument);
    }
    let doc: Option<SnakeState> = serde_json::from_str(trimmed)?;
    doc.ok_or(FeedError::MissingDocument)
}

#[allow(dead_code)]
struct WsHandlers {
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(Event)>,
}

#[derive(Clone, Debug)]
pub struct WebSocketFeed {
    url: String,
}

impl WebSocketFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl StateFeed for WebSocketFeed {
    fn subscribe(&self, on_snapshot: SnapshotCallback, on_error: ErrorCallback) -> Subscription {
        let url = self.url.trim().to_string();
        if url.is_empty() {
            on_error(FeedError::Connect("no feed url configured".into()));
            return Subscription::empty();
        }
        let ws = match WebSocket::new(&url) {
            Ok(ws) => ws,
            Err(err) => {
                on_error(FeedError::Connect(format!("{url}: {err:?}")));
                return Subscription::empty();
            }
        };

        let closing = Rc::new(Cell::new(false));
        let onmessage = {
            let on_snapshot = on_snapshot.clone();
            let on_error = on_error.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    on_error(FeedError::Transport("non-text frame".into()));
                    return;
                };
                match decode_snapshot(&text) {
                    Ok(state) => {
                        clog(&format!("snapshot: {} segments", state.snake.len()));
                        on_snapshot(state);
                    }
                    Err(err) => on_error(err),
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let on_error = on_error.clone();
            let url = url.clone();
            Closure::wrap(Box::new(move |_event: ErrorEvent| {
                on_error(FeedError::Transport(format!("websocket error on {url}")));
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            let on_error = on_error.clone();
            let closing = closing.clone();
            Closure::wrap(Box::new(move |event: Event| {
                if closing.get() {
                    return;
                }
                let (code, reason) = match event.dyn_ref::<CloseEvent>() {
                    Some(close) => (close.code(), close.reason()),
                    None => (0, String::new()),
                };
                on_error(FeedError::Closed { code, reason });
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        let handlers = WsHandlers {
            onmessage,
            onerror,
            onclose,
        };

        Subscription::new(move || {
            closing.set(true);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            let _ = ws.close();
            drop(handlers);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn decode_full_snapshot() {
        let raw = r#"{"snake":[{"x":1,"y":1},{"x":1,"y":2}],"apple":{"x":4,"y":4},
            "direction":{"x":0,"y":-1},"score":7,"is_golden_apple":true,
            "apple_spawned_by":{"tx_id":"sig","amount":1.5,"time":1}}"#;
        let st = decode_snapshot(raw).unwrap();
        assert_eq!(st.score, 7);
        assert!(st.golden_spawn().is_some());
    }

    #[test]
    fn missing_document() {
        assert!(matches!(decode_snapshot("null"), Err(FeedError::MissingDocument)));
        assert!(matches!(decode_snapshot("   "), Err(FeedError::MissingDocument)));
    }

    #[test]
    fn malformed_document() {
        assert!(matches!(decode_snapshot(r#"{"snake":3}"#), Err(FeedError::Decode(_))));
    }

    #[test]
    fn subscription_tears_down_once() {
        let count = Rc::new(Cell::new(0));
        let mut sub = {
            let count = count.clone();
            Subscription::new(move || count.set(count.get() + 1))
        };
        sub.unsubscribe();
        sub.unsubscribe();
        drop(sub);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            let _sub = Subscription::new(move || count.set(count.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }

    struct ScriptedFeed {
        pushes: Vec<&'static str>,
    }

    impl StateFeed for ScriptedFeed {
        fn subscribe(&self, on_snapshot: SnapshotCallback, on_error: ErrorCallback) -> Subscription {
            for raw in &self.pushes {
                match decode_snapshot(raw) {
                    Ok(st) => on_snapshot(st),
                    Err(err) => on_error(err),
                }
            }
            Subscription::empty()
        }
    }

    #[test]
    fn latest_snapshot_survives_errors() {
        let feed = ScriptedFeed {
            pushes: vec![
                r#"{"snake":[{"x":0,"y":0}],"apple":{"x":1,"y":0},"direction":{"x":1,"y":0},"score":1}"#,
                "null",
                r#"{"snake":[{"x":1,"y":0}],"apple":{"x":2,"y":0},"direction":{"x":1,"y":0},"score":2}"#,
                "{bad",
            ],
        };
        let latest: Rc<RefCell<Option<SnakeState>>> = Rc::new(RefCell::new(None));
        let errors = Rc::new(Cell::new(0));
        let _sub = {
            let latest = latest.clone();
            let errors = errors.clone();
            feed.subscribe(
                Rc::new(move |st| *latest.borrow_mut() = Some(st)),
                Rc::new(move |_| errors.set(errors.get() + 1)),
            )
        };
        assert_eq!(errors.get(), 2);
        assert_eq!(latest.borrow().as_ref().map(|s| s.score), Some(2));
    }
}
