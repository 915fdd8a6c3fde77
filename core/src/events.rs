//! In-process `request` / `response` lifecycle events.
//!
//! Listeners run synchronously, in registration order, and receive the
//! in-flight `RequestDescriptor` mutably. There is no isolation: the first
//! listener to return an error stops the remaining ones and the error
//! propagates to the caller of `trigger`.

use std::sync::Arc;

use crate::error::ClientError;
use crate::request::RequestDescriptor;

/// A lifecycle callback. Identity (for `off`) is the `Arc` allocation.
pub type Listener = Arc<dyn Fn(&mut RequestDescriptor) -> Result<(), ClientError> + Send + Sync>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&mut RequestDescriptor) -> Result<(), ClientError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Event channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Fired before the transport runs.
    Request,
    /// Fired after a response or an API fault.
    Response,
}

impl Event {
    /// Resolve a channel by its name; `None` for anything unrecognized.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "request" => Some(Event::Request),
            "response" => Some(Event::Response),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Request => "request",
            Event::Response => "response",
        }
    }
}

#[derive(Default, Clone)]
pub struct EventBus {
    request: Vec<Listener>,
    response: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn channel(&self, event: Event) -> &Vec<Listener> {
        match event {
            Event::Request => &self.request,
            Event::Response => &self.response,
        }
    }

    fn channel_mut(&mut self, event: Event) -> &mut Vec<Listener> {
        match event {
            Event::Request => &mut self.request,
            Event::Response => &mut self.response,
        }
    }

    pub fn on(&mut self, event: Event, listener: Listener) {
        self.channel_mut(event).push(listener);
    }

    /// Remove the first registration of `listener`. No-op when absent.
    pub fn off(&mut self, event: Event, listener: &Listener) {
        let channel = self.channel_mut(event);
        if let Some(index) = channel.iter().position(|l| Arc::ptr_eq(l, listener)) {
            channel.remove(index);
        }
    }

    pub fn listeners(&self, event: Event) -> &[Listener] {
        self.channel(event)
    }

    /// Run every listener of `event` against `data`.
    pub fn trigger(&self, event: Event, data: &mut RequestDescriptor) -> Result<(), ClientError> {
        for listener in self.channel(event) {
            listener(data)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("request", &self.request.len())
            .field("response", &self.response.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor {
            request_url: "https://api.clayful.io/v1/products".to_string(),
            http_method: HttpMethod::Get,
            payload: None,
            query: Vec::new(),
            headers: Default::default(),
            meta: Default::default(),
            model_name: "Product".to_string(),
            method_name: "list".to_string(),
            uses_form_data: false,
            error: None,
            response: None,
        }
    }

    #[test]
    fn event_names_resolve() {
        assert_eq!(Event::from_name("request"), Some(Event::Request));
        assert_eq!(Event::from_name("response"), Some(Event::Response));
        assert_eq!(Event::from_name("error"), None);
        assert_eq!(Event::Response.as_str(), "response");
    }

    #[test]
    fn on_then_off_restores_channel() {
        let mut bus = EventBus::new();
        let existing = listener(|_| Ok(()));
        bus.on(Event::Request, existing.clone());

        let added = listener(|_| Ok(()));
        bus.on(Event::Request, added.clone());
        assert_eq!(bus.listeners(Event::Request).len(), 2);

        bus.off(Event::Request, &added);
        let remaining = bus.listeners(Event::Request);
        assert_eq!(remaining.len(), 1);
        assert!(Arc::ptr_eq(&remaining[0], &existing));
    }

    #[test]
    fn off_removes_only_first_registration() {
        let mut bus = EventBus::new();
        let l = listener(|_| Ok(()));
        bus.on(Event::Response, l.clone());
        bus.on(Event::Response, l.clone());
        bus.off(Event::Response, &l);
        assert_eq!(bus.listeners(Event::Response).len(), 1);
    }

    #[test]
    fn off_unknown_listener_is_noop() {
        let mut bus = EventBus::new();
        bus.on(Event::Request, listener(|_| Ok(())));
        bus.off(Event::Request, &listener(|_| Ok(())));
        bus.off(Event::Response, &listener(|_| Ok(())));
        assert_eq!(bus.listeners(Event::Request).len(), 1);
    }

    #[test]
    fn trigger_runs_in_order_on_shared_data() {
        let mut bus = EventBus::new();
        bus.on(
            Event::Request,
            listener(|req| {
                req.headers.insert("X-Step".to_string(), "1".to_string());
                Ok(())
            }),
        );
        bus.on(
            Event::Request,
            listener(|req| {
                let step = req.headers.get("X-Step").cloned().unwrap_or_default();
                req.headers.insert("X-Step".to_string(), format!("{step}2"));
                Ok(())
            }),
        );

        let mut data = descriptor();
        bus.trigger(Event::Request, &mut data).unwrap();
        assert_eq!(data.headers["X-Step"], "12");
    }

    #[test]
    fn failing_listener_stops_the_rest() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();
        bus.on(Event::Response, listener(|_| Err(ClientError::Listener("boom".to_string()))));
        let counter = calls.clone();
        bus.on(
            Event::Response,
            listener(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        let err = bus.trigger(Event::Response, &mut descriptor()).unwrap_err();
        assert!(matches!(err, ClientError::Listener(ref msg) if msg == "boom"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
