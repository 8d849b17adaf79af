//! Widget destruction notifications
//!
//! Widget lifetimes are controlled by the toolkit. The toolkit owns a
//! [`Lifecycle`] hub and calls [`Lifecycle::notify_destroyed`] when a widget
//! goes away; engines subscribe per widget and drop their data in response.
//!
//! ```ignore
//! let lifecycle = Lifecycle::new();
//! let engine = WidgetStateEngine::new(scheduler.handle(), &lifecycle);
//! engine.register_widget(&button, AnimationModes::HOVER);
//!
//! // Toolkit teardown
//! drop(button);
//! lifecycle.notify_destroyed(button_id);
//! assert!(engine.data(button_id, AnimationMode::Hover).is_none());
//! ```
//!
//! Subscriptions are unique per (widget, listener): subscribing twice is a
//! no-op. Listeners are held weakly and removed when their owner drops.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::widget::WidgetId;

new_key_type! {
    /// Handle to a registered destruction listener
    pub struct ListenerId;
}

/// Receiver of destruction notifications
pub trait DestroyListener {
    /// Called once per subscription when `widget` is destroyed
    fn widget_destroyed(&self, widget: WidgetId);
}

#[derive(Default)]
struct LifecycleInner {
    listeners: SlotMap<ListenerId, Weak<dyn DestroyListener>>,
    subscriptions: FxHashMap<WidgetId, SmallVec<[ListenerId; 4]>>,
}

/// Destruction notification hub shared between the toolkit and the engines
#[derive(Clone, Default)]
pub struct Lifecycle {
    inner: Rc<RefCell<LifecycleInner>>,
}

impl Lifecycle {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it receives nothing until it subscribes
    pub fn add_listener(&self, listener: Weak<dyn DestroyListener>) -> ListenerId {
        self.inner.borrow_mut().listeners.insert(listener)
    }

    /// Remove a listener and every subscription it holds
    pub fn remove_listener(&self, listener: ListenerId) {
        let mut inner = self.inner.borrow_mut();
        if inner.listeners.remove(listener).is_none() {
            return;
        }
        inner.subscriptions.retain(|_, ids| {
            ids.retain(|id| *id != listener);
            !ids.is_empty()
        });
    }

    /// Subscribe `listener` to the destruction of `widget`
    ///
    /// Returns false if the subscription already existed or the listener is
    /// unknown.
    pub fn subscribe(&self, widget: WidgetId, listener: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.listeners.contains_key(listener) {
            return false;
        }
        let ids = inner.subscriptions.entry(widget).or_default();
        if ids.contains(&listener) {
            return false;
        }
        ids.push(listener);
        true
    }

    /// Drop the subscription of `listener` to `widget`
    pub fn unsubscribe(&self, widget: WidgetId, listener: ListenerId) {
        let mut inner = self.inner.borrow_mut();
        if let Some(ids) = inner.subscriptions.get_mut(&widget) {
            ids.retain(|id| *id != listener);
            if ids.is_empty() {
                let _ = inner.subscriptions.remove(&widget);
            }
        }
    }

    /// Check for a subscription
    pub fn is_subscribed(&self, widget: WidgetId, listener: ListenerId) -> bool {
        self.inner
            .borrow()
            .subscriptions
            .get(&widget)
            .is_some_and(|ids| ids.contains(&listener))
    }

    /// Number of listeners subscribed to `widget`
    pub fn subscription_count(&self, widget: WidgetId) -> usize {
        self.inner
            .borrow()
            .subscriptions
            .get(&widget)
            .map_or(0, |ids| ids.len())
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Deliver the destruction of `widget` to its subscribers
    ///
    /// Subscriptions are consumed. Returns the number of listeners notified.
    pub fn notify_destroyed(&self, widget: WidgetId) -> usize {
        let listeners: SmallVec<[Rc<dyn DestroyListener>; 4]> = {
            let mut inner = self.inner.borrow_mut();
            let Some(ids) = inner.subscriptions.remove(&widget) else {
                return 0;
            };
            ids.iter()
                .filter_map(|id| inner.listeners.get(*id))
                .filter_map(Weak::upgrade)
                .collect()
        };

        tracing::debug!(
            "Lifecycle: widget {:?} destroyed, notifying {} listeners",
            widget,
            listeners.len()
        );

        for listener in &listeners {
            listener.widget_destroyed(widget);
        }
        listeners.len()
    }
}
