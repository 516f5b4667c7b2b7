use crate::models::Post;
use std::fmt;
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicU64, Ordering},
};
use tracing::{debug, trace, warn};

pub type Listener = Arc<dyn Fn(&Post) + Send + Sync>;

/// Broadcast channel a listener registers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostEvent {
    Saved,
    Deleted,
}

impl fmt::Display for PostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostEvent::Saved => f.write_str("post saved"),
            PostEvent::Deleted => f.write_str("post deleted"),
        }
    }
}

/// Handle returned by [`NotificationHub::subscribe`]; pass it back to
/// [`NotificationHub::unsubscribe`] to detach the listener.
#[must_use = "the listener stays registered until this handle is unsubscribed"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    hub: u64,
    event: PostEvent,
    id: u64,
}

#[derive(Default)]
struct Listeners {
    saved: Vec<(u64, Listener)>,
    deleted: Vec<(u64, Listener)>,
}

impl Listeners {
    fn channel(&self, event: PostEvent) -> &Vec<(u64, Listener)> {
        match event {
            PostEvent::Saved => &self.saved,
            PostEvent::Deleted => &self.deleted,
        }
    }

    fn channel_mut(&mut self, event: PostEvent) -> &mut Vec<(u64, Listener)> {
        match event {
            PostEvent::Saved => &mut self.saved,
            PostEvent::Deleted => &mut self.deleted,
        }
    }
}

static NEXT_HUB_ID: AtomicU64 = AtomicU64::new(0);

struct Inner {
    hub_id: u64,
    next_id: AtomicU64,
    listeners: Mutex<Listeners>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            hub_id: NEXT_HUB_ID.fetch_add(1, Ordering::Relaxed),
            next_id: AtomicU64::new(0),
            listeners: Mutex::new(Listeners::default()),
        }
    }
}

/// Session-wide publish/subscribe for post mutations.
///
/// Clones share the same listener lists. Broadcasts run synchronously on the
/// caller, in registration order. The lock is released before listeners run,
/// so a listener may subscribe or unsubscribe; the change applies from the
/// next broadcast.
#[derive(Clone, Default)]
pub struct NotificationHub {
    inner: Arc<Inner>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self) -> MutexGuard<'_, Listeners> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    pub fn subscribe<F>(&self, event: PostEvent, listener: F) -> Subscription
    where
        F: Fn(&Post) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners()
            .channel_mut(event)
            .push((id, Arc::new(listener)));

        debug!("Listener {} subscribed to {}", id, event);
        Subscription {
            hub: self.inner.hub_id,
            event,
            id,
        }
    }

    pub fn on_save<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Post) + Send + Sync + 'static,
    {
        self.subscribe(PostEvent::Saved, listener)
    }

    pub fn on_delete<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Post) + Send + Sync + 'static,
    {
        self.subscribe(PostEvent::Deleted, listener)
    }

    /// Detach a listener. Returns `false` if it was already gone, e.g. the
    /// handle came from a different hub.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        if subscription.hub != self.inner.hub_id {
            warn!(
                "Listener {} belongs to another hub; nothing unsubscribed",
                subscription.id
            );
            return false;
        }

        let mut listeners = self.listeners();
        let channel = listeners.channel_mut(subscription.event);
        let before = channel.len();
        channel.retain(|(id, _)| *id != subscription.id);
        let removed = channel.len() != before;

        debug!(
            "Listener {} unsubscribed from {} (removed: {})",
            subscription.id, subscription.event, removed
        );
        removed
    }

    pub fn listener_count(&self, event: PostEvent) -> usize {
        self.listeners().channel(event).len()
    }

    pub fn notify_save(&self, post: &Post) {
        self.broadcast(PostEvent::Saved, post);
    }

    pub fn notify_delete(&self, post: &Post) {
        self.broadcast(PostEvent::Deleted, post);
    }

    fn broadcast(&self, event: PostEvent, post: &Post) {
        let snapshot: Vec<Listener> = self
            .listeners()
            .channel(event)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        if snapshot.is_empty() {
            trace!("No listeners for {}", event);
            return;
        }

        debug!(
            "Broadcasting {} for post {:?} to {} listeners",
            event,
            post.id,
            snapshot.len()
        );
        for listener in snapshot {
            listener(post);
        }
    }
}

impl fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners();
        f.debug_struct("NotificationHub")
            .field("saved_listeners", &listeners.saved.len())
            .field("deleted_listeners", &listeners.deleted.len())
            .finish()
    }
}
