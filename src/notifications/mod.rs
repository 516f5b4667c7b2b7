pub mod hub;

pub use hub::{Listener, NotificationHub, PostEvent, Subscription};
