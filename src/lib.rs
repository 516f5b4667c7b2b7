//! Typed client for the posts/users demo REST API, with an in-process
//! notification hub so independent views can refresh after a mutation.

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;

pub use clients::{ApiTransport, PostClient, UserClient};
pub use error::{ApiError, Result, TransportError};
pub use models::{Post, User};
pub use notifications::{NotificationHub, PostEvent, Subscription};
