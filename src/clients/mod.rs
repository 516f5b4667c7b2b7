pub mod post_client;
pub mod transport;
pub mod user_client;

pub use post_client::PostClient;
pub use transport::ApiTransport;
pub use user_client::UserClient;
