//! Alert queue publishing.

pub mod http;
pub mod publisher;

pub use http::HttpQueuePublisher;
pub use publisher::AlertPublisher;
