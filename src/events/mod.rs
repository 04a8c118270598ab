//! # Batch Lifecycle Events
//!
//! Broadcast notifications emitted while a batch job runs. Renderers subscribe to follow
//! progress without polling the executor.

pub mod publisher;

pub use publisher::{BatchEvent, EventPublisher, PublishedEvent};
