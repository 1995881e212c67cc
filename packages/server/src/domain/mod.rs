//! Domain layer for the presence and broadcast core.
//!
//! This module contains the value objects, entities and the interfaces
//! (traits) the use cases depend on. Concrete implementations live in the
//! infrastructure layer.

pub mod broadcast;
pub mod entity;
pub mod error;
pub mod registry;
pub mod session;
pub mod value_object;

pub use broadcast::{Broadcast, BroadcastSink};
pub use entity::{ChatEvent, MessageType};
pub use error::{BroadcastError, ValueObjectError};
pub use registry::PresenceRegistry;
pub use session::SessionBinder;
pub use value_object::Identity;

#[cfg(test)]
pub use broadcast::MockBroadcastSink;
#[cfg(test)]
pub use registry::MockPresenceRegistry;
#[cfg(test)]
pub use session::MockSessionBinder;
