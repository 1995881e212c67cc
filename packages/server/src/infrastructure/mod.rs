//! Infrastructure layer.
//!
//! Concrete implementations of the domain interfaces and the wire format.

pub mod broadcaster;
pub mod dto;
pub mod registry;
pub mod session;
