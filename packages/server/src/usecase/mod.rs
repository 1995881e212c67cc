//! UseCase layer.

pub mod broadcast_coordinator;
pub mod error;
pub mod get_online_users;

pub use broadcast_coordinator::{BroadcastCoordinator, DisconnectOutcome, JoinOutcome};
pub use error::CoordinatorError;
pub use get_online_users::GetOnlineUsersUseCase;
