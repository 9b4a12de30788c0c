//! Room layer: the coordinator and the state it owns.
//!
//! The registry and presence table are only mutated through
//! [`RoomCoordinator`].

pub mod clock;
pub mod coordinator;
pub mod directory;
pub mod error;
pub mod presence;
pub mod publisher;
pub mod registry;
pub mod relay;

pub use coordinator::RoomCoordinator;
pub use directory::{RoomDirectory, RoomSettings};
pub use error::RoomEventError;
pub use registry::Transport;
pub use relay::DEFAULT_RELAY_TIMEOUT;
