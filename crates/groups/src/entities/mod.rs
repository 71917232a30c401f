//! Domain entities as delivered by the Switchboard service.

pub mod group;
pub mod message;

pub use group::Group;
pub use message::Message;
