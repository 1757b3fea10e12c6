//! Domain model exports.

mod entity;
mod message;

pub use entity::Entity;
pub use message::Message;
