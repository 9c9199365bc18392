//! Value objects - immutable types that represent domain concepts

mod presence;
mod user_id;

pub use presence::{PresenceStatus, PresenceStatusParseError};
pub use user_id::{IdGenerator, UserId, UserIdParseError};
