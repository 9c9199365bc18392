//! Entity <-> model conversions

mod user;

pub use user::UserInsert;
