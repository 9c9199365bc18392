//! Route handlers

pub mod auth;
pub mod directory;
pub mod health;
pub mod presence;
pub mod realtime;
pub mod users;
