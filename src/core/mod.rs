pub mod classify;
pub mod config;
pub mod dispatch;
pub mod message;
pub mod session;
