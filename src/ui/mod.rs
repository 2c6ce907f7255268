//! Browser-facing presentation.
//!
//! - [`render`]: builds the chat page from a [`crate::core::session::Session`].
//! - [`markdown`]: text answers to HTML.
//! - [`html`]: escaping shared by both.
//!
//! Nothing here mutates a session; [`crate::server`] owns request handling.

pub mod html;
pub mod markdown;
pub mod render;

pub use render::render_session;
