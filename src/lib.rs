//! notebook-chat is a browser chat front-end for a notebook question-answering
//! backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the per-session conversation store, response
//!   classification, configuration, and the one-question-one-answer
//!   dispatcher.
//! - [`api`] defines the backend wire format and the [`api::Backend`] trait
//!   with its reqwest implementation.
//! - [`ui`] renders a session into the HTML chat page.
//! - [`server`] exposes the page and chat management over HTTP with axum.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod server;
pub mod ui;
pub mod utils;
