//! Courtside - a terminal client for recreational league players and captains
//!
//! The [`router`] decides which screen is shown from the auth session, the
//! backend onboarding status and the launch location. Everything else is the
//! terminal front end around it.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod components;
pub mod config;
pub mod router;
pub mod screens;
pub mod services;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use app::App;
pub use config::Config;
pub use router::{NavigationController, Screen};
