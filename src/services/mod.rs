//! Application services layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 UI Layer                    │
//! │  (App, Screens, Components)                 │
//! └──────────────────────┬──────────────────────┘
//!                        │ Action
//!                        ▼
//! ┌─────────────────────────────────────────────┐
//! │           NavigationController              │
//! └──────────────────────┬──────────────────────┘
//!                        │ Effect
//!                        ▼
//! ┌─────────────────────────────────────────────┐
//! │              EffectRunner                   │
//! │  (tokio tasks → LeagueApi → Action)         │
//! └─────────────────────────────────────────────┘
//! ```

pub mod effect_runner;

pub use effect_runner::EffectRunner;
