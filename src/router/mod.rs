//! View router.
//!
//! Decides which screen is mounted from the auth signals and the launch
//! location, and owns every transition between screens.

pub mod controller;
pub mod location;
pub mod registry;
pub mod screen;
pub mod state;

pub use controller::{
    resolve_initial_screen, Action, Effect, NavigationController, Notice, NoticeLevel,
    SessionPhase,
};
pub use registry::{Affordance, BackTarget, ScreenSpec, SelectionKind, Shell};
pub use screen::{Screen, TabId, UserRole};
pub use state::{AuthSignals, NavContext, NavigationState};
