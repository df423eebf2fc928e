// Reusable UI widgets

pub mod logo;
pub mod tab_bar;
pub mod text_input;
pub mod toast;

pub use logo::CourtsideLogo;
pub use tab_bar::TabBar;
pub use text_input::{TextInput, TextInputWidget};
pub use toast::{Toast, ToastManager, ToastWidget};
