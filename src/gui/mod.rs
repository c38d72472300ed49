pub mod app;
pub mod preference_modal;
pub mod toast;

pub use app::PreferenceApp;
pub use preference_modal::PreferenceModal;
