pub mod controller;
pub mod form;
pub mod telemetry;


pub use controller::{
    Effect,
    LoadState,
    Notice,
    PreferenceController,
    Trigger,
};
pub use form::{
    Field,
    PreferenceForm,
};
pub use telemetry::{
    InteractEvent,
    LogTelemetry,
    TelemetrySink,
};
