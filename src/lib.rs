//! Desktop editor for a learner's content preferences: board, medium, class
//! and subjects picked from a framework taxonomy and saved to the backend.

pub mod api;
pub mod config;
pub mod core;
pub mod framework;
pub mod gui;
pub mod persistence;
pub mod preference;
pub mod state;
