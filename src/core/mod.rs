pub mod errors;
pub mod http;
pub mod models;
pub mod tasks;

pub use errors::PrefError;
pub use models::{
    Association,
    BoardOption,
    FrameworkCategory,
    FrameworkSelection,
    LibraryFilters,
    Term,
    UpdateUserRequest,
    UserPreference,
};
