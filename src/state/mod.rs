//! Application state shared outside the preference editor.
//!
//! Only [`AppState::apply`] mutates it. Components publish [`StateUpdate`]s
//! instead of writing fields directly.

use crate::core::{
    tasks::TaskRequest,
    FrameworkSelection,
    LibraryFilters,
    UserPreference,
};

#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// Re-read the signed in user from the backend.
    RefreshUser,
    UserFilters(FrameworkSelection),
    LibraryFilters(LibraryFilters),
    User(UserPreference),
}

#[derive(Debug, Default)]
pub struct AppState {
    user: Option<UserPreference>,
    user_filters: Option<FrameworkSelection>,
    library_filters: Option<LibraryFilters>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&UserPreference> {
        self.user.as_ref()
    }

    pub fn user_filters(&self) -> Option<&FrameworkSelection> {
        self.user_filters.as_ref()
    }

    pub fn library_filters(&self) -> Option<&LibraryFilters> {
        self.library_filters.as_ref()
    }

    /// Applies one update. Returns a backend request when the update needs one.
    pub fn apply(&mut self, update: StateUpdate) -> Option<TaskRequest> {
        match update {
            StateUpdate::RefreshUser => return Some(TaskRequest::ReadUser),
            StateUpdate::UserFilters(selection) => {
                tracing::info!(board = %selection.board, "User filters updated");
                self.user_filters = Some(selection);
            }
            StateUpdate::LibraryFilters(filters) => {
                tracing::info!(board = ?filters.board, "Library filters updated");
                self.library_filters = Some(filters);
            }
            StateUpdate::User(user) => {
                if self.user_filters.is_none() {
                    self.user_filters = Some(user.framework.clone());
                }
                self.user = Some(user);
            }
        }
        None
    }
}
