pub use super::handle::CancelToken;
use crate::core::{
    BoardOption,
    FrameworkCategory,
    UpdateUserRequest,
    UserPreference,
};

/// A backend call the task manager can run off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskRequest {
    CustodianOrg,
    ChannelFrameworks { org_id: String },
    FrameworkCategories { seq: u64, framework_id: String },
    UpdateUser(UpdateUserRequest),
    ReadUser,
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    CustodianOrg(Result<String, String>),
    ChannelFrameworks(Result<Vec<BoardOption>, String>),
    FrameworkCategories { seq: u64, result: Result<Vec<FrameworkCategory>, String> },
    UserUpdated { request: UpdateUserRequest, result: Result<(), String> },
    UserRead(Result<UserPreference, String>),
}

impl TaskRequest {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskRequest::CustodianOrg => "custodian_org",
            TaskRequest::ChannelFrameworks { .. } => "channel_frameworks",
            TaskRequest::FrameworkCategories { .. } => "framework_categories",
            TaskRequest::UpdateUser(_) => "update_user",
            TaskRequest::ReadUser => "read_user",
        }
    }
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::CustodianOrg(_) => "custodian_org",
            TaskResult::ChannelFrameworks(_) => "channel_frameworks",
            TaskResult::FrameworkCategories { .. } => "framework_categories",
            TaskResult::UserUpdated { .. } => "update_user",
            TaskResult::UserRead(_) => "read_user",
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            TaskResult::CustodianOrg(r) => r.is_ok(),
            TaskResult::ChannelFrameworks(r) => r.is_ok(),
            TaskResult::FrameworkCategories { result, .. } => result.is_ok(),
            TaskResult::UserUpdated { result, .. } => result.is_ok(),
            TaskResult::UserRead(r) => r.is_ok(),
        }
    }
}
