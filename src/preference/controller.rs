use crate::{
    config::{
        Messages,
        TelemetryConfig,
    },
    core::{
        models::UpdateUserBody,
        tasks::{
            TaskRequest,
            TaskResult,
        },
        BoardOption,
        FrameworkCategory,
        LibraryFilters,
        PrefError,
        Term,
        UpdateUserRequest,
        UserPreference,
    },
    framework::{
        association_data,
        find_category,
        select_by_names,
        sorted_filters,
        BOARD,
        GRADE_LEVEL,
        MEDIUM,
        SUBJECT,
    },
    preference::{
        form::{
            Field,
            PreferenceForm,
        },
        telemetry::InteractEvent,
    },
    state::StateUpdate,
};

/// What caused a field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The user picked a value.
    Explicit,
    /// A parent field changed and the change is propagating down.
    Cascade,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Side effects requested by the controller. The caller routes them to the
/// task manager, telemetry sink, toasts and app state.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Dispatch(TaskRequest),
    Telemetry(InteractEvent),
    Notify(Notice),
    State(StateUpdate),
    /// Close the editor. Carries the saved preference when closing after a save.
    Close(Option<UserPreference>),
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub board: Vec<BoardOption>,
    pub medium: Vec<Term>,
    pub class: Vec<Term>,
    pub subjects: Vec<Term>,
}

/// Drives the cascading board → medium → class → subjects form.
///
/// The controller does no I/O. Operations that reach outside the form return
/// [`Effect`]s, and backend answers come back through
/// [`PreferenceController::apply`].
pub struct PreferenceController {
    preference: UserPreference,
    form: PreferenceForm,
    options: Options,
    categories: Vec<FrameworkCategory>,
    boards_state: LoadState,
    categories_state: LoadState,
    /// Sequence of the latest category request; older answers are stale.
    category_seq: u64,
    category_trigger: Trigger,
    saving: bool,
    telemetry: TelemetryConfig,
    messages: Messages,
}

impl PreferenceController {
    pub fn new(preference: UserPreference, telemetry: TelemetryConfig, messages: Messages) -> Self {
        Self {
            preference,
            form: PreferenceForm::new(),
            options: Options::default(),
            categories: Vec::new(),
            boards_state: LoadState::Idle,
            categories_state: LoadState::Idle,
            category_seq: 0,
            category_trigger: Trigger::Cascade,
            saving: false,
            telemetry,
            messages,
        }
    }

    pub fn form(&self) -> &PreferenceForm {
        &self.form
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn preference(&self) -> &UserPreference {
        &self.preference
    }

    pub fn boards_state(&self) -> &LoadState {
        &self.boards_state
    }

    pub fn categories_state(&self) -> &LoadState {
        &self.categories_state
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn can_save(&self) -> bool {
        !self.saving && self.form.is_valid()
    }

    /// Starts the custodian org → channel → board lookup chain.
    pub fn start(&mut self) -> Vec<Effect> {
        self.boards_state = LoadState::Loading;
        vec![Effect::Dispatch(TaskRequest::CustodianOrg)]
    }

    /// Re-issues whichever lookup last failed.
    pub fn retry(&mut self) -> Vec<Effect> {
        if self.boards_state.error().is_some() {
            return self.start();
        }
        if self.categories_state.error().is_some() {
            return self.on_board_change(self.category_trigger);
        }
        Vec::new()
    }

    fn defaults_apply(&self, trigger: Trigger) -> bool {
        trigger == Trigger::Cascade
            && self.form.board.as_ref().is_some_and(|b| b.name == self.preference.framework.board)
    }

    pub fn select_board(&mut self, board: Option<BoardOption>) -> Vec<Effect> {
        self.form.board = board;
        self.on_board_change(Trigger::Explicit)
    }

    pub fn select_medium(&mut self, medium: Vec<Term>) {
        self.form.medium = medium;
        self.on_medium_change(Trigger::Explicit);
    }

    pub fn select_class(&mut self, class: Vec<Term>) {
        self.form.class = class;
        self.on_class_change(Trigger::Explicit);
    }

    pub fn on_board_change(&mut self, trigger: Trigger) -> Vec<Effect> {
        self.options.medium.clear();
        self.options.class.clear();
        self.options.subjects.clear();
        self.form.clear_descendants(Field::Board);
        self.categories.clear();
        self.category_seq += 1;
        self.category_trigger = trigger;

        let Some(board) = &self.form.board else {
            self.categories_state = LoadState::Idle;
            return Vec::new();
        };

        self.categories_state = LoadState::Loading;
        vec![Effect::Dispatch(TaskRequest::FrameworkCategories {
            seq: self.category_seq,
            framework_id: board.identifier.clone(),
        })]
    }

    fn on_categories(&mut self, categories: Vec<FrameworkCategory>) -> Result<(), PrefError> {
        let boards = find_category(&categories, BOARD)
            .ok_or_else(|| PrefError::MissingCategory(BOARD.to_string()))?;
        self.options.medium =
            sorted_filters(association_data(&boards.terms, MEDIUM, &categories), MEDIUM);
        self.categories = categories;

        if self.defaults_apply(self.category_trigger) {
            self.form.medium =
                select_by_names(&self.options.medium, &self.preference.framework.medium);
        }
        self.on_medium_change(Trigger::Cascade);
        Ok(())
    }

    /// Recomputes class options from the cached categories. Never needs a fetch.
    pub fn on_medium_change(&mut self, trigger: Trigger) {
        self.options.class.clear();
        self.options.subjects.clear();
        self.form.clear_descendants(Field::Medium);

        if !self.form.medium.is_empty() {
            self.options.class = sorted_filters(
                association_data(&self.form.medium, GRADE_LEVEL, &self.categories),
                GRADE_LEVEL,
            );
            if self.defaults_apply(trigger) {
                self.form.class =
                    select_by_names(&self.options.class, &self.preference.framework.grade_level);
            }
            self.on_class_change(Trigger::Cascade);
        }
    }

    pub fn on_class_change(&mut self, trigger: Trigger) {
        self.options.subjects.clear();
        self.form.clear_descendants(Field::Class);

        if !self.form.class.is_empty() {
            self.options.subjects = sorted_filters(
                association_data(&self.form.class, SUBJECT, &self.categories),
                SUBJECT,
            );
            if self.defaults_apply(trigger) {
                self.form.subjects =
                    select_by_names(&self.options.subjects, &self.preference.framework.subjects);
            }
        }
    }

    pub fn on_subject_change(&mut self, subjects: Vec<Term>) {
        self.form.subjects = subjects;
    }

    /// Submits the form. The stored preference only changes once the backend
    /// accepts the update.
    pub fn update_user(&mut self) -> Vec<Effect> {
        if self.saving {
            return Vec::new();
        }
        if !self.form.is_valid() {
            tracing::debug!(missing = ?self.form.missing_fields(), "Form incomplete, not saving");
            return Vec::new();
        }

        let selection = self.form.selection();
        let event = InteractEvent::preference_update(&self.telemetry, &self.preference.id, &selection);
        let request = UpdateUserRequest {
            request: UpdateUserBody {
                identifier: self.preference.id.clone(),
                name: self.preference.name.clone(),
                framework: selection,
            },
        };

        self.saving = true;
        vec![Effect::Telemetry(event), Effect::Dispatch(TaskRequest::UpdateUser(request))]
    }

    /// Closes the editor unless a save is in flight, whose result must still
    /// reach the app state.
    pub fn dismiss(&mut self) -> Vec<Effect> {
        if self.saving {
            tracing::debug!("Save in progress, keeping the editor open");
            return Vec::new();
        }
        vec![Effect::Close(None)]
    }

    pub fn can_dismiss(&self) -> bool {
        !self.saving
    }

    /// Feeds a backend answer into the form.
    pub fn apply(&mut self, result: TaskResult) -> Vec<Effect> {
        match result {
            TaskResult::CustodianOrg(Ok(org_id)) => {
                vec![Effect::Dispatch(TaskRequest::ChannelFrameworks { org_id })]
            }
            TaskResult::ChannelFrameworks(Ok(frameworks)) => {
                self.options.board = sorted_filters(frameworks, BOARD);
                self.boards_state = LoadState::Loaded;
                self.form.board = self
                    .options
                    .board
                    .iter()
                    .find(|b| b.name == self.preference.framework.board)
                    .cloned();
                self.on_board_change(Trigger::Cascade)
            }
            TaskResult::CustodianOrg(Err(e)) | TaskResult::ChannelFrameworks(Err(e)) => {
                tracing::warn!("Board lookup failed: {e}");
                self.boards_state = LoadState::Failed(e);
                Vec::new()
            }
            TaskResult::FrameworkCategories { seq, .. } if seq != self.category_seq => {
                tracing::debug!(seq, current = self.category_seq, "Ignoring stale categories");
                Vec::new()
            }
            TaskResult::FrameworkCategories { result, .. } => {
                let outcome = result.and_then(|c| self.on_categories(c).map_err(|e| e.to_string()));
                self.categories_state = match outcome {
                    Ok(()) => LoadState::Loaded,
                    Err(e) => {
                        tracing::warn!("Framework lookup failed: {e}");
                        LoadState::Failed(e)
                    }
                };
                Vec::new()
            }
            TaskResult::UserUpdated { request, result } => self.on_user_updated(request, result),
            TaskResult::UserRead(_) => Vec::new(),
        }
    }

    fn on_user_updated(
        &mut self,
        request: UpdateUserRequest,
        result: Result<(), String>,
    ) -> Vec<Effect> {
        self.saving = false;

        if let Err(e) = result {
            tracing::warn!("Updating user preference failed: {e}");
            return vec![Effect::Notify(Notice::Error(self.messages.update_failure.clone()))];
        }

        let framework = request.request.framework;
        tracing::info!(board = %framework.board, "User preference updated");
        self.preference.framework = framework.clone();

        vec![
            Effect::State(StateUpdate::RefreshUser),
            Effect::State(StateUpdate::LibraryFilters(LibraryFilters::from_selection(&framework))),
            Effect::Close(Some(self.preference.clone())),
            Effect::State(StateUpdate::UserFilters(framework)),
            Effect::Notify(Notice::Success(self.messages.update_success.clone())),
        ]
    }
}
