use std::sync::Arc;

use eframe::egui;

use super::{
    preference_modal::PreferenceModal,
    toast::{
        ToastKind,
        Toasts,
    },
};
use crate::{
    config::AppConfig,
    core::{
        tasks::{
            TaskManager,
            TaskRequest,
            TaskResult,
        },
        FrameworkSelection,
        UserPreference,
    },
    preference::{
        Effect,
        InteractEvent,
        TelemetrySink,
    },
    state::{
        AppState,
        StateUpdate,
    },
};

pub struct PreferenceApp {
    config: AppConfig,
    state: AppState,
    tasks: TaskManager,
    telemetry: Arc<dyn TelemetrySink>,
    modal: Option<PreferenceModal>,
    toasts: Toasts,
    loading_user: bool,
    user_error: Option<String>,
}

impl PreferenceApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        mut tasks: TaskManager,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        tasks.set_waker(move || ctx.request_repaint());

        let mut app = Self {
            config,
            state: AppState::new(),
            tasks,
            telemetry,
            modal: None,
            toasts: Toasts::new(),
            loading_user: false,
            user_error: None,
        };
        app.load_user();
        app
    }

    fn load_user(&mut self) {
        self.loading_user = true;
        self.user_error = None;
        self.tasks.dispatch(TaskRequest::ReadUser);
    }

    fn open_editor(&mut self) {
        let Some(user) = self.state.user().cloned() else {
            return;
        };
        tracing::info!(user = %user.id, "Opening content preference editor");
        let (modal, effects) =
            PreferenceModal::open(user, &self.config, self.tasks.scoped(), self.telemetry.clone());
        self.modal = Some(modal);
        self.handle_effects(effects);
    }

    fn poll_tasks(&mut self) {
        for result in self.tasks.poll_results() {
            match result {
                TaskResult::UserRead(result) => {
                    self.loading_user = false;
                    self.user_error = apply_user_read(&mut self.state, &mut self.toasts, result);
                }
                other => tracing::debug!(task = other.task_type(), "Unhandled app task result"),
            }
        }
    }

    fn handle_effects(&mut self, effects: Vec<Effect>) {
        let routed = route_effects(&mut self.state, &mut self.toasts, effects);
        if routed.close_editor {
            self.modal = None;
        }
        for event in &routed.events {
            self.telemetry.interact(event);
        }
        for request in routed.requests {
            self.tasks.dispatch(request);
        }
    }

    fn ui_profile(&mut self, ui: &mut egui::Ui) {
        if self.loading_user {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading profile...");
            });
            return;
        }

        if let Some(error) = self.user_error.clone() {
            ui.colored_label(egui::Color32::RED, format!("Could not load profile: {error}"));
            if ui.button("Retry").clicked() {
                self.load_user();
            }
            return;
        }

        let Some(user) = self.state.user() else {
            return;
        };

        ui.label(egui::RichText::new(&user.name).strong());
        ui.add_space(6.0);
        ui_selection(ui, "profile_selection", &user.framework);

        ui.add_space(10.0);
        let editing = self.modal.is_some();
        if ui.add_enabled(!editing, egui::Button::new("Edit content preferences")).clicked() {
            self.open_editor();
        }

        if let Some(filters) = self.state.library_filters() {
            ui.add_space(16.0);
            ui.separator();
            ui.label(egui::RichText::new("Library filters").strong());
            ui.label(format!(
                "Board: {}  Medium: {}  Class: {}",
                filters.board.join(", "),
                filters.medium.join(", "),
                filters.grade_level.join(", ")
            ));
        }
    }
}

/// What is left of the editor's effects once state and toasts have been updated.
#[derive(Debug, Default, PartialEq)]
struct Routed {
    requests: Vec<TaskRequest>,
    events: Vec<InteractEvent>,
    close_editor: bool,
}

fn route_effects(state: &mut AppState, toasts: &mut Toasts, effects: Vec<Effect>) -> Routed {
    let mut routed = Routed::default();
    for effect in effects {
        match effect {
            Effect::Notify(notice) => toasts.notify(notice),
            Effect::State(update) => routed.requests.extend(state.apply(update)),
            Effect::Close(saved) => {
                routed.close_editor = true;
                if let Some(user) = saved {
                    state.apply(StateUpdate::User(user));
                }
            }
            Effect::Dispatch(request) => routed.requests.push(request),
            Effect::Telemetry(event) => routed.events.push(event),
        }
    }
    routed
}

/// Stores a freshly read user. Returns the error to show in place of the
/// profile, which only happens while no user is known yet.
fn apply_user_read(
    state: &mut AppState,
    toasts: &mut Toasts,
    result: Result<UserPreference, String>,
) -> Option<String> {
    match result {
        Ok(user) => {
            state.apply(StateUpdate::User(user));
            None
        }
        Err(e) if state.user().is_some() => {
            tracing::warn!("Refreshing user failed: {e}");
            toasts.push(ToastKind::Error, format!("Could not refresh profile: {e}"));
            None
        }
        Err(e) => {
            tracing::warn!("Loading user failed: {e}");
            Some(e)
        }
    }
}

fn ui_selection(ui: &mut egui::Ui, id: &str, selection: &FrameworkSelection) {
    egui::Grid::new(id).num_columns(2).spacing([12.0, 4.0]).show(ui, |ui| {
        ui.label("Board");
        ui.label(&selection.board);
        ui.end_row();
        ui.label("Medium");
        ui.label(selection.medium.join(", "));
        ui.end_row();
        ui.label("Class");
        ui.label(selection.grade_level.join(", "));
        ui.end_row();
        ui.label("Subjects");
        ui.label(selection.subjects.join(", "));
        ui.end_row();
    });
}

impl eframe::App for PreferenceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Content preferences");
            ui.add_space(8.0);
            self.ui_profile(ui);
        });

        if let Some(modal) = self.modal.as_mut() {
            let effects = modal.show(ctx);
            self.handle_effects(effects);
        }

        self.toasts.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::LibraryFilters,
        preference::Notice,
    };

    fn user(board: &str) -> UserPreference {
        UserPreference {
            id: "u-1".to_string(),
            name: "guest".to_string(),
            framework: FrameworkSelection {
                board: board.to_string(),
                medium: vec!["English".to_string()],
                grade_level: vec!["Class 1".to_string()],
                subjects: vec![],
            },
        }
    }

    #[test]
    fn test_saved_close_updates_state_and_refreshes_user() {
        let mut state = AppState::new();
        let mut toasts = Toasts::new();
        state.apply(StateUpdate::User(user("NCERT")));

        let saved = user("CBSE");
        let effects = vec![
            Effect::State(StateUpdate::RefreshUser),
            Effect::State(StateUpdate::LibraryFilters(LibraryFilters::from_selection(
                &saved.framework,
            ))),
            Effect::Close(Some(saved.clone())),
            Effect::State(StateUpdate::UserFilters(saved.framework.clone())),
            Effect::Notify(Notice::Success("Saved".to_string())),
        ];

        let routed = route_effects(&mut state, &mut toasts, effects);

        assert_eq!(routed.requests, vec![TaskRequest::ReadUser]);
        assert!(routed.close_editor);
        assert_eq!(state.user(), Some(&saved));
        assert_eq!(state.user_filters(), Some(&saved.framework));
        assert_eq!(state.library_filters().unwrap().board, vec!["CBSE".to_string()]);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].kind, ToastKind::Success);
    }

    #[test]
    fn test_dismiss_closes_without_touching_state() {
        let mut state = AppState::new();
        let mut toasts = Toasts::new();
        state.apply(StateUpdate::User(user("NCERT")));

        let routed = route_effects(&mut state, &mut toasts, vec![Effect::Close(None)]);

        assert!(routed.close_editor);
        assert!(routed.requests.is_empty());
        assert_eq!(state.user(), Some(&user("NCERT")));
        assert!(toasts.items().is_empty());
    }

    #[test]
    fn test_dispatches_pass_through_in_order() {
        let mut state = AppState::new();
        let mut toasts = Toasts::new();

        let routed = route_effects(&mut state, &mut toasts, vec![
            Effect::Dispatch(TaskRequest::CustodianOrg),
            Effect::State(StateUpdate::RefreshUser),
        ]);

        assert_eq!(routed.requests, vec![TaskRequest::CustodianOrg, TaskRequest::ReadUser]);
        assert!(!routed.close_editor);
        assert!(routed.events.is_empty());
    }

    #[test]
    fn test_first_user_read_failure_is_shown() {
        let mut state = AppState::new();
        let mut toasts = Toasts::new();

        let error = apply_user_read(&mut state, &mut toasts, Err("offline".to_string()));

        assert_eq!(error.as_deref(), Some("offline"));
        assert!(toasts.items().is_empty());
    }

    #[test]
    fn test_failed_refresh_keeps_profile_and_toasts() {
        let mut state = AppState::new();
        let mut toasts = Toasts::new();
        assert_eq!(apply_user_read(&mut state, &mut toasts, Ok(user("CBSE"))), None);

        let error = apply_user_read(&mut state, &mut toasts, Err("HTTP error 500".to_string()));

        assert_eq!(error, None);
        assert_eq!(state.user(), Some(&user("CBSE")));
        assert_eq!(toasts.items()[0].kind, ToastKind::Error);
        assert!(toasts.items()[0].message.contains("HTTP error 500"));
    }
}
