use std::sync::Arc;

use eframe::egui;

use crate::{
    config::{
        AppConfig,
        Messages,
    },
    core::{
        tasks::TaskManager,
        BoardOption,
        Term,
        UserPreference,
    },
    preference::{
        Effect,
        Field,
        LoadState,
        PreferenceController,
        TelemetrySink,
    },
};

enum Action {
    Board(Option<BoardOption>),
    Medium(Vec<Term>),
    Class(Vec<Term>),
    Subjects(Vec<Term>),
    Retry,
    Save,
    Dismiss,
}

/// Modal editor for the user's board, medium, class and subjects.
///
/// Owns a scoped task manager: closing the modal drops it and cancels any
/// lookup still in flight.
pub struct PreferenceModal {
    controller: PreferenceController,
    tasks: TaskManager,
    telemetry: Arc<dyn TelemetrySink>,
    messages: Messages,
}

impl PreferenceModal {
    pub fn open(
        preference: UserPreference,
        config: &AppConfig,
        tasks: TaskManager,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> (Self, Vec<Effect>) {
        let controller = PreferenceController::new(
            preference,
            config.telemetry.clone(),
            config.messages.clone(),
        );
        let mut modal = Self { controller, tasks, telemetry, messages: config.messages.clone() };
        let effects = modal.controller.start();
        let rest = modal.route(effects);
        (modal, rest)
    }

    /// Handles dispatch and telemetry effects, returns the rest for the app.
    fn route(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut rest = Vec::new();
        for effect in effects {
            match effect {
                Effect::Dispatch(request) => self.tasks.dispatch(request),
                Effect::Telemetry(event) => self.telemetry.interact(&event),
                other => rest.push(other),
            }
        }
        rest
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Vec<Effect> {
        let mut effects = Vec::new();
        for result in self.tasks.poll_results() {
            effects.extend(self.controller.apply(result));
        }

        let mut actions = Vec::new();
        let controller = &self.controller;
        let messages = &self.messages;

        let modal = egui::Modal::new(egui::Id::new("content_preference_modal")).show(ctx, |ui| {
            ui.set_width(440.0);
            ui.heading("Update content preferences");
            ui.add_space(8.0);

            ui_load_state(ui, controller.boards_state(), messages, &mut actions);
            ui_load_state(ui, controller.categories_state(), messages, &mut actions);

            egui::Grid::new("content_preference_grid").num_columns(2).spacing([12.0, 10.0]).show(
                ui,
                |ui| {
                    ui_board(ui, controller, &mut actions);
                    ui.end_row();

                    let form = controller.form();
                    let options = controller.options();

                    if let Some(medium) =
                        ui_multi_select(ui, Field::Medium, &options.medium, &form.medium)
                    {
                        actions.push(Action::Medium(medium));
                    }
                    ui.end_row();

                    if let Some(class) = ui_multi_select(ui, Field::Class, &options.class, &form.class)
                    {
                        actions.push(Action::Class(class));
                    }
                    ui.end_row();

                    if let Some(subjects) =
                        ui_multi_select(ui, Field::Subjects, &options.subjects, &form.subjects)
                    {
                        actions.push(Action::Subjects(subjects));
                    }
                    ui.end_row();
                },
            );

            ui.add_space(12.0);
            ui.separator();

            ui.horizontal(|ui| {
                let label = if controller.is_saving() { "Saving..." } else { "Submit" };
                if ui.add_enabled(controller.can_save(), egui::Button::new(label)).clicked() {
                    actions.push(Action::Save);
                }
                if controller.is_saving() {
                    ui.spinner();
                }
                let cancel = egui::Button::new("Cancel");
                if ui.add_enabled(controller.can_dismiss(), cancel).clicked() {
                    actions.push(Action::Dismiss);
                }
            });
        });

        if modal.should_close() {
            actions.push(Action::Dismiss);
        }

        for action in actions {
            let produced = match action {
                Action::Board(board) => self.controller.select_board(board),
                Action::Medium(medium) => {
                    self.controller.select_medium(medium);
                    Vec::new()
                }
                Action::Class(class) => {
                    self.controller.select_class(class);
                    Vec::new()
                }
                Action::Subjects(subjects) => {
                    self.controller.on_subject_change(subjects);
                    Vec::new()
                }
                Action::Retry => self.controller.retry(),
                Action::Save => self.controller.update_user(),
                Action::Dismiss => self.controller.dismiss(),
            };
            effects.extend(produced);
        }

        self.route(effects)
    }
}

fn ui_load_state(
    ui: &mut egui::Ui,
    state: &LoadState,
    messages: &Messages,
    actions: &mut Vec<Action>,
) {
    match state {
        LoadState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading...");
            });
        }
        LoadState::Failed(error) => {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::RED, format!("{}: {}", messages.load_failure, error));
                if ui.button("Retry").clicked() {
                    actions.push(Action::Retry);
                }
            });
        }
        LoadState::Idle | LoadState::Loaded => {}
    }
}

fn ui_board(ui: &mut egui::Ui, controller: &PreferenceController, actions: &mut Vec<Action>) {
    ui.label(required_label(Field::Board));

    let current = controller.form().board.as_ref();
    let text = current.map(|b| b.name.as_str()).unwrap_or("Select board");

    egui::ComboBox::from_id_salt("preference_board").width(300.0).selected_text(text).show_ui(
        ui,
        |ui| {
            for board in &controller.options().board {
                let selected = current.is_some_and(|c| c.identifier == board.identifier);
                if ui.selectable_label(selected, &board.name).clicked() && !selected {
                    actions.push(Action::Board(Some(board.clone())));
                }
            }
        },
    );
}

fn required_label(field: Field) -> String {
    if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

/// Checkbox dropdown. Returns the new selection when the user toggled an entry.
fn ui_multi_select(
    ui: &mut egui::Ui,
    field: Field,
    options: &[Term],
    selected: &[Term],
) -> Option<Vec<Term>> {
    ui.label(required_label(field));

    let text = if selected.is_empty() {
        format!("Select {}", field.label().to_lowercase())
    } else {
        selected.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ")
    };

    let mut changed = None;
    ui.add_enabled_ui(!options.is_empty(), |ui| {
        egui::ComboBox::from_id_salt(field.label())
            .width(300.0)
            .selected_text(text)
            .close_behavior(egui::PopupCloseBehavior::CloseOnClickOutside)
            .show_ui(ui, |ui| {
                for option in options {
                    let mut checked = selected.iter().any(|s| s.identifier == option.identifier);
                    if ui.checkbox(&mut checked, &option.name).changed() {
                        changed = Some(toggle_selection(options, selected, option, checked));
                    }
                }
            });
    });
    changed
}

/// Selection after toggling `option`, kept in option order.
fn toggle_selection(options: &[Term], selected: &[Term], option: &Term, checked: bool) -> Vec<Term> {
    options
        .iter()
        .filter(|o| {
            if o.identifier == option.identifier {
                checked
            } else {
                selected.iter().any(|s| s.identifier == o.identifier)
            }
        })
        .cloned()
        .collect()
}
