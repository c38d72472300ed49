use std::time::{
    Duration,
    Instant,
};

use eframe::egui;

use crate::preference::Notice;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    created: Instant,
}

/// Short lived notifications stacked in the bottom right corner.
pub struct Toasts {
    items: Vec<Toast>,
    ttl: Duration,
}

impl Toasts {
    pub fn new() -> Self {
        Self { items: Vec::new(), ttl: TOAST_TTL }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.push_at(kind, message, Instant::now());
    }

    fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match kind {
            ToastKind::Success => tracing::info!(toast = %message),
            ToastKind::Error => tracing::warn!(toast = %message),
        }
        self.items.push(Toast { kind, message, created: now });
    }

    pub fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Success(message) => self.push(ToastKind::Success, message),
            Notice::Error(message) => self.push(ToastKind::Error, message),
        }
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items.retain(|t| now.duration_since(t.created) < ttl);
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.items.is_empty() {
            return;
        }

        let dark = ctx.style().visuals.dark_mode;
        egui::Area::new(egui::Id::new("toasts"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::Vec2::new(-12.0, -12.0))
            .show(ctx, |ui| {
                for toast in &self.items {
                    let color = match (toast.kind, dark) {
                        (ToastKind::Success, true) => egui::Color32::from_rgb(0x50, 0xfa, 0x7b),
                        (ToastKind::Success, false) => egui::Color32::from_rgb(80, 180, 100),
                        (ToastKind::Error, true) => egui::Color32::from_rgb(0xff, 0x55, 0x55),
                        (ToastKind::Error, false) => egui::Color32::from_rgb(200, 80, 80),
                    };
                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.5, color))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.colored_label(color, &toast.message);
                        });
                    ui.add_space(6.0);
                }
            });

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}
