use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tk_app::{ExportFormat, export_history, load_config, start_session};
use tk_project::SessionConfig;
use tk_sim::{Clock, MonotonicClock, Session};

use crate::theme;
use crate::views::controls_view::pause_button_label;
use crate::views::{ControlsView, HistoryView, OverlayView, TankView};

pub struct TankflowApp {
    clock: MonotonicClock,
    config: SessionConfig,
    config_path: Option<PathBuf>,
    session: Option<Session>,
    started_at: DateTime<Utc>,
    status: Option<String>,

    tank_view: TankView,
    controls_view: ControlsView,
    history_view: HistoryView,
    overlay_view: OverlayView,
}

impl TankflowApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config_path: Option<PathBuf>) -> Self {
        theme::apply(&cc.egui_ctx);

        let clock = MonotonicClock::new();
        let mut status = None;
        let config = match load_config(config_path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default config");
                status = Some(format!("Config not loaded: {e}"));
                SessionConfig::default()
            }
        };
        let session = match start_session(&config, clock.now_s()) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::error!(error = %e, "failed to start session");
                status = Some(format!("Session not started: {e}"));
                None
            }
        };

        Self {
            clock,
            config,
            config_path,
            session,
            started_at: Utc::now(),
            status,
            tank_view: TankView::default(),
            controls_view: ControlsView::default(),
            history_view: HistoryView::default(),
            overlay_view: OverlayView::default(),
        }
    }

    fn export_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn export_csv(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let file_name = format!("tank-history-{}.csv", Utc::now().format("%Y%m%d-%H%M%S"));
        let path = self.export_dir().join(file_name);
        self.status = Some(
            match export_history(&path, ExportFormat::Csv, self.started_at, session.history()) {
                Ok(()) => format!("Exported {} samples to {}", session.history().len(), path.display()),
                Err(e) => {
                    tracing::error!(error = %e, "history export failed");
                    format!("Export failed: {e}")
                }
            },
        );
    }
}

impl eframe::App for TankflowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_s = self.clock.now_s();
        if let Some(session) = &mut self.session {
            session.tick(now_s);
        }

        let mut export_requested = false;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("🛢 {}", self.config.name));
                ui.separator();
                if let Some(session) = &mut self.session {
                    if ui.button(pause_button_label(session.run_state())).clicked() {
                        session.toggle_pause();
                    }
                    if ui.button("🔄 Reset").clicked() {
                        session.reset();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(!session.history().is_empty(), egui::Button::new("Export history..."))
                        .clicked()
                    {
                        export_requested = true;
                    }
                }
            });
        });
        if export_requested {
            self.export_csv();
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(message) => ui.label(message),
                    None => ui.weak("Ready"),
                };
                if let Some(path) = &self.config_path {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(path.display().to_string());
                    });
                }
            });
        });

        let Some(session) = &mut self.session else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.colored_label(theme::CLOSED, "No simulation session is running.");
            });
            return;
        };

        egui::SidePanel::right("controls")
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.controls_view.show(ui, session);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🔧 Open Valve Control").clicked() {
                    session.open_overlay(now_s);
                }
                ui.weak("or click the valve in the diagram");
            });
            if self.tank_view.show(ui, session) {
                session.open_overlay(now_s);
            }
            ui.separator();
            self.history_view.show(ui, session.history());
        });

        if session.overlay().is_open() {
            self.overlay_view.show(ctx, session, now_s);
        }

        ctx.request_repaint_after(session.tick_interval());
    }
}
