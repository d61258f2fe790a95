//! Valve control overlay. The session owns the open/closed state and the
//! auto-dismiss timer; this view only renders it and forwards actions.

use tk_sim::Session;

use crate::theme;

#[derive(Default)]
pub struct OverlayView;

impl OverlayView {
    pub fn show(&mut self, ctx: &egui::Context, session: &mut Session, now_s: f64) {
        let mut open = true;
        let mut close_clicked = false;

        egui::Window::new("🔧 Valve Control Panel")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let position = session.valve().position();
                let mut percent = (position * 100.0).round() as u32;
                if ui
                    .add(egui::Slider::new(&mut percent, 0..=100).text("Valve Position (%)"))
                    .changed()
                {
                    session.set_valve_position(f64::from(percent) / 100.0);
                }

                ui.add(egui::ProgressBar::new(position as f32).fill(theme::LEVEL_LINE));
                ui.label(format!("Open: {:.0}%", position * 100.0));
                ui.weak(format!(
                    "Flow capacity: {:.3} (Cv {:.2})",
                    session.valve().flow_rate(),
                    session.valve().flow_coefficient()
                ));

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Fully Open").clicked() {
                        session.valve_fully_open();
                    }
                    if ui.button("Fully Close").clicked() {
                        session.valve_fully_close();
                    }
                });

                ui.add_space(6.0);
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
                if let Some(remaining) = session.overlay().remaining_s(now_s) {
                    ui.weak(format!("Closes automatically in {remaining:.1} s"));
                }
            });

        if close_clicked || !open {
            session.close_overlay();
        }
    }
}
