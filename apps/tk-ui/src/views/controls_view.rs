//! Right-hand control column: inlet toggle, setpoint sliders and readouts.

use tk_controls::{BoundedSetpoint, RunState};
use tk_sim::Session;

use crate::theme;

#[derive(Default)]
pub struct ControlsView;

impl ControlsView {
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut Session) {
        ui.heading("Controls");
        ui.add_space(4.0);

        ui.group(|ui| {
            ui.label("Inlet valve");
            let (label, status, color) = if session.is_inlet_open() {
                ("Close Inlet Valve", "Inlet valve is OPEN", theme::OPEN)
            } else {
                ("Open Inlet Valve", "Inlet valve is CLOSED", theme::CLOSED)
            };
            if ui.add_sized([ui.available_width(), 28.0], egui::Button::new(label)).clicked() {
                session.toggle_inlet();
            }
            ui.colored_label(color, status);
        });

        ui.add_space(6.0);
        ui.group(|ui| {
            ui.label("Flow setpoints");
            if let Some(v) = setpoint_slider(ui, session.inlet_setpoint(), "Inlet flow (m³/s)") {
                session.set_inlet_flow(v);
            }
            if let Some(v) = setpoint_slider(ui, session.outlet_setpoint(), "Outlet flow (m³/s)") {
                session.set_outlet_flow(v);
            }
        });

        ui.add_space(6.0);
        ui.group(|ui| {
            ui.label("Tank");
            if let Some(v) = setpoint_slider(ui, session.area_setpoint(), "Cross-section (m²)") {
                session.set_cross_section_area(v);
            }
        });

        ui.add_space(6.0);
        ui.group(|ui| {
            ui.label("Simulation");
            ui.horizontal(|ui| {
                if ui.button(pause_button_label(session.run_state())).clicked() {
                    session.toggle_pause();
                }
                if ui.button("🔄 Reset").clicked() {
                    session.reset();
                }
            });
            if session.is_paused() {
                ui.weak("Paused");
            }
        });

        ui.add_space(6.0);
        ui.separator();
        ui.heading("Readouts");
        egui::Grid::new("readouts")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Volume");
                ui.label(format!(
                    "{:.3} / {:.3} m³",
                    session.volume_m3(),
                    session.max_volume_m3()
                ));
                ui.end_row();

                ui.label("Level");
                ui.label(format!("{:.1} %", session.level_pct()));
                ui.end_row();

                ui.label("Inlet flow");
                ui.label(format!("{:.2} m³/s", session.inlet_flow_m3ps()));
                ui.end_row();

                ui.label("Outlet flow");
                ui.label(format!("{:.2} m³/s", session.outlet_flow_m3ps()));
                ui.end_row();

                ui.label("Net flow");
                ui.label(format!(
                    "{:+.2} m³/s",
                    session.inlet_flow_m3ps() - session.outlet_flow_m3ps()
                ));
                ui.end_row();

                ui.label("Valve position");
                ui.label(format!("{:.0} %", session.valve().position() * 100.0));
                ui.end_row();
            });

        if session.is_overflow() {
            ui.add_space(4.0);
            ui.colored_label(theme::CLOSED, "⚠ Tank is at capacity");
        }
    }
}

/// Label for the button that performs the next run-state transition.
pub fn pause_button_label(state: RunState) -> &'static str {
    match state {
        RunState::Running => "⏸ Pause",
        RunState::Paused => "▶ Resume",
    }
}

/// Draws a slider bound to a setpoint's range. Returns the new value when
/// the operator moved it.
fn setpoint_slider(ui: &mut egui::Ui, setpoint: &BoundedSetpoint, text: &str) -> Option<f64> {
    let range = setpoint.range();
    let mut value = setpoint.value();
    let response = ui.add(
        egui::Slider::new(&mut value, range.as_inclusive())
            .step_by(range.step)
            .text(text),
    );
    response.changed().then_some(value)
}
