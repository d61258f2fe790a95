use egui_plot::{Legend, Line, Plot, PlotPoints};
use tk_sim::History;

use crate::theme;

pub struct HistoryView {
    show_flows: bool,
}

impl Default for HistoryView {
    fn default() -> Self {
        Self { show_flows: true }
    }
}

impl HistoryView {
    pub fn show(&mut self, ui: &mut egui::Ui, history: &History) {
        ui.horizontal(|ui| {
            ui.heading("History");
            ui.weak(format!("{} / {} samples", history.len(), history.capacity()));
            ui.checkbox(&mut self.show_flows, "Show flows");
        });

        if history.is_empty() {
            ui.label("No samples yet.");
            return;
        }

        let plot_height = if self.show_flows {
            (ui.available_height() * 0.55).max(120.0)
        } else {
            ui.available_height().max(160.0)
        };

        Plot::new("level_history")
            .height(plot_height)
            .legend(Legend::default())
            .x_axis_label("Time (s)")
            .y_axis_label("Level (%)")
            .include_y(0.0)
            .include_y(100.0)
            .allow_drag(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(history.points(|s| s.level_pct)))
                        .name("Level (%)")
                        .color(theme::LEVEL_LINE)
                        .width(2.0),
                );
            });

        if self.show_flows {
            Plot::new("flow_history")
                .height(ui.available_height().max(100.0))
                .legend(Legend::default())
                .x_axis_label("Time (s)")
                .y_axis_label("Flow (m³/s)")
                .include_y(0.0)
                .allow_drag(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(PlotPoints::from(history.points(|s| s.inlet_flow)))
                            .name("Inlet")
                            .color(theme::OPEN),
                    );
                    plot_ui.line(
                        Line::new(PlotPoints::from(history.points(|s| s.outlet_flow)))
                            .name("Outlet")
                            .color(theme::CLOSED),
                    );
                });
        }
    }
}
