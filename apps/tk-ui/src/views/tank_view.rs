//! Tank diagram drawn with the egui painter.
//!
//! Shapes are placed in diagram coordinates: `x` in `[0, 1]` left to right
//! and `y` in `[-0.1, 1.1]` bottom to top, with the tank spanning `y = 0..1`.

use egui::{Align2, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use tk_sim::Session;

use crate::theme;

const Y_MIN: f32 = -0.1;
const Y_MAX: f32 = 1.1;

const VALVE_CENTER: [f32; 2] = [0.40, 1.00];
const VALVE_RADIUS: f32 = 0.04;

/// Maps diagram coordinates onto a square region of the screen.
#[derive(Clone, Copy, Debug)]
struct DiagramLayout {
    origin_x: f32,
    bottom: f32,
    side: f32,
}

impl DiagramLayout {
    fn fit(rect: Rect) -> Self {
        let side = rect.width().min(rect.height());
        Self {
            origin_x: rect.center().x - side / 2.0,
            bottom: rect.center().y + side / 2.0,
            side,
        }
    }

    fn pos(&self, x: f32, y: f32) -> Pos2 {
        Pos2::new(
            self.origin_x + x * self.side,
            self.bottom - (y - Y_MIN) / (Y_MAX - Y_MIN) * self.side,
        )
    }

    fn rect(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_two_pos(self.pos(x0, y0), self.pos(x1, y1))
    }

    fn scale(&self, d: f32) -> f32 {
        d * self.side / (Y_MAX - Y_MIN)
    }

    fn valve_center(&self) -> Pos2 {
        self.pos(VALVE_CENTER[0], VALVE_CENTER[1])
    }

    fn valve_radius(&self) -> f32 {
        self.scale(VALVE_RADIUS)
    }

    fn hits_valve(&self, p: Pos2) -> bool {
        // Slightly generous hit area around the handwheel.
        p.distance(self.valve_center()) <= self.valve_radius() * 1.5
    }
}

#[derive(Default)]
pub struct TankView;

impl TankView {
    /// Draws the diagram. Returns `true` when the inlet valve was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, session: &Session) -> bool {
        let height = (ui.available_height() * 0.5).clamp(220.0, 520.0);
        let size = Vec2::new(ui.available_width(), height);
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let layout = DiagramLayout::fit(response.rect);

        painter.rect_filled(response.rect, 0.0, theme::BACKGROUND);

        // Tank body
        painter.rect_filled(layout.rect(0.2, 0.0, 0.8, 1.0), 0.0, theme::TANK_FILL);

        // Liquid
        let level = session.level() as f32;
        if level > 0.0 {
            painter.rect_filled(layout.rect(0.21, 0.0, 0.79, level), 0.0, theme::LIQUID);
        }
        painter.rect_stroke(
            layout.rect(0.2, 0.0, 0.8, 1.0),
            0.0,
            Stroke::new(4.0, theme::TANK_OUTLINE),
        );

        // Inlet pipe and valve
        let pipe_stroke = Stroke::new(2.0, theme::TANK_OUTLINE);
        let inlet = layout.rect(0.35, 0.95, 0.45, 1.05);
        painter.rect_filled(inlet, 0.0, theme::PIPE);
        painter.rect_stroke(inlet, 0.0, pipe_stroke);

        let valve_color = if session.is_inlet_open() {
            theme::OPEN
        } else {
            theme::CLOSED
        };
        painter.circle_filled(layout.valve_center(), layout.valve_radius(), valve_color);
        painter.circle_stroke(layout.valve_center(), layout.valve_radius(), pipe_stroke);

        // Outlet pipe
        let outlet = layout.rect(0.55, -0.05, 0.65, 0.05);
        painter.rect_filled(outlet, 0.0, theme::PIPE);
        painter.rect_stroke(outlet, 0.0, pipe_stroke);

        painter.text(
            layout.pos(0.5, 0.5),
            Align2::CENTER_CENTER,
            format!("{:.1}%", session.level_pct()),
            FontId::proportional(32.0),
            theme::TEXT,
        );

        if session.is_overflow() {
            painter.text(
                layout.pos(0.5, 0.85),
                Align2::CENTER_CENTER,
                "⚠ OVERFLOW",
                FontId::proportional(20.0),
                theme::CLOSED,
            );
        }

        let over_valve = response
            .hover_pos()
            .is_some_and(|p| layout.hits_valve(p));
        if over_valve {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        response.clicked()
            && response
                .interact_pointer_pos()
                .is_some_and(|p| layout.hits_valve(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DiagramLayout {
        DiagramLayout::fit(Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(240.0, 120.0)))
    }

    #[test]
    fn fits_square_centered_in_rect() {
        let l = layout();
        assert_eq!(l.side, 120.0);
        assert_eq!(l.pos(0.0, Y_MIN), Pos2::new(60.0, 120.0));
        assert_eq!(l.pos(1.0, Y_MAX), Pos2::new(180.0, 0.0));
    }

    #[test]
    fn tank_top_is_above_tank_bottom() {
        let l = layout();
        let tank = l.rect(0.2, 0.0, 0.8, 1.0);
        assert!(tank.min.y < tank.max.y);
        assert!((tank.height() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn valve_hit_test() {
        let l = layout();
        assert!(l.hits_valve(l.valve_center()));
        assert!(!l.hits_valve(l.pos(0.7, 0.2)));
    }
}
