pub mod controls_view;
pub mod history_view;
pub mod overlay_view;
pub mod tank_view;

pub use controls_view::ControlsView;
pub use history_view::HistoryView;
pub use overlay_view::OverlayView;
pub use tank_view::TankView;
