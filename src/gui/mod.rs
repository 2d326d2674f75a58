//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::ReviewDashboardApp;
pub use chart_viewer::DashboardView;
pub use control_panel::{ControlPanel, ControlPanelAction};
