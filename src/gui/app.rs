//! Review Dashboard Main Application
//! Main window with the filter panel and the dashboard view.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{FilterEngine, FilterQuery, FilterResult, RevealState, ReviewTable};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use crate::report::DashboardReport;
use egui::SidePanel;
use tracing::{error, info};

const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 900;

/// Main application window.
pub struct ReviewDashboardApp {
    table: ReviewTable,
    control_panel: ControlPanel,
    reveal: RevealState,
    query: FilterQuery,
    result: FilterResult,
}

impl ReviewDashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, table: ReviewTable, config: &DashboardConfig) -> Self {
        let control_panel = ControlPanel::new(&config.default_category, config.default_language);
        let reveal = RevealState::default();
        let query = control_panel.settings.to_query();
        let result = FilterEngine::evaluate(&table, &query, reveal);

        let mut app = Self {
            table,
            control_panel,
            reveal,
            query,
            result,
        };
        let summary = app.source_summary();
        app.control_panel.set_status(&summary);
        app
    }

    fn source_summary(&self) -> String {
        let name = self
            .table
            .source()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "in-memory data".to_string());
        format!("{}: {} rows loaded", name, self.table.row_count())
    }

    /// Re-run the query with the current panel settings.
    fn refresh(&mut self) {
        self.query = self.control_panel.settings.to_query();
        self.result = FilterEngine::evaluate(&self.table, &self.query, self.reveal);
    }

    fn handle_show_comments(&mut self) {
        self.reveal.request();
        self.refresh();
    }

    fn handle_export_chart(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("comments_by_category.png")
            .save_file()
        else {
            return;
        };

        match StaticChartRenderer::save_png(
            &self.result.counts_by_category,
            &path,
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        ) {
            Ok(()) => {
                info!(path = %path.display(), "chart exported");
                self.control_panel
                    .set_status(&format!("Chart saved to {}", path.display()));
            }
            Err(e) => {
                error!(error = %e, "chart export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_export_report(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("review_report.json")
            .save_file()
        else {
            return;
        };

        match DashboardReport::new(&self.query, &self.result).save(&path) {
            Ok(()) => {
                info!(path = %path.display(), "report exported");
                self.control_panel
                    .set_status(&format!("Report saved to {}", path.display()));
            }
            Err(e) => {
                error!(error = %e, "report export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for ReviewDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::FiltersChanged => self.refresh(),
                        ControlPanelAction::ShowComments => self.handle_show_comments(),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::ExportReport => self.handle_export_report(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            DashboardView::show(ui, &self.result, &self.query.category);
        });
    }
}
