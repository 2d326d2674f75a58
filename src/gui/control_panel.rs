//! Filter Panel Widget
//! Left side panel with category, language and keyword filters.

use crate::data::mapping::{self, Language};
use crate::data::FilterQuery;
use egui::{Color32, ComboBox, RichText};

/// Current filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    pub category: String,
    pub language: Language,
    pub keyword: String,
}

impl FilterSettings {
    pub fn to_query(&self) -> FilterQuery {
        let keyword = Some(self.keyword.clone()).filter(|k| !k.is_empty());
        FilterQuery::new(self.category.clone(), self.language, keyword)
    }
}

/// Left side panel with the filter controls and export buttons.
pub struct ControlPanel {
    pub settings: FilterSettings,
    pub status: String,
}

impl ControlPanel {
    pub fn new(category: &str, language: Language) -> Self {
        Self {
            settings: FilterSettings {
                category: category.to_string(),
                language,
                keyword: String::new(),
            },
            status: "Ready".to_string(),
        }
    }

    /// Draw the panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let before = self.settings.clone();

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Negative Reviews")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Filters").size(16.0).strong());
        ui.add_space(8.0);

        // Category
        ui.label("Select Category");
        ComboBox::from_id_salt("category")
            .width(ui.available_width())
            .selected_text(&self.settings.category)
            .show_ui(ui, |ui| {
                for category in mapping::categories() {
                    ui.selectable_value(
                        &mut self.settings.category,
                        category.to_string(),
                        category,
                    );
                }
            });

        ui.add_space(10.0);

        // Language
        ui.label("Select Language");
        ui.horizontal(|ui| {
            for lang in Language::ALL {
                ui.radio_value(&mut self.settings.language, lang, lang.label());
            }
        });

        ui.add_space(10.0);

        // Keyword
        ui.label("Keyword Search");
        ui.add(
            egui::TextEdit::singleline(&mut self.settings.keyword)
                .hint_text("Enter a keyword")
                .desired_width(f32::INFINITY),
        );

        ui.add_space(15.0);

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("Show Comments").size(15.0))
                .min_size(egui::vec2(200.0, 32.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ShowComments;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(RichText::new("Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("🖼 Chart (PNG)").clicked() {
                action = ControlPanelAction::ExportChart;
            }
            if ui.button("📄 Report (JSON)").clicked() {
                action = ControlPanelAction::ExportReport;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        if action == ControlPanelAction::None && self.settings != before {
            action = ControlPanelAction::FiltersChanged;
        }
        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FiltersChanged,
    ShowComments,
    ExportChart,
    ExportReport,
}
