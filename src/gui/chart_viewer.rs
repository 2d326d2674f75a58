//! Dashboard View Widget
//! Central panel: stat cards, category bar chart, identified patterns and comments.

use crate::charts::ChartPlotter;
use crate::data::{CommentDisplay, FilterResult};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 320.0;

/// Renders a [`FilterResult`].
pub struct DashboardView;

impl DashboardView {
    pub fn show(ui: &mut egui::Ui, result: &FilterResult, selected_category: &str) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("📊 Negative Reviews Dashboard").size(24.0).strong());
                });
                ui.add_space(CARD_SPACING);

                ui.columns(3, |cols| {
                    Self::stat_card(&mut cols[0], "📝 Total Comments", result.total_comments);
                    Self::stat_card(
                        &mut cols[1],
                        "📈 Highest Commented Category",
                        result.highest_category,
                    );
                    Self::stat_card(
                        &mut cols[2],
                        "📉 Lowest Commented Category",
                        result.lowest_category,
                    );
                });
                ui.add_space(CARD_SPACING);

                Self::card(ui, "Bar Chart of Comments by Category 📊", |ui| {
                    ChartPlotter::draw_category_bars(
                        ui,
                        &result.counts_by_category,
                        selected_category,
                        CHART_HEIGHT,
                    );
                });
                ui.add_space(CARD_SPACING);

                Self::card(ui, "Identified Patterns 🔍", |ui| {
                    ui.label(result.patterns_text);
                });
                ui.add_space(CARD_SPACING);

                Self::comments_section(ui, &result.comments);
            });
    }

    fn comments_section(ui: &mut egui::Ui, comments: &CommentDisplay) {
        match comments {
            CommentDisplay::NotRequested => {}
            CommentDisplay::RequestedEmpty { message } => {
                Self::card(ui, "Filtered Feedback 🗣️", |ui| {
                    ui.label(RichText::new(*message).color(Color32::GRAY));
                });
            }
            CommentDisplay::RequestedPopulated { items } => {
                Self::card(ui, "Filtered Feedback 🗣️", |ui| {
                    for comment in items {
                        ui.horizontal_wrapped(|ui| {
                            ui.label("•");
                            ui.label(comment);
                        });
                    }
                });
            }
        }
    }

    fn stat_card(ui: &mut egui::Ui, title: &str, value: &str) {
        Self::card(ui, title, |ui| {
            ui.label(RichText::new(value).size(20.0).strong());
        });
    }

    fn card(ui: &mut egui::Ui, title: &str, body: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(200)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(6.0);
                body(ui);
            });
    }
}
