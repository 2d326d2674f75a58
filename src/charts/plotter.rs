//! Chart Plotter Module
//! Interactive bar chart of comment counts using egui_plot.

use crate::stats::CategoryCounts;
use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

/// Default bar color.
pub const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
/// Bar color for the currently selected category.
pub const SELECTED_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

pub const CHART_TITLE: &str = "Number of Comments by Category";

/// Draws the category bar chart.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn bar_color(category: &str, selected: &str) -> Color32 {
        if category == selected {
            SELECTED_COLOR
        } else {
            BAR_COLOR
        }
    }

    /// Category name for an x-axis grid mark; blank between bars.
    pub fn axis_label(value: f64, labels: &[String]) -> String {
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }

    /// Draw one bar per category, highlighting the selected one.
    pub fn draw_category_bars(ui: &mut egui::Ui, counts: &CategoryCounts, selected: &str, height: f32) {
        let labels: Vec<String> = counts.iter().map(|c| c.category.to_string()).collect();

        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.count as f64)
                    .name(c.category)
                    .width(0.6)
                    .fill(Self::bar_color(c.category, selected))
            })
            .collect();

        Plot::new("category_counts")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Category")
            .y_axis_label("Count")
            .x_axis_formatter(move |mark, _range| Self::axis_label(mark.value, &labels))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Comments"));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_only_on_bars() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(ChartPlotter::axis_label(0.0, &labels), "A");
        assert_eq!(ChartPlotter::axis_label(1.0000001, &labels), "B");
        assert_eq!(ChartPlotter::axis_label(0.5, &labels), "");
        assert_eq!(ChartPlotter::axis_label(-1.0, &labels), "");
        assert_eq!(ChartPlotter::axis_label(2.0, &labels), "");
    }

    #[test]
    fn selected_category_is_highlighted() {
        assert_eq!(ChartPlotter::bar_color("A", "A"), SELECTED_COLOR);
        assert_eq!(ChartPlotter::bar_color("A", "B"), BAR_COLOR);
    }
}
