//! Static Chart Renderer
//! Renders the category bar chart to a PNG with plotters.

use crate::charts::plotter::CHART_TITLE;
use crate::report::ExportError;
use crate::stats::CategoryCounts;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;

const BAR: RGBColor = RGBColor(99, 110, 250);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart and return PNG bytes.
    pub fn render_png(
        counts: &CategoryCounts,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        let labels: Vec<&str> = counts.iter().map(|c| c.category).collect();
        let y_max = Self::y_axis_max(counts.max_count());

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(CHART_TITLE, ("sans-serif", 28))
                .margin(20)
                .x_label_area_size(180)
                .y_label_area_size(50)
                .build_cartesian_2d((0..labels.len()).into_segmented(), 0..y_max)
                .map_err(render_error)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(labels.len())
                .x_label_formatter(&|v: &SegmentValue<usize>| match v {
                    SegmentValue::CenterOf(i) => labels.get(*i).map(|s| s.to_string()).unwrap_or_default(),
                    _ => String::new(),
                })
                .x_label_style(
                    ("sans-serif", 14)
                        .into_font()
                        .transform(FontTransform::Rotate90),
                )
                .x_desc("Category")
                .y_desc("Count")
                .draw()
                .map_err(render_error)?;

            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(BAR.filled())
                        .margin(12)
                        .data(counts.iter().enumerate().map(|(i, c)| (i, c.count))),
                )
                .map_err(render_error)?;

            root.present().map_err(render_error)?;
        }

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ExportError::Render("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render and write the chart to `path`.
    pub fn save_png(
        counts: &CategoryCounts,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ExportError> {
        let bytes = Self::render_png(counts, width, height)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Upper bound of the count axis with some headroom above the tallest bar.
    fn y_axis_max(max_count: usize) -> usize {
        (max_count + max_count / 10 + 1).max(5)
    }
}

fn render_error<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Render(err.to_string())
}
