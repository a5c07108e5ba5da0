//! Multi-panel comparison figures
//!
//! Each result file becomes one panel of a near-square grid. Every series
//! column is drawn against the independent column as a line with markers,
//! both axes are labelled with SI-snapped tick scales, and major ticks get a
//! light dotted gridline. Files that fail to parse leave a titled, empty
//! panel instead of aborting the figure.

mod layout;
mod title;

pub use layout::GridLayout;
pub use title::{common_prefix, panel_titles, title_case};

use crate::axis::{AxisScaler, DEFAULT_POWER_LIMITS};
use crate::error::{PlotError, PlotResult};
use crate::results::ResultTable;
use plotters::coord::Shift;
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

// Fraction of the data span added on each side of an axis
const AXIS_MARGIN: f64 = 0.05;

/// Rendering options, normally the `[render]` config section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font family for all text (`serif`, `sans-serif`, `monospace` or a name)
    pub font_family: String,
    /// Typeset axis multipliers as `×10⁶` instead of `1e6`
    pub math_text: bool,
    /// Pixel size of one grid cell
    pub panel_width: u32,
    pub panel_height: u32,
    /// Base font size; titles are larger, tick labels smaller
    pub font_size: u32,
    pub marker_size: u32,
    /// Approximate number of major ticks per axis
    pub ticks: usize,
    pub x_label: String,
    pub y_label: String,
    /// Orders of magnitude strictly inside this range are not scaled
    pub power_limits: (i32, i32),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: "serif".to_string(),
            math_text: true,
            panel_width: 640,
            panel_height: 480,
            font_size: 16,
            marker_size: 3,
            ticks: 6,
            x_label: "Elements".to_string(),
            y_label: "Time (s)".to_string(),
            power_limits: DEFAULT_POWER_LIMITS,
        }
    }
}

/// Figures are written as SVG; any other extension is rejected
pub fn check_output_format(path: &Path) -> PlotResult<()> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        Ok(())
    } else {
        Err(PlotError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// What ended up in one panel
#[derive(Debug, Clone)]
pub struct PanelSummary {
    pub path: PathBuf,
    pub title: String,
    /// 1-based grid cell
    pub cell: usize,
    /// Number of series drawn
    pub series: usize,
    /// Why the panel is empty, if it is
    pub error: Option<String>,
}

/// Result of composing a figure
#[derive(Debug, Clone)]
pub struct FigureSummary {
    pub output: PathBuf,
    pub layout: GridLayout,
    pub panels: Vec<PanelSummary>,
}

impl FigureSummary {
    /// Panels that could not be drawn
    pub fn failed(&self) -> impl Iterator<Item = &PanelSummary> {
        self.panels.iter().filter(|p| p.error.is_some())
    }
}

struct Panel {
    title: String,
    data: Option<ResultTable>,
}

/// Composes result files into one figure
#[derive(Debug, Clone, Default)]
pub struct Plotter {
    config: RenderConfig,
    scaler: AxisScaler,
}

impl Plotter {
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        let scaler = AxisScaler::new(config.power_limits);
        Self { config, scaler }
    }

    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Plot `result_files` into a single image at `output`, overwriting it
    pub fn plot<P: AsRef<Path>>(
        &self,
        result_files: &[P],
        output: &Path,
    ) -> PlotResult<FigureSummary> {
        if result_files.is_empty() {
            return Err(PlotError::NoInputs);
        }
        check_output_format(output)?;
        let layout = GridLayout::for_count(result_files.len());
        let titles = panel_titles(result_files);

        let mut panels = Vec::with_capacity(result_files.len());
        let mut summaries = Vec::with_capacity(result_files.len());
        for (index, (path, title)) in result_files.iter().zip(titles).enumerate() {
            let path = path.as_ref();
            let (data, error) = match ResultTable::read(path) {
                Ok(table) => (Some(table), None),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable result file");
                    (None, Some(err.to_string()))
                }
            };

            summaries.push(PanelSummary {
                path: path.to_path_buf(),
                title: title.clone(),
                cell: layout.cell_number(index),
                series: data.as_ref().map_or(0, |d| d.table.width().saturating_sub(1)),
                error,
            });
            panels.push(Panel { title, data });
        }

        #[allow(clippy::cast_possible_truncation)]
        let size = (
            self.config.panel_width * layout.cols() as u32,
            self.config.panel_height * layout.rows() as u32,
        );

        let root = SVGBackend::new(output, size).into_drawing_area();
        self.draw_figure(&root, layout, &panels)
            .map_err(|e| PlotError::Drawing {
                path: output.to_path_buf(),
                reason: e.to_string(),
            })?;
        drop(root);

        info!(output = %output.display(), panels = panels.len(), "Wrote figure");
        Ok(FigureSummary {
            output: output.to_path_buf(),
            layout,
            panels: summaries,
        })
    }

    fn draw_figure<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        layout: GridLayout,
        panels: &[Panel],
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let cells = root.split_evenly((layout.rows(), layout.cols()));
        for (panel, area) in panels.iter().zip(&cells) {
            match &panel.data {
                Some(data) if data.table.rows() > 0 => self.draw_panel(area, &panel.title, data)?,
                _ => {
                    area.titled(&panel.title, self.title_style())?;
                }
            }
        }

        root.present()
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        title: &str,
        data: &ResultTable,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let font = self.config.font_family.as_str();
        let x_values = data.table.x();
        let y_values: Vec<f64> = (1..data.table.width())
            .filter_map(|i| data.table.column(i))
            .flatten()
            .copied()
            .collect();

        let x_range = padded_range(x_values);
        let y_range = padded_range(&y_values);
        let x_scale = self.scaler.scale(x_values);
        let y_scale = self.scaler.scale(&y_values);

        let mut chart = ChartBuilder::on(area)
            .caption(title, self.title_style())
            .margin(8)
            .x_label_area_size(self.config.font_size * 3)
            .y_label_area_size(self.config.font_size * 4)
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(self.config.ticks)
            .y_labels(self.config.ticks)
            .x_label_formatter(&|v| x_scale.format(*v))
            .y_label_formatter(&|v| y_scale.format(*v))
            .x_desc(x_scale.describe(&self.config.x_label, self.config.math_text))
            .y_desc(y_scale.describe(&self.config.y_label, self.config.math_text))
            .label_style((font, self.config.font_size.saturating_sub(3)))
            .axis_desc_style((font, self.config.font_size))
            .draw()?;

        self.draw_gridlines(&mut chart, &x_range, &y_range)?;

        for (index, points) in data.table.series() {
            let color = PALETTE[(index - 1) % PALETTE.len()];
            let label = data.name(index).unwrap_or_default().to_string();
            chart
                .draw_series(
                    LineSeries::new(points, color.stroke_width(2))
                        .point_size(self.config.marker_size),
                )?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .margin(2)
            .legend_area_size(18)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK.mix(0.4))
            .label_font((font, self.config.font_size.saturating_sub(3)))
            .draw()
    }

    // Dotted lines at the same key points the mesh labels use.
    fn draw_gridlines<DB: DrawingBackend>(
        &self,
        chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        x_range: &Range<f64>,
        y_range: &Range<f64>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let style = BLACK.mix(0.6).stroke_width(1);
        let x_ticks = RangedCoordf64::from(x_range.clone()).key_points(self.config.ticks);
        let y_ticks = RangedCoordf64::from(y_range.clone()).key_points(self.config.ticks);

        for x in x_ticks {
            chart.draw_series(DashedLineSeries::new(
                vec![(x, y_range.start), (x, y_range.end)],
                1,
                8,
                style,
            ))?;
        }
        for y in y_ticks {
            chart.draw_series(DashedLineSeries::new(
                vec![(x_range.start, y), (x_range.end, y)],
                1,
                8,
                style,
            ))?;
        }
        Ok(())
    }

    fn title_style(&self) -> (&str, u32) {
        (self.config.font_family.as_str(), self.config.font_size + 4)
    }
}

fn padded_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * AXIS_MARGIN
    } else if min == 0.0 {
        1.0
    } else {
        min.abs() * AXIS_MARGIN
    };
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_svg_output_is_accepted() {
        assert!(check_output_format(Path::new("tree_bench.svg")).is_ok());
        assert!(check_output_format(Path::new("out/DICT.SVG")).is_ok());
        assert!(matches!(
            check_output_format(Path::new("figure.png")),
            Err(PlotError::UnsupportedFormat(_))
        ));
        assert!(check_output_format(Path::new("figure")).is_err());
    }

    #[test]
    fn padded_range_adds_margin() {
        let range = padded_range(&[0.0, 100.0]);
        assert!((range.start + 5.0).abs() < 1e-9);
        assert!((range.end - 105.0).abs() < 1e-9);
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range(&[] as &[f64]), 0.0..1.0);
        assert_eq!(padded_range(&[0.0]), -1.0..1.0);
        let single = padded_range(&[10.0]);
        assert!(single.start < 10.0 && single.end > 10.0);
    }

    #[test]
    fn render_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.font_family, "serif");
        assert!(config.math_text);
        assert_eq!(config.power_limits, (-6, 6));
    }
}
