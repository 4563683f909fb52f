//! Line plot rendering with egui_plot.

use eframe::egui::{self, Color32};
use egui_plot::{Line, LineStyle, Plot, PlotPoints};

use crate::inspector::{PenStyle, PlotState};
use crate::util::{f64_to_f32, usize_to_f64};

/// Renders the plot title and the line plot.
pub(crate) fn plot_view(ui: &mut egui::Ui, id: &str, plot: &PlotState) {
    if !plot.title.is_empty() {
        ui.vertical_centered(|ui| {
            ui.heading(&plot.title);
        });
    }

    let points = line_points(plot);
    Plot::new(id)
        .x_axis_label(axis_label(&plot.x_label, plot.log_x))
        .y_axis_label(axis_label(&plot.y_label, plot.log_y))
        .show_grid([plot.grid_x, plot.grid_y])
        .show(ui, |plot_ui: &mut egui_plot::PlotUi| {
            if points.is_empty() {
                return;
            }
            let c = plot.pen_color;
            plot_ui.line(
                Line::new(PlotPoints::from(points))
                    .color(Color32::from_rgb(c.r, c.g, c.b))
                    .width(pen_width(plot.pen_width))
                    .style(line_style(plot.pen_style)),
            );
        });
}

/// Sample index against value, in log10 where the axis is logarithmic.
///
/// Points that cannot be shown (NaN, or non-positive on a log axis) are
/// dropped.
pub(crate) fn line_points(plot: &PlotState) -> Vec<[f64; 2]> {
    let Some(data) = plot.data.as_ref() else {
        return Vec::new();
    };
    data.iter()
        .enumerate()
        .filter_map(|(i, &y)| {
            let x = to_axis(usize_to_f64(i), plot.log_x)?;
            let y = to_axis(y, plot.log_y)?;
            Some([x, y])
        })
        .collect()
}

fn to_axis(value: f64, log: bool) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    if log {
        (value > 0.0).then(|| value.log10())
    } else {
        Some(value)
    }
}

fn axis_label(label: &str, log: bool) -> String {
    if log {
        format!("log10({label})")
    } else {
        label.to_string()
    }
}

/// Width zero is a cosmetic pen: always one pixel wide.
fn pen_width(width: f64) -> f32 {
    if width <= 0.0 {
        1.0
    } else {
        f64_to_f32(width)
    }
}

pub(crate) fn line_style(style: PenStyle) -> LineStyle {
    match style {
        PenStyle::Solid => LineStyle::Solid,
        PenStyle::Dash => LineStyle::Dashed { length: 10.0 },
        PenStyle::Dot => LineStyle::Dotted { spacing: 5.0 },
        PenStyle::DashDot => LineStyle::Dashed { length: 6.0 },
        PenStyle::DashDotDot => LineStyle::Dotted { spacing: 3.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_points_linear() {
        let plot = PlotState {
            data: Some(vec![1.0, f64::NAN, 3.0]),
            ..PlotState::default()
        };
        assert_eq!(line_points(&plot), vec![[0.0, 1.0], [2.0, 3.0]]);
    }

    #[test]
    fn test_line_points_log_drops_non_positive() {
        let plot = PlotState {
            data: Some(vec![10.0, 0.0, 100.0]),
            log_x: true,
            log_y: true,
            ..PlotState::default()
        };
        // Index 0 is not positive on a log X axis.
        assert_eq!(line_points(&plot), vec![[2.0_f64.log10(), 2.0]]);
    }

    #[test]
    fn test_no_data_no_points() {
        assert!(line_points(&PlotState::default()).is_empty());
    }

    #[test]
    fn test_pen_width_cosmetic() {
        assert!((pen_width(0.0) - 1.0).abs() < f32::EPSILON);
        assert!((pen_width(2.5) - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(axis_label("time (s)", false), "time (s)");
        assert_eq!(axis_label("time (s)", true), "log10(time (s))");
    }

    #[test]
    fn test_line_style_mapping() {
        assert!(matches!(line_style(PenStyle::Solid), LineStyle::Solid));
        assert!(matches!(
            line_style(PenStyle::DashDotDot),
            LineStyle::Dotted { .. }
        ));
    }
}
