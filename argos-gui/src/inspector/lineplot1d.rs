//! 1-D line plot inspector.

use std::collections::BTreeMap;

use argos_core::{
    array_has_real_numbers, BoolCti, ChoiceCti, Collector, Color, ColorCti, ConfigTreeItem,
    CtiValue, FloatCti,
};

use super::{Inspector, InspectorError, Result};
use crate::context::AppContext;

/// Labels of the `pen style` choices, in [`PenStyle`] order.
pub const PEN_STYLE_NAMES: [&str; 5] = [
    "solid line",
    "dashed line",
    "dotted line",
    "dash-dot line",
    "dash-dot-dot line",
];

const TITLE_TEMPLATE: &str = "{rtiPath} {slices}";
const TITLE_FALLBACK: &str = "Unable to determine the title";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PenStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl PenStyle {
    const ALL: [Self; 5] = [
        Self::Solid,
        Self::Dash,
        Self::Dot,
        Self::DashDot,
        Self::DashDotDot,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Everything the plot view needs to draw the line plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotState {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub log_x: bool,
    pub log_y: bool,
    pub grid_x: bool,
    pub grid_y: bool,
    pub grid_alpha: f64,
    pub pen_color: Color,
    /// Zero means a cosmetic pen, drawn one pixel wide.
    pub pen_width: f64,
    pub pen_style: PenStyle,
    /// Y values; the X value of a sample is its index.
    pub data: Option<Vec<f64>>,
}

impl Default for PlotState {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            log_x: false,
            log_y: false,
            grid_x: true,
            grid_y: true,
            grid_alpha: 0.25,
            pen_color: Color::new(0x3F, 0x8E, 0x3A),
            pen_width: 1.0,
            pen_style: PenStyle::Solid,
            data: None,
        }
    }
}

/// Inspector that shows the selected data as a line plot.
#[derive(Debug)]
pub struct LinePlot1d {
    window_number: usize,
    debugging: bool,
    config: ConfigTreeItem,
    plot: Option<PlotState>,
}

impl LinePlot1d {
    /// # Errors
    /// Fails if the default config tree cannot be built.
    pub fn new(window_number: usize, context: &AppContext) -> Result<Self> {
        Ok(Self {
            window_number,
            debugging: context.debugging,
            config: Self::create_config()?,
            plot: Some(PlotState::default()),
        })
    }

    /// Builds the config tree with default values.
    ///
    /// # Errors
    /// Only fails if the tree itself is inconsistent.
    pub fn create_config() -> argos_core::Result<ConfigTreeItem> {
        let mut root = ConfigTreeItem::group("inspector")?;
        root.insert_child(ConfigTreeItem::new(
            "pen color",
            ColorCti::from_hex("#3F8E3A")?,
        )?)?;

        // A pen width of zero is a cosmetic pen.
        let pen_width = FloatCti::new(1.0)
            .with_range(0.0, 100.0)
            .with_step(1.0)
            .with_decimals(1);
        root.insert_child(ConfigTreeItem::new("pen width", pen_width)?)?;

        let style_indices = (0..PEN_STYLE_NAMES.len()).map(CtiValue::from).collect();
        let pen_style = ChoiceCti::with_user_data(0, PEN_STYLE_NAMES, style_indices)?;
        root.insert_child(ConfigTreeItem::new("pen style", pen_style)?)?;

        let log_axes = root.insert_child(ConfigTreeItem::group("logarithmic")?)?;
        log_axes.insert_child(ConfigTreeItem::new("X-axis", BoolCti::new(false))?)?;
        log_axes.insert_child(ConfigTreeItem::new("Y-axis", BoolCti::new(false))?)?;

        let grid = root.insert_child(ConfigTreeItem::group("grid")?)?;
        grid.insert_child(ConfigTreeItem::new("X-axis", BoolCti::new(true))?)?;
        grid.insert_child(ConfigTreeItem::new("Y-axis", BoolCti::new(true))?)?;
        let alpha = FloatCti::new(0.25)
            .with_range(0.0, 1.0)
            .with_step(0.01)
            .with_decimals(2);
        grid.insert_child(ConfigTreeItem::new("alpha", alpha)?)?;
        Ok(root)
    }

    /// Id of the plot widget, unique per window.
    pub fn plot_id(&self) -> String {
        format!("1d_line_plot_#{}", self.window_number)
    }

    /// Current plot, `None` after [`Inspector::finalize`].
    pub fn plot(&self) -> Option<&PlotState> {
        self.plot.as_ref()
    }

    fn pen_style(&self) -> Result<PenStyle> {
        let index = self.config.config_int("pen style")?;
        Ok(usize::try_from(index)
            .ok()
            .and_then(PenStyle::from_index)
            .unwrap_or_default())
    }
}

impl Inspector for LinePlot1d {
    fn axes_names(&self) -> &'static [&'static str] {
        &["X-axis"]
    }

    fn config(&self) -> &ConfigTreeItem {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ConfigTreeItem {
        &mut self.config
    }

    fn init_contents(&mut self) -> Result<()> {
        let config = &self.config;
        let state = PlotState {
            log_x: config.config_bool("logarithmic/X-axis")?,
            log_y: config.config_bool("logarithmic/Y-axis")?,
            grid_x: config.config_bool("grid/X-axis")?,
            grid_y: config.config_bool("grid/Y-axis")?,
            grid_alpha: config.config_float("grid/alpha")?,
            pen_color: config.config_color("pen color")?,
            pen_width: config.config_float("pen width")?,
            pen_style: self.pen_style()?,
            ..PlotState::default()
        };
        self.plot = Some(state);
        Ok(())
    }

    fn update_rti(&mut self, collector: &dyn Collector) -> Result<()> {
        let plot = self.plot.get_or_insert_with(PlotState::default);

        plot.y_label = with_unit(
            collector.dependent_dimension_name(),
            &collector.dependent_dimension_unit(),
        );
        let x_name = collector
            .independent_dimension_names()
            .into_iter()
            .next()
            .unwrap_or_default();
        let x_unit = collector
            .independent_dimension_units()
            .into_iter()
            .next()
            .unwrap_or_default();
        plot.x_label = with_unit(x_name, &x_unit);

        let mut props = BTreeMap::new();
        if let Some(path) = collector.rti_node_path() {
            props.insert("rtiPath", path);
        }
        props.insert("slices", collector.slices_string());
        plot.title = format_template(TITLE_TEMPLATE, &props).unwrap_or_else(|| {
            log::warn!("Unable set title {TITLE_TEMPLATE:?} from: {props:?}");
            TITLE_FALLBACK.to_string()
        });

        match collector.sliced_array() {
            Some(array) if array_has_real_numbers(&array) => {
                plot.data = Some(array.iter().copied().collect());
                Ok(())
            }
            _ => {
                plot.data = None;
                if self.debugging {
                    log::debug!("No data to plot in {}", self.plot_id());
                    Ok(())
                } else {
                    Err(InspectorError::NoData)
                }
            }
        }
    }

    fn finalize(&mut self) {
        log::debug!("Finalizing: {}", self.plot_id());
        self.plot = None;
    }
}

fn with_unit(name: String, unit: &str) -> String {
    if unit.is_empty() {
        name
    } else {
        format!("{name} ({unit})")
    }
}

/// Replaces every `{key}` in `template`.
///
/// Returns `None` for a key without a value or an unclosed brace.
fn format_template(template: &str, values: &BTreeMap<&str, String>) -> Option<String> {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let end = rest[start..].find('}')? + start;
        result.push_str(values.get(&rest[start + 1..end])?);
        rest = &rest[end + 1..];
    }
    result.push_str(rest);
    Some(result)
}
