//! Inspectors: views that visualize the data of the selected array.

mod lineplot1d;

pub use lineplot1d::{LinePlot1d, PenStyle, PlotState};

use argos_core::{Collector, ConfigTreeItem, CtiValue};
use thiserror::Error;

/// Inspector error types.
#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("config error: {0}")]
    Config(#[from] argos_core::Error),

    #[error("no data available or it does not contain real numbers")]
    NoData,
}

pub type Result<T> = std::result::Result<T, InspectorError>;

/// A visualization that is parametrized by a config tree.
pub trait Inspector {
    /// Names of the axes this inspector shows data on.
    fn axes_names(&self) -> &'static [&'static str];

    fn config(&self) -> &ConfigTreeItem;

    fn config_mut(&mut self) -> &mut ConfigTreeItem;

    /// Looks up a config value by slash-delimited path.
    ///
    /// # Errors
    /// Fails if the path does not exist or the item's value is invalid.
    fn config_value(&self, path: &str) -> Result<CtiValue> {
        Ok(self.config().config_value(path)?)
    }

    /// Clears the view and applies the config.
    ///
    /// # Errors
    /// Fails if a config value cannot be read.
    fn init_contents(&mut self) -> Result<()>;

    /// Shows the data of the collector's current selection.
    ///
    /// # Errors
    /// Returns [`InspectorError::NoData`] when there is nothing to show,
    /// unless the inspector runs in debugging mode.
    fn update_rti(&mut self, collector: &dyn Collector) -> Result<()>;

    /// Redraws from scratch.
    ///
    /// # Errors
    /// Fails like [`Inspector::init_contents`] and [`Inspector::update_rti`].
    fn draw_contents(&mut self, collector: &dyn Collector) -> Result<()> {
        self.init_contents()?;
        self.update_rti(collector)
    }

    /// Releases view resources before the inspector is dropped.
    fn finalize(&mut self);
}
