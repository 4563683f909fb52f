//! argos-core: Config tree items and editor bindings for Argos inspectors.
//!
//! This crate provides the settings model of the viewer: a tree of typed,
//! validated config items, the toolkit-neutral editors that edit them, and
//! the [`Collector`] interface through which inspectors receive data.
//!

pub mod collector;
pub mod config;
pub mod editor;
pub mod error;
pub mod signal;
pub mod value;

pub use collector::{array_has_real_numbers, Collector};
pub use config::{
    BoolCti, ChoiceCti, ColorCti, ConfigTreeItem, Cti, FloatCti, GroupCti, IntCti,
};
pub use editor::{CtiEditor, EditSession, EditorDelegate, EditorEvent, EditorWidget};
pub use error::{Error, Result};
pub use signal::{ConnectionId, Signal};
pub use value::{Color, CtiValue};
