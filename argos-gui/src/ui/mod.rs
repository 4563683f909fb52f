//! UI rendering modules.
//!
//! - `main_window`: one main window with its side panel and plot
//! - `repo_tree`: repository tree of the opened files
//! - `config_tree`: inspector config tree and its editors
//! - `plot_view`: the line plot

mod config_tree;
mod main_window;
mod plot_view;
mod repo_tree;
