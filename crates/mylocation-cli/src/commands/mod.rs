//! Command implementations for the CLI.

mod capture;
mod clear;
mod config;
mod list;
mod theme;

pub use capture::{CaptureArgs, cmd_capture};
pub use clear::cmd_clear;
pub use config::cmd_config;
pub use list::{ListArgs, cmd_list};
pub use theme::{cmd_theme, theme_line};
