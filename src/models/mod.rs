//! Display models for CLI output

pub mod display;

pub use display::{FolderOptionRow, FolderRow, MediaItemDisplay, SearchRow};
