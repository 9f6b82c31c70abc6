pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod progress;
pub mod status;
pub mod ui;

pub use catalog::{Catalog, Category, FilterMode, ItemId};
pub use config::{AppConfig, ConfigLoader, ConfigPaths};
pub use progress::ProgressStore;
