pub mod action;
pub mod analysis;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod report;
pub mod system;
pub mod ui;
