pub mod collector;
pub mod command;
pub mod platform;
pub mod snapshot;
