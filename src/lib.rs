pub mod app;
pub mod broker;
pub mod config;
pub mod error;
pub mod upload;
pub mod utils;
