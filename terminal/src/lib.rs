pub mod app;
pub mod config;
pub mod input;
pub mod render;
pub mod scores;
pub mod views;
