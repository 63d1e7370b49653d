pub mod components;
pub mod config;
pub mod export;
pub mod file_reader;
pub mod icons;
pub mod modal;
