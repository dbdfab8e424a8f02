pub mod api;
pub mod audit;
pub mod config;
pub mod model;
