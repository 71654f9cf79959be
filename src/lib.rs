pub mod api;
pub mod config;
pub mod errors;
pub mod functions;
pub mod structs;
pub mod utils;
