pub mod api;
pub use api::*;

pub mod io_error;
pub use io_error::*;

pub mod config;
pub use config::*;

pub mod validation;
pub use validation::*;

pub mod portfolio_error;
pub use portfolio_error::*;
