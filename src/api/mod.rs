pub mod market_data;
pub use market_data::*;

pub mod exchanges;
pub use exchanges::*;

pub mod mapping;
pub use mapping::*;

pub mod services;
pub use services::*;
