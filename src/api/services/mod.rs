pub mod price_refresh;
pub use price_refresh::*;
