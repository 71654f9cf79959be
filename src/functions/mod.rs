pub mod cost_basis;
pub use cost_basis::*;

pub mod summary;
pub use summary::*;

pub mod catalog;
pub use catalog::*;
