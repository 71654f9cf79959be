pub mod kis_api;
pub use kis_api::*;
