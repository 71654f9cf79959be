pub mod kis_mapping;
pub use kis_mapping::*;
