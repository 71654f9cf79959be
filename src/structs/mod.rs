pub mod currency;
pub use currency::*;

pub mod etf;
pub use etf::*;

pub mod holding;
pub use holding::*;

pub mod sale;
pub use sale::*;

pub mod dividend;
pub use dividend::*;

pub mod summary;
pub use summary::*;

pub mod ids;
pub use ids::*;

pub mod managers;
pub use managers::*;
