pub mod error;
pub mod metrics;
pub mod score;

pub use error::*;
pub use metrics::*;
pub use score::*;
