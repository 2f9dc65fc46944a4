pub mod client;
pub mod subgraph;

pub use client::{PositionSource, SourceConfig};
#[cfg(test)]
pub use client::MockPositionSource;
pub use subgraph::SubgraphClient;
