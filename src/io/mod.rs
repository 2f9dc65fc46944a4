pub mod input;
pub mod export;

pub use input::{parse_wallet_ids, read_wallet_ids};
pub use export::{export_scores, write_scores};
