pub mod settings;

pub use settings::{Settings, AppSettings, SourceSettings, BatchSettings, IoSettings, COMPOUND_V2_SUBGRAPH};
