pub mod errors;
pub mod inventory;
pub mod logging;
pub mod resolution;
pub mod root;

pub use errors::ConfigError;
pub use inventory::InventoryConfig;
pub use logging::LoggingConfig;
pub use resolution::ResolutionConfig;
pub use root::{CliOverrides, Config};
