//! Configuration: where data lives and user preferences

pub mod paths;
pub mod settings;

pub use paths::SpendPaths;
pub use settings::Settings;
