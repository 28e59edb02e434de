pub mod commands;
pub mod provider;

pub use provider::FileProvider;
