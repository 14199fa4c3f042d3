//! Provider directory adapters. Implement ProviderDirectoryPort.

pub mod static_directory;

pub use static_directory::StaticProviderDirectory;
