pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::EngineConfig;

pub mod package;
pub use package::PackageDescriptor;
pub use package::PackageKey;
pub use package::Version;

pub mod host;
pub use host::HostInfo;

pub mod settings;
pub use settings::SettingsStore;

pub mod relationship_resolver;
