pub mod loader;
pub mod settings;

pub use loader::{AppConfig, parse_config_content};
pub use settings::{
    EnvironmentsConfig, FileConfig, GeneratorProtocol, GeneratorSettings, PathsConfig,
    StorageConfig,
};
