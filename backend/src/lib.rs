pub mod collate;
pub mod config;
pub mod error;
pub mod file_server;
pub mod mime;
pub mod mode;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod snapshot;
pub mod source;
pub mod tree;

use config::AppConfig;
use error::AppError;
use resolver::PathResolver;
use source::TreeSource;

pub struct AppState {
    pub config: AppConfig,
    pub resolver: PathResolver,
    pub source: TreeSource,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let resolver = PathResolver::new(mode::effective_root(&config))?;
        let source = mode::select_source(&config, &resolver)?;
        Ok(Self {
            config,
            resolver,
            source,
        })
    }
}
