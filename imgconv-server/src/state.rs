//! Application state

use crate::config::ServerConfig;
use imgconv_core::{BatchConverter, ImageRsCodec};
use std::sync::Arc;

/// Shared application state.
///
/// Everything here is immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,

    /// Conversion pipeline
    pub converter: Arc<BatchConverter<ImageRsCodec>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServerConfig) -> Self {
        let converter = BatchConverter::new(ImageRsCodec::new()).with_parallel(config.parallel);

        Self {
            config: Arc::new(config),
            converter: Arc::new(converter),
        }
    }
}
