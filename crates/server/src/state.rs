use lessons_core::{Config, LessonService, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    service: LessonService,
}

impl AppState {
    pub fn new(config: Config, service: LessonService) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn service(&self) -> &LessonService {
        &self.service
    }
}
