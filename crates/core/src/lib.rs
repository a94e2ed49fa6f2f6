pub mod config;
pub mod enhancer;
pub mod importer;
pub mod lesson;
pub mod metrics;
pub mod pdf;
pub mod search;
pub mod service;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, DatabaseConfig, EnhancerConfig, FrontendConfig, ImportConfig, PdfConfig,
    SanitizedConfig, ServerConfig,
};
pub use enhancer::{create_enhancer, EnhancementError, HttpQueryEnhancer, QueryEnhancer};
pub use importer::{CsvImporter, ImportError, ImportReport, RowError};
pub use lesson::{Lesson, LessonStore, LessonStoreError, NewLesson, SqliteLessonStore};
pub use pdf::{LopdfRenderer, PdfRenderer, RenderError};
pub use search::{FuzzyMatcher, SearchConfig, SearchKey};
pub use service::{LessonListing, LessonService, ServiceError};
