pub mod batch;
pub mod cli;
pub mod config;
pub mod dataforseo;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod report;
pub mod traits;

pub use batch::{batch_generate, BatchOptions, BatchRun};
pub use config::{DataForSeoConfig, GeminiConfig};
pub use dataforseo::DataForSeoClient;
pub use error::{Result, SkillError};
pub use gemini::ImageClient;
pub use models::*;
pub use report::domain_overview;
pub use traits::{ImageGenerator, MetricsSource, Pacer, TokioPacer};
