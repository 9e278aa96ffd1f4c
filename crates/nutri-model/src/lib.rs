pub mod columns;
pub mod config;
pub mod error;
pub mod product;
pub mod quality;

pub use config::{ApiConfig, FileConfig, PipelineConfig, WarehouseBackend, WarehouseConfig};
pub use error::{ConfigError, Result};
pub use product::ProductRow;
pub use quality::NutritionQuality;
