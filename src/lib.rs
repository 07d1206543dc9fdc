pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::TomlConfig;
pub use crate::core::{seed, DepartmentMapping, Store, StoreMode};
pub use domain::{Course, CourseMap, Department};
pub use http::{create_router, AppState};
pub use utils::error::{RegistryError, Result};
