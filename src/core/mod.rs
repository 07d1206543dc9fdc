pub mod seed;
pub mod store;

pub use crate::domain::{Course, CourseMap, Department};
pub use crate::utils::error::Result;
pub use store::{DepartmentMapping, Store, StoreMode};
