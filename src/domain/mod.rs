// Domain layer: the course and department entities and their invariants.
// No I/O here; persistence lives in core::store.

pub mod course;
pub mod department;

pub use course::{is_valid_time_slot, Course, INVALID_TIME_SLOT_MESSAGE};
pub use department::{CourseMap, Department};
