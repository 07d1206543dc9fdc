use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::require_text;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const INVALID_TIME_SLOT_MESSAGE: &str = "Invalid time format.  \
Expected format: 'H:MM-H:MM', 'H:MM-HH:MM', 'HH:MM-H:MM', or 'HH:MM-HH:MM'.  \
Also ensure valid hours (00-23) and minutes (00-59).";

// 小時 0-23 (可省略前導零)，分鐘固定兩位數 00-59
static TIME_SLOT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]-([01]?[0-9]|2[0-3]):[0-5][0-9]$")
        .expect("time slot pattern is a valid regex")
});

/// Returns true when `slot` is a well-formed meeting interval such as
/// `9:00-17:30` or `09:00-09:30`. An absent slot is never valid.
pub fn is_valid_time_slot<'a>(slot: impl Into<Option<&'a str>>) -> bool {
    slot.into()
        .is_some_and(|slot| TIME_SLOT_PATTERN.is_match(slot))
}

/// An enrollable unit owned by a single department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CourseRecord")]
pub struct Course {
    instructor_name: String,
    course_location: String,
    course_time_slot: String,
    enrollment_capacity: u32,
    enrolled_student_count: u32,
}

/// Unvalidated on-disk shape of a course.
#[derive(Deserialize)]
struct CourseRecord {
    instructor_name: String,
    course_location: String,
    course_time_slot: String,
    enrollment_capacity: u32,
    enrolled_student_count: u32,
}

impl TryFrom<CourseRecord> for Course {
    type Error = RegistryError;

    fn try_from(record: CourseRecord) -> Result<Self> {
        let mut course = Course::new(
            &record.instructor_name,
            &record.course_location,
            &record.course_time_slot,
            i64::from(record.enrollment_capacity),
        )?;
        course.enrolled_student_count = record.enrolled_student_count;
        Ok(course)
    }
}

impl Course {
    pub fn new(
        instructor_name: &str,
        course_location: &str,
        course_time_slot: &str,
        capacity: i64,
    ) -> Result<Self> {
        require_text(Some(instructor_name), "Instructor name cannot be null or empty.")?;
        require_text(Some(course_location), "Course location cannot be null or empty.")?;
        require_text(Some(course_time_slot), "Course time slot cannot be null or empty.")?;
        if !is_valid_time_slot(course_time_slot) {
            return Err(RegistryError::invalid_argument(INVALID_TIME_SLOT_MESSAGE));
        }
        let enrollment_capacity = u32::try_from(capacity).map_err(|_| {
            RegistryError::invalid_argument("Enrollment capacity must be a non-negative number.")
        })?;

        Ok(Self {
            instructor_name: instructor_name.to_string(),
            course_location: course_location.to_string(),
            course_time_slot: course_time_slot.to_string(),
            enrollment_capacity,
            enrolled_student_count: 0,
        })
    }

    pub fn instructor_name(&self) -> &str {
        &self.instructor_name
    }

    pub fn course_location(&self) -> &str {
        &self.course_location
    }

    pub fn course_time_slot(&self) -> &str {
        &self.course_time_slot
    }

    pub fn enrollment_capacity(&self) -> u32 {
        self.enrollment_capacity
    }

    pub fn enrolled_student_count(&self) -> u32 {
        self.enrolled_student_count
    }

    pub fn is_full(&self) -> bool {
        self.enrolled_student_count >= self.enrollment_capacity
    }

    /// Enrolls one student unless the course is full.
    pub fn enroll_student(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.enrolled_student_count += 1;
        true
    }

    /// Drops one student unless nobody is enrolled.
    pub fn drop_student(&mut self) -> bool {
        if self.enrolled_student_count == 0 {
            return false;
        }
        self.enrolled_student_count -= 1;
        true
    }

    /// Overwrites the enrolled count. The capacity is not consulted here, so
    /// the count may end up above it; only `enroll_student` enforces the cap.
    pub fn set_enrolled_student_count(&mut self, count: i64) -> Result<()> {
        let count = u32::try_from(count).map_err(|_| {
            RegistryError::invalid_argument("Enrolled student count must be a non-negative number.")
        })?;
        self.enrolled_student_count = count;
        Ok(())
    }

    pub fn reassign_instructor(&mut self, new_instructor_name: &str) -> Result<()> {
        require_text(Some(new_instructor_name), "Instructor name cannot be null or empty.")?;
        self.instructor_name = new_instructor_name.to_string();
        Ok(())
    }

    pub fn reassign_location(&mut self, new_location: &str) -> Result<()> {
        require_text(Some(new_location), "Course location cannot be null or empty.")?;
        self.course_location = new_location.to_string();
        Ok(())
    }

    pub fn reassign_time(&mut self, new_time: &str) -> Result<()> {
        if !is_valid_time_slot(new_time) {
            return Err(RegistryError::invalid_argument(INVALID_TIME_SLOT_MESSAGE));
        }
        self.course_time_slot = new_time.to_string();
        Ok(())
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\nInstructor: {}; Location: {}; Time: {}",
            self.instructor_name, self.course_location, self.course_time_slot
        )
    }
}
