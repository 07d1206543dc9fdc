use crate::domain::course::Course;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::require_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Courses of one department keyed by course id. Sorted so that rendering is
/// deterministic.
pub type CourseMap = BTreeMap<String, Course>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepartmentRecord")]
pub struct Department {
    dept_code: String,
    department_chair: String,
    number_of_majors: u32,
    courses: CourseMap,
}

#[derive(Deserialize)]
struct DepartmentRecord {
    dept_code: String,
    department_chair: String,
    number_of_majors: u32,
    courses: CourseMap,
}

impl TryFrom<DepartmentRecord> for Department {
    type Error = RegistryError;

    fn try_from(record: DepartmentRecord) -> Result<Self> {
        Department::new(
            &record.dept_code,
            record.courses,
            &record.department_chair,
            i64::from(record.number_of_majors),
        )
    }
}

impl Department {
    pub fn new(
        dept_code: &str,
        courses: CourseMap,
        department_chair: &str,
        number_of_majors: i64,
    ) -> Result<Self> {
        require_text(Some(dept_code), "Department code cannot be null or empty.")?;
        require_text(Some(department_chair), "Department chair cannot be null or empty.")?;
        let number_of_majors = u32::try_from(number_of_majors).map_err(|_| {
            RegistryError::invalid_argument("Number of majors must be a positive number.")
        })?;
        if let Some(blank) = courses.keys().find(|id| id.trim().is_empty()) {
            return Err(RegistryError::invalid_argument(format!(
                "courseId cannot be null or empty (found {:?}).",
                blank
            )));
        }

        Ok(Self {
            dept_code: dept_code.to_string(),
            department_chair: department_chair.to_string(),
            number_of_majors,
            courses,
        })
    }

    pub fn dept_code(&self) -> &str {
        &self.dept_code
    }

    pub fn department_chair(&self) -> &str {
        &self.department_chair
    }

    pub fn number_of_majors(&self) -> u32 {
        self.number_of_majors
    }

    pub fn course_selection(&self) -> &CourseMap {
        &self.courses
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.get(course_id)
    }

    pub fn course_mut(&mut self, course_id: &str) -> Option<&mut Course> {
        self.courses.get_mut(course_id)
    }

    pub fn add_person_to_major(&mut self) {
        self.number_of_majors += 1;
    }

    pub fn drop_person_from_major(&mut self) -> Result<()> {
        if self.number_of_majors == 0 {
            return Err(RegistryError::invalid_argument(
                "Can only remove a major from a department if there is at least 1 major in a \
                 department.",
            ));
        }
        self.number_of_majors -= 1;
        Ok(())
    }

    /// Inserts `course` under `course_id`, replacing any course already
    /// stored there. A missing course is rejected like a blank id.
    pub fn add_course(&mut self, course_id: &str, course: impl Into<Option<Course>>) -> Result<()> {
        require_text(Some(course_id), "courseId cannot be null or empty.")?;
        let course = course
            .into()
            .ok_or_else(|| RegistryError::invalid_argument("Course cannot be null."))?;

        if self.courses.insert(course_id.to_string(), course).is_some() {
            tracing::debug!("Replaced course {} {}", self.dept_code, course_id);
        }
        Ok(())
    }

    pub fn create_course(
        &mut self,
        course_id: &str,
        instructor_name: &str,
        course_location: &str,
        course_time_slot: &str,
        capacity: i64,
    ) -> Result<()> {
        let course = Course::new(instructor_name, course_location, course_time_slot, capacity)?;
        self.add_course(course_id, course)
    }

    pub fn remove_course(&mut self, course_id: &str) -> Option<Course> {
        self.courses.remove(course_id)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (course_id, course) in &self.courses {
            writeln!(f, "{} {}: {}", self.dept_code, course_id, course)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coms_courses() -> CourseMap {
        let mut courses = CourseMap::new();
        courses.insert(
            "1004".to_string(),
            Course::new("Adam Cannon", "417 IAB", "11:40-12:55", 30).unwrap(),
        );
        courses.insert(
            "3251".to_string(),
            Course::new("Tony Dear", "402 CHANDLER", "1:10-3:40", 125).unwrap(),
        );
        courses
    }

    fn coms() -> Department {
        Department::new("COMS", coms_courses(), "Luca Carloni", 2700).unwrap()
    }

    #[test]
    fn test_accessors() {
        let department = coms();
        assert_eq!(department.dept_code(), "COMS");
        assert_eq!(department.department_chair(), "Luca Carloni");
        assert_eq!(department.number_of_majors(), 2700);
        assert_eq!(department.course_selection(), &coms_courses());
    }

    #[test]
    fn test_new_rejects_invalid_fields() {
        assert!(Department::new("", CourseMap::new(), "Luca Carloni", 2345).is_err());
        assert!(Department::new("COMS", CourseMap::new(), "   ", 2345).is_err());
        assert!(Department::new("COMS", CourseMap::new(), "Luca Carloni", -3)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_new_rejects_blank_course_id() {
        let mut courses = coms_courses();
        courses.insert(
            String::new(),
            Course::new("Gail Kaiser", "501 NWC", "4:10-5:25", 80).unwrap(),
        );
        let err = Department::new("COMS", courses, "Luca Carloni", 2700).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("courseId cannot be null or empty"));
    }

    #[test]
    fn test_major_count_changes() {
        let mut department = coms();
        department.add_person_to_major();
        assert_eq!(department.number_of_majors(), 2701);
        department.drop_person_from_major().unwrap();
        department.drop_person_from_major().unwrap();
        assert_eq!(department.number_of_majors(), 2699);
    }

    #[test]
    fn test_drop_major_from_empty_department() {
        let mut department = Department::new("COMS", CourseMap::new(), "Luca Carloni", 0).unwrap();
        assert!(department
            .drop_person_from_major()
            .unwrap_err()
            .is_invalid_argument());
        assert_eq!(department.number_of_majors(), 0);
    }

    #[test]
    fn test_add_course_validation() {
        let mut department = coms();
        let course = Course::new("Gail Kaiser", "501 NWC", "4:10-5:25", 80).unwrap();
        assert!(department.add_course("", course.clone()).is_err());
        assert!(department.add_course("  ", course).is_err());
        assert!(department
            .add_course("4156", None::<Course>)
            .unwrap_err()
            .is_invalid_argument());
        assert!(department.course("4156").is_none());
    }

    #[test]
    fn test_add_course_overwrites_existing_id() {
        let mut department = coms();
        let replacement = Course::new("Gail Kaiser", "501 NWC", "4:10-5:25", 80).unwrap();
        department.add_course("1004", replacement.clone()).unwrap();
        assert_eq!(department.course("1004"), Some(&replacement));
        assert_eq!(department.course_selection().len(), 2);
    }

    #[test]
    fn test_create_course() {
        let mut department = coms();
        department
            .create_course("4156", "Gail Kaiser", "501 NWC", "4:10-5:25", 80)
            .unwrap();
        assert_eq!(department.course("4156").unwrap().instructor_name(), "Gail Kaiser");

        assert!(department
            .create_course("4995", "Gail Kaiser", "501 NWC", "25:00-26:00", 80)
            .is_err());
        assert!(department.course("4995").is_none());
    }

    #[test]
    fn test_remove_course() {
        let mut department = coms();
        let removed = department.remove_course("3251").unwrap();
        assert_eq!(removed.instructor_name(), "Tony Dear");
        assert!(department.course("3251").is_none());
        assert!(department.remove_course("3251").is_none());
    }

    #[test]
    fn test_display_lists_courses_in_id_order() {
        let expected = "COMS 1004: \nInstructor: Adam Cannon; Location: 417 IAB; Time: 11:40-12:55\n\
                        COMS 3251: \nInstructor: Tony Dear; Location: 402 CHANDLER; Time: 1:10-3:40\n";
        assert_eq!(coms().to_string(), expected);
        let empty = Department::new("ECON", CourseMap::new(), "Michael Woodford", 1).unwrap();
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_deserialize_rejects_blank_course_id() {
        let json = r#"{
            "dept_code": "COMS",
            "department_chair": "Luca Carloni",
            "number_of_majors": 1,
            "courses": {
                " ": {
                    "instructor_name": "Adam Cannon",
                    "course_location": "417 IAB",
                    "course_time_slot": "11:40-12:55",
                    "enrollment_capacity": 30,
                    "enrolled_student_count": 0
                }
            }
        }"#;
        assert!(serde_json::from_str::<Department>(json).is_err());
    }
}
