use crate::core::store::DepartmentMapping;
use crate::domain::{Course, CourseMap, Department};
use crate::utils::error::Result;

// (course id, instructor, location, time slot, capacity)
type CourseRow = (&'static str, &'static str, &'static str, &'static str, i64);

const COMS_COURSES: &[CourseRow] = &[
    ("1004", "Adam Cannon", "417 IAB", "11:40-12:55", 30),
    ("3251", "Tony Dear", "402 CHANDLER", "1:10-3:40", 125),
];

const ECON_COURSES: &[CourseRow] = &[
    ("1105", "Waseem Noor", "309 HAV", "2:40-3:55", 210),
    ("2257", "Tamrat Gashaw", "428 PUP", "10:10-11:25", 125),
];

fn build_department(
    dept_code: &str,
    chair: &str,
    majors: i64,
    rows: &[CourseRow],
) -> Result<Department> {
    let mut courses = CourseMap::new();
    for &(course_id, instructor, location, time_slot, capacity) in rows {
        courses.insert(
            course_id.to_string(),
            Course::new(instructor, location, time_slot, capacity)?,
        );
    }
    Department::new(dept_code, courses, chair, majors)
}

/// Builds the seed mapping, surfacing any row that fails validation.
pub fn try_default_departments() -> Result<DepartmentMapping> {
    let departments = [
        build_department("COMS", "Luca Carloni", 2700, COMS_COURSES)?,
        build_department("ECON", "Michael Woodford", 2345, ECON_COURSES)?,
    ];

    Ok(departments
        .into_iter()
        .map(|department| (department.dept_code().to_string(), department))
        .collect())
}

/// The mapping written by `--setup`.
pub fn default_departments() -> DepartmentMapping {
    match try_default_departments() {
        Ok(departments) => departments,
        Err(e) => {
            tracing::error!("Seed data failed validation: {}", e);
            DepartmentMapping::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_data_is_valid() {
        let departments = try_default_departments().unwrap();
        assert_eq!(departments.len(), 2);
        assert_eq!(departments["COMS"].number_of_majors(), 2700);
        assert_eq!(departments["ECON"].department_chair(), "Michael Woodford");
        assert_eq!(departments["ECON"].course_selection().len(), 2);
    }

    #[test]
    fn test_seed_courses_start_empty() {
        for department in default_departments().values() {
            for course in department.course_selection().values() {
                assert_eq!(course.enrolled_student_count(), 0);
            }
        }
    }
}
