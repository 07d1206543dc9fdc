//! HTTP handlers for the registry API.
//!
//! Every handler resolves the department (and course) first and answers 404
//! when either is unknown; only then is the domain operation invoked.
//! Department codes are matched case-insensitively by uppercasing them.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::AppError;
use super::state::AppState;
use crate::core::{Course, Department, Store};

/// Result type for text handlers.
pub type HandlerResult = Result<String, AppError>;

pub const ATTRIBUTE_UPDATED_SUCCESSFULLY: &str = "Attribute was updated successfully.";

const WELCOME_MESSAGE: &str = "Welcome, in order to make an API call direct your browser or \
Postman to an endpoint \n\nThis can be done using the following format: \n\n\
http:127.0.0.1:8080/endpoint?arg=value";

// =============================================================================
// Query parameters
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeptQuery {
    pub dept_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseQuery {
    pub dept_code: String,
    pub course_code: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentCountQuery {
    pub dept_code: String,
    pub course_code: i64,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTimeQuery {
    pub dept_code: String,
    pub course_code: i64,
    pub time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTeacherQuery {
    pub dept_code: String,
    pub course_code: i64,
    pub teacher: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseLocationQuery {
    pub dept_code: String,
    pub course_code: i64,
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub departments: usize,
    pub data_file: String,
}

// =============================================================================
// Lookup helpers
// =============================================================================

fn department_key(dept_code: &str) -> String {
    dept_code.trim().to_uppercase()
}

fn find_department<'a>(store: &'a Store, dept_code: &str) -> Result<&'a Department, AppError> {
    store
        .department(&department_key(dept_code))
        .ok_or(AppError::DepartmentNotFound)
}

fn find_department_mut<'a>(
    store: &'a mut Store,
    dept_code: &str,
) -> Result<&'a mut Department, AppError> {
    store
        .department_mut(&department_key(dept_code))
        .ok_or(AppError::DepartmentNotFound)
}

fn find_course<'a>(
    store: &'a Store,
    dept_code: &str,
    course_code: i64,
) -> Result<&'a Course, AppError> {
    find_department(store, dept_code)?
        .course(&course_code.to_string())
        .ok_or(AppError::CourseNotFound)
}

fn find_course_mut<'a>(
    store: &'a mut Store,
    dept_code: &str,
    course_code: i64,
) -> Result<&'a mut Course, AppError> {
    find_department_mut(store, dept_code)?
        .course_mut(&course_code.to_string())
        .ok_or(AppError::CourseNotFound)
}

// =============================================================================
// Service endpoints
// =============================================================================

/// GET /, /index, /home
pub async fn index() -> &'static str {
    WELCOME_MESSAGE
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store.lock().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        departments: store.mapping().len(),
        data_file: store.path().display().to_string(),
    })
}

/// POST /save
///
/// Flushes the registry to disk now instead of waiting for shutdown.
pub async fn save_registry(State(state): State<AppState>) -> HandlerResult {
    let store = state.store.lock().await;
    store.try_save()?;
    Ok("Registry saved.".to_string())
}

// =============================================================================
// Queries
// =============================================================================

/// GET /retrieveDept
pub async fn retrieve_department(
    State(state): State<AppState>,
    Query(query): Query<DeptQuery>,
) -> HandlerResult {
    let store = state.store.lock().await;
    let department = find_department(&store, &query.dept_code)?;
    Ok(department.to_string())
}

/// GET /retrieveCourse
pub async fn retrieve_course(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> HandlerResult {
    let store = state.store.lock().await;
    let course = find_course(&store, &query.dept_code, query.course_code)?;
    Ok(course.to_string())
}

/// GET /isCourseFull
pub async fn is_course_full(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<bool>, AppError> {
    let store = state.store.lock().await;
    let course = find_course(&store, &query.dept_code, query.course_code)?;
    Ok(Json(course.is_full()))
}

/// GET /getMajorCountFromDept
pub async fn get_major_count(
    State(state): State<AppState>,
    Query(query): Query<DeptQuery>,
) -> HandlerResult {
    let store = state.store.lock().await;
    let department = find_department(&store, &query.dept_code)?;
    Ok(format!(
        "There are: {} majors in the department",
        department.number_of_majors()
    ))
}

/// GET /idDeptChair
pub async fn identify_department_chair(
    State(state): State<AppState>,
    Query(query): Query<DeptQuery>,
) -> HandlerResult {
    let store = state.store.lock().await;
    let department = find_department(&store, &query.dept_code)?;
    Ok(format!(
        "{} is the department chair.",
        department.department_chair()
    ))
}

/// GET /findCourseLocation
pub async fn find_course_location(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> HandlerResult {
    let store = state.store.lock().await;
    let course = find_course(&store, &query.dept_code, query.course_code)?;
    Ok(format!(
        "{} is where the course is located.",
        course.course_location()
    ))
}

/// GET /findCourseInstructor
pub async fn find_course_instructor(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> HandlerResult {
    let store = state.store.lock().await;
    let course = find_course(&store, &query.dept_code, query.course_code)?;
    Ok(format!(
        "{} is the instructor for the course.",
        course.instructor_name()
    ))
}

/// GET /findCourseTime
pub async fn find_course_time(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> HandlerResult {
    let store = state.store.lock().await;
    let course = find_course(&store, &query.dept_code, query.course_code)?;
    Ok(format!("The course meets at: {} ", course.course_time_slot()))
}

// =============================================================================
// Mutations
// =============================================================================

/// PATCH /addMajorToDept
pub async fn add_major_to_department(
    State(state): State<AppState>,
    Query(query): Query<DeptQuery>,
) -> HandlerResult {
    let mut store = state.store.lock().await;
    let department = find_department_mut(&mut store, &query.dept_code)?;
    department.add_person_to_major();
    tracing::info!(
        "Added a major to {} (now {})",
        department.dept_code(),
        department.number_of_majors()
    );
    Ok(ATTRIBUTE_UPDATED_SUCCESSFULLY.to_string())
}

/// PATCH /removeMajorFromDept
pub async fn remove_major_from_department(
    State(state): State<AppState>,
    Query(query): Query<DeptQuery>,
) -> HandlerResult {
    let mut store = state.store.lock().await;
    let department = find_department_mut(&mut store, &query.dept_code)?;
    department.drop_person_from_major()?;
    tracing::info!(
        "Removed a major from {} (now {})",
        department.dept_code(),
        department.number_of_majors()
    );
    Ok("Attribute was updated or is at minimum".to_string())
}

/// PATCH /enrollStudentInCourse
pub async fn enroll_student(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> HandlerResult {
    let mut store = state.store.lock().await;
    let course = find_course_mut(&mut store, &query.dept_code, query.course_code)?;
    if !course.enroll_student() {
        return Err(AppError::BadRequest(
            "Student has not been enrolled.".to_string(),
        ));
    }
    tracing::info!(
        "Enrolled a student in {} {}",
        department_key(&query.dept_code),
        query.course_code
    );
    Ok("Student has been enrolled.".to_string())
}

/// PATCH /dropStudentFromCourse
pub async fn drop_student(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> HandlerResult {
    let mut store = state.store.lock().await;
    let course = find_course_mut(&mut store, &query.dept_code, query.course_code)?;
    if !course.drop_student() {
        return Err(AppError::BadRequest(
            "Student has not been dropped.".to_string(),
        ));
    }
    tracing::info!(
        "Dropped a student from {} {}",
        department_key(&query.dept_code),
        query.course_code
    );
    Ok("Student has been dropped.".to_string())
}

/// PATCH /setEnrollmentCount
pub async fn set_enrollment_count(
    State(state): State<AppState>,
    Query(query): Query<EnrollmentCountQuery>,
) -> HandlerResult {
    let mut store = state.store.lock().await;
    let course = find_course_mut(&mut store, &query.dept_code, query.course_code)?;
    course.set_enrolled_student_count(query.count)?;
    if course.enrolled_student_count() > course.enrollment_capacity() {
        tracing::warn!(
            "{} {} now has {} students for {} seats",
            department_key(&query.dept_code),
            query.course_code,
            course.enrolled_student_count(),
            course.enrollment_capacity()
        );
    }
    Ok(ATTRIBUTE_UPDATED_SUCCESSFULLY.to_string())
}

/// PATCH /changeCourseTime
pub async fn change_course_time(
    State(state): State<AppState>,
    Query(query): Query<CourseTimeQuery>,
) -> HandlerResult {
    let mut store = state.store.lock().await;
    let course = find_course_mut(&mut store, &query.dept_code, query.course_code)?;
    course.reassign_time(&query.time)?;
    Ok(ATTRIBUTE_UPDATED_SUCCESSFULLY.to_string())
}

/// PATCH /changeCourseTeacher
pub async fn change_course_teacher(
    State(state): State<AppState>,
    Query(query): Query<CourseTeacherQuery>,
) -> HandlerResult {
    let mut store = state.store.lock().await;
    let course = find_course_mut(&mut store, &query.dept_code, query.course_code)?;
    course.reassign_instructor(&query.teacher)?;
    Ok(ATTRIBUTE_UPDATED_SUCCESSFULLY.to_string())
}

/// PATCH /changeCourseLocation
pub async fn change_course_location(
    State(state): State<AppState>,
    Query(query): Query<CourseLocationQuery>,
) -> HandlerResult {
    let mut store = state.store.lock().await;
    let course = find_course_mut(&mut store, &query.dept_code, query.course_code)?;
    course.reassign_location(&query.location)?;
    Ok(ATTRIBUTE_UPDATED_SUCCESSFULLY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_key_uppercases() {
        assert_eq!(department_key("coms"), "COMS");
        assert_eq!(department_key(" Econ "), "ECON");
    }
}
