//! Router configuration for the registry API.

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/index", get(handlers::index))
        .route("/home", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/save", post(handlers::save_registry))
        // Queries
        .route("/retrieveDept", get(handlers::retrieve_department))
        .route("/retrieveCourse", get(handlers::retrieve_course))
        .route("/isCourseFull", get(handlers::is_course_full))
        .route("/getMajorCountFromDept", get(handlers::get_major_count))
        .route("/idDeptChair", get(handlers::identify_department_chair))
        .route("/findCourseLocation", get(handlers::find_course_location))
        .route("/findCourseInstructor", get(handlers::find_course_instructor))
        .route("/findCourseTime", get(handlers::find_course_time))
        // Mutations
        .route("/addMajorToDept", patch(handlers::add_major_to_department))
        .route("/removeMajorFromDept", patch(handlers::remove_major_from_department))
        .route("/enrollStudentInCourse", patch(handlers::enroll_student))
        .route("/dropStudentFromCourse", patch(handlers::drop_student))
        .route("/setEnrollmentCount", patch(handlers::set_enrollment_count))
        .route("/changeCourseTime", patch(handlers::change_course_time))
        .route("/changeCourseTeacher", patch(handlers::change_course_teacher))
        .route("/changeCourseLocation", patch(handlers::change_course_location))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
