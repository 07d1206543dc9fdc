use course_registry::{
    seed, Course, CourseMap, Department, DepartmentMapping, RegistryError, Store, StoreMode,
};
use tempfile::TempDir;

fn build_mapping() -> DepartmentMapping {
    let mut mapping = seed::default_departments();

    let mut hist_courses = CourseMap::new();
    hist_courses.insert(
        "1010".to_string(),
        Course::new("Mae Ngai", "517 HAM", "9:00-10:15", 90).unwrap(),
    );
    let hist = Department::new("HIST", hist_courses, "Mae Ngai", 410).unwrap();
    mapping.insert("HIST".to_string(), hist);
    mapping
}

#[test]
fn test_round_trip_preserves_rendering() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let mut store = Store::new(StoreMode::Fresh, &path);
    store.set_mapping(build_mapping());
    assert!(store.save_to_file());

    let loaded = store.load_from_file();
    let mut reloaded = Store::new(StoreMode::Fresh, &path);
    reloaded.set_mapping(loaded);

    assert_eq!(reloaded.to_string(), store.to_string());
    assert_eq!(reloaded.mapping().len(), 3);
    assert!(reloaded.to_string().starts_with("For the COMS department: \n"));
}

#[test]
fn test_round_trip_preserves_counts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let mut store = Store::new(StoreMode::Fresh, &path);
    store.set_mapping(build_mapping());
    {
        let econ = store.department_mut("ECON").unwrap();
        econ.add_person_to_major();
        let course = econ.course_mut("2257").unwrap();
        assert!(course.enroll_student());
        assert!(course.enroll_student());
    }
    store.save_to_file();

    let restored = Store::new(StoreMode::Restore, &path);
    let econ = restored.department("ECON").unwrap();
    assert_eq!(econ.number_of_majors(), 2346);
    assert_eq!(econ.course("2257").unwrap().enrolled_student_count(), 2);
    assert_eq!(restored.mapping(), store.mapping());
}

#[test]
fn test_unsaved_changes_are_not_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let mut store = Store::new(StoreMode::Fresh, &path);
    store.set_mapping(build_mapping());
    store.save_to_file();
    store.remove_department("HIST");

    let restored = Store::new(StoreMode::Restore, &path);
    assert!(restored.department("HIST").is_some());
}

#[test]
fn test_restore_without_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open("restore", temp_dir.path().join("missing.json")).unwrap();
    assert!(store.mapping().is_empty());
}

#[test]
fn test_unknown_mode_names_the_value() {
    let temp_dir = TempDir::new().unwrap();
    match Store::open("2", temp_dir.path().join("registry.json")) {
        Err(RegistryError::InvalidArgument { message }) => {
            assert_eq!(message, "Invalid flag value: 2");
        }
        other => panic!("expected InvalidArgument, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_snapshot_with_invalid_course_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");
    let snapshot = r#"{
        "version": 1,
        "saved_at": "2024-09-01T12:00:00Z",
        "departments": {
            "COMS": {
                "dept_code": "COMS",
                "department_chair": "Luca Carloni",
                "number_of_majors": 2700,
                "courses": {
                    "1004": {
                        "instructor_name": "Adam Cannon",
                        "course_location": "417 IAB",
                        "course_time_slot": "11:40-25:55",
                        "enrollment_capacity": 30,
                        "enrolled_student_count": 0
                    }
                }
            }
        }
    }"#;
    std::fs::write(&path, snapshot).unwrap();

    let store = Store::new(StoreMode::Restore, &path);
    assert!(store.mapping().is_empty());
}

#[test]
fn test_department_course_scenario() {
    let mut courses = CourseMap::new();
    courses.insert(
        "1004".to_string(),
        Course::new("Adam Cannon", "417 IAB", "11:40-12:55", 30).unwrap(),
    );
    let mut coms = Department::new("COMS", courses, "Luca Carloni", 2700).unwrap();

    let course = coms.course_mut("1004").unwrap();
    assert_eq!(course.enrolled_student_count(), 0);
    assert!(!course.is_full());
    course.set_enrolled_student_count(30).unwrap();
    assert!(course.is_full());

    let majors = coms.number_of_majors();
    coms.add_person_to_major();
    coms.drop_person_from_major().unwrap();
    assert_eq!(coms.number_of_majors(), majors);
}

#[test]
fn test_mismatched_key_is_never_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let mut store = Store::new(StoreMode::Fresh, &path);
    store.set_mapping(build_mapping());
    assert!(store.save_to_file());

    let mut mapping = seed::default_departments();
    let coms = mapping.remove("COMS").unwrap();
    mapping.insert("coms".to_string(), coms);
    store.set_mapping(mapping);
    assert!(!store.save_to_file());

    // the last good snapshot survives the refused save
    let restored = Store::new(StoreMode::Restore, &path);
    assert_eq!(restored.mapping(), &build_mapping());
    assert!(restored.to_string().starts_with("For the COMS department: \n"));
}

#[test]
fn test_blank_course_id_cannot_reach_the_file() {
    let mut courses = CourseMap::new();
    courses.insert(
        String::new(),
        Course::new("Adam Cannon", "417 IAB", "11:40-12:55", 30).unwrap(),
    );
    match Department::new("COMS", courses, "Luca Carloni", 2700) {
        Err(RegistryError::InvalidArgument { message }) => {
            assert!(message.starts_with("courseId cannot be null or empty"));
        }
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}
