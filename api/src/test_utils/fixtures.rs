//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::app::hash_api_key;
use crate::domain::entities::{
    Course, CourseId, Group, GroupId, Lesson, LessonId, NewCourse, Role, User, UserId,
};

fn test_user(role: Role) -> (User, String) {
    let suffix = Uuid::new_v4().simple().to_string();
    let api_key = format!("sk-test-{}", suffix);
    let user = User {
        id: UserId::new(),
        username: format!("{}-{}", role, &suffix[..8]),
        role,
        api_key_hash: hash_api_key(&api_key),
        created_at: Utc::now(),
    };
    (user, api_key)
}

/// Create a student together with their plain API key
pub fn test_student() -> (User, String) {
    test_user(Role::Student)
}

/// Create an admin together with their plain API key
pub fn test_admin() -> (User, String) {
    test_user(Role::Admin)
}

/// Create a course priced at 500
pub fn test_course() -> Course {
    test_course_priced(500)
}

/// Create a course with a specific price
pub fn test_course_priced(price: i64) -> Course {
    Course {
        id: CourseId::new(),
        author: "Jane Doe".to_string(),
        title: format!("Course for {}", price),
        start_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
        price,
        created_at: Utc::now(),
    }
}

/// Valid input for creating a course
pub fn new_course_input() -> NewCourse {
    NewCourse {
        author: "Jane Doe".to_string(),
        title: "Rust in Production".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        price: 900,
    }
}

/// Create a lesson of a course
pub fn test_lesson(course_id: CourseId) -> Lesson {
    Lesson {
        id: LessonId::new(),
        course_id,
        title: "Ownership".to_string(),
        link: "https://lessons.test/ownership".to_string(),
        created_at: Utc::now(),
    }
}

/// Create a group of a course
pub fn test_group(course_id: CourseId) -> Group {
    Group {
        id: GroupId::new(),
        course_id,
        title: "Evening group".to_string(),
        created_at: Utc::now(),
    }
}
