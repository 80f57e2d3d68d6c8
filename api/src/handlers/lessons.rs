//! Lesson handlers
//!
//! Lessons nested under a course. Open to students and admins.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{Method, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ListQuery;
use crate::auth::{Caller, Permission};
use crate::domain::entities::{CourseId, Lesson, LessonId, LessonUpdate};
use crate::error::AppError;
use crate::AppState;

/// Lesson as shown to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct LessonResponse {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub link: String,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id.to_string(),
            course_id: lesson.course_id.to_string(),
            title: lesson.title,
            link: lesson.link,
        }
    }
}

/// Request body for creating or replacing a lesson
#[derive(Debug, Deserialize)]
pub struct LessonRequest {
    pub title: String,
    pub link: String,
}

/// Request body for a partial lesson update
#[derive(Debug, Deserialize)]
pub struct PatchLessonRequest {
    pub title: Option<String>,
    pub link: Option<String>,
}

/// GET /courses/:course_id/lessons
pub async fn list_lessons(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(course_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<LessonResponse>>, AppError> {
    caller.allow(Permission::IsStudentOrIsAdmin, &method)?;

    let lessons = state
        .lesson_service
        .list(&CourseId(course_id), query.limit(), query.offset())
        .await?;

    Ok(Json(lessons.into_iter().map(LessonResponse::from).collect()))
}

/// POST /courses/:course_id/lessons
pub async fn create_lesson(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(course_id): Path<Uuid>,
    payload: Result<Json<LessonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LessonResponse>), AppError> {
    caller.allow(Permission::IsStudentOrIsAdmin, &method)?;
    let Json(request) = payload?;

    let lesson = state
        .lesson_service
        .create(&CourseId(course_id), request.title, request.link)
        .await?;

    Ok((StatusCode::CREATED, Json(lesson.into())))
}

/// GET /courses/:course_id/lessons/:id
pub async fn get_lesson(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path((course_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<LessonResponse>, AppError> {
    caller.allow(Permission::IsStudentOrIsAdmin, &method)?;

    let lesson = state
        .lesson_service
        .get(&CourseId(course_id), &LessonId(id))
        .await?;

    Ok(Json(lesson.into()))
}

/// PUT /courses/:course_id/lessons/:id
pub async fn replace_lesson(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path((course_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<LessonRequest>, JsonRejection>,
) -> Result<Json<LessonResponse>, AppError> {
    caller.allow(Permission::IsStudentOrIsAdmin, &method)?;
    let Json(request) = payload?;

    let update = LessonUpdate {
        title: Some(request.title),
        link: Some(request.link),
    };
    let lesson = state
        .lesson_service
        .update(&CourseId(course_id), &LessonId(id), update)
        .await?;

    Ok(Json(lesson.into()))
}

/// PATCH /courses/:course_id/lessons/:id
pub async fn patch_lesson(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path((course_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<PatchLessonRequest>, JsonRejection>,
) -> Result<Json<LessonResponse>, AppError> {
    caller.allow(Permission::IsStudentOrIsAdmin, &method)?;
    let Json(request) = payload?;

    let update = LessonUpdate {
        title: request.title,
        link: request.link,
    };
    let lesson = state
        .lesson_service
        .update(&CourseId(course_id), &LessonId(id), update)
        .await?;

    Ok(Json(lesson.into()))
}

/// DELETE /courses/:course_id/lessons/:id
pub async fn delete_lesson(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path((course_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    caller.allow(Permission::IsStudentOrIsAdmin, &method)?;

    state
        .lesson_service
        .delete(&CourseId(course_id), &LessonId(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
