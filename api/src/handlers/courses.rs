//! Course handlers
//!
//! Catalogue endpoints plus the purchase actions.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{Method, StatusCode},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ListQuery;
use crate::app::PurchaseOutcome;
use crate::auth::{Caller, Permission};
use crate::domain::entities::{Course, CourseId, CourseUpdate, NewCourse};
use crate::error::AppError;
use crate::AppState;

/// Course as shown to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub price: i64,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            author: course.author,
            title: course.title,
            start_date: course.start_date,
            price: course.price,
        }
    }
}

/// Request body for creating or replacing a course
#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub author: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub price: i64,
}

impl From<CourseRequest> for NewCourse {
    fn from(request: CourseRequest) -> Self {
        NewCourse {
            author: request.author,
            title: request.title,
            start_date: request.start_date,
            price: request.price,
        }
    }
}

/// Request body for a partial course update
#[derive(Debug, Default, Deserialize)]
pub struct PatchCourseRequest {
    pub author: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub price: Option<i64>,
}

impl From<PatchCourseRequest> for CourseUpdate {
    fn from(request: PatchCourseRequest) -> Self {
        CourseUpdate {
            author: request.author,
            title: request.title,
            start_date: request.start_date,
            price: request.price,
        }
    }
}

/// GET /courses
pub async fn list_courses(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    caller.allow(Permission::ReadOnlyOrIsAdmin, &method)?;

    let courses = state
        .course_service
        .list(query.limit(), query.offset())
        .await?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// POST /courses
pub async fn create_course(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    payload: Result<Json<CourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    caller.allow(Permission::ReadOnlyOrIsAdmin, &method)?;
    let Json(request) = payload?;

    let course = state.course_service.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// GET /courses/:id
pub async fn get_course(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, AppError> {
    caller.allow(Permission::ReadOnlyOrIsAdmin, &method)?;

    let course = state.course_service.get(&CourseId(id)).await?;

    Ok(Json(course.into()))
}

/// PUT /courses/:id
pub async fn replace_course(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(id): Path<Uuid>,
    payload: Result<Json<CourseRequest>, JsonRejection>,
) -> Result<Json<CourseResponse>, AppError> {
    caller.allow(Permission::ReadOnlyOrIsAdmin, &method)?;
    let Json(request) = payload?;

    let update = CourseUpdate::from(NewCourse::from(request));
    let course = state.course_service.update(&CourseId(id), update).await?;

    Ok(Json(course.into()))
}

/// PATCH /courses/:id
pub async fn patch_course(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(id): Path<Uuid>,
    payload: Result<Json<PatchCourseRequest>, JsonRejection>,
) -> Result<Json<CourseResponse>, AppError> {
    caller.allow(Permission::ReadOnlyOrIsAdmin, &method)?;
    let Json(request) = payload?;

    let course = state
        .course_service
        .update(&CourseId(id), request.into())
        .await?;

    Ok(Json(course.into()))
}

/// DELETE /courses/:id
///
/// Lessons and groups of the course are deleted with it.
pub async fn delete_course(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    caller.allow(Permission::ReadOnlyOrIsAdmin, &method)?;

    state.course_service.delete(&CourseId(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /courses/:id/pay
///
/// Buy access to a course with the caller's bonus balance.
/// Answers 201 with an empty body whether or not the purchase went through.
pub async fn pay(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    caller.allow(Permission::IsAuthenticated, &method)?;
    let user = caller.require_user()?;

    let outcome = state.purchase_service.pay(user, &CourseId(id)).await?;
    if let PurchaseOutcome::InsufficientFunds { .. } = outcome {
        tracing::debug!(user_id = %user.id, course_id = %id, "Reporting declined purchase as created");
    }

    Ok(StatusCode::CREATED)
}

/// GET /courses/can_buy
///
/// Courses the caller has not subscribed to yet.
pub async fn can_buy(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    caller.allow(Permission::IsAuthenticated, &method)?;
    let user = caller.require_user()?;

    let courses = state.purchase_service.purchasable_courses(user).await?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}
