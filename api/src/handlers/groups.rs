//! Group handlers
//!
//! Groups nested under a course. Admin only, reads included.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{Method, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ListQuery;
use crate::auth::{Caller, Permission};
use crate::domain::entities::{CourseId, Group, GroupId, GroupUpdate};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    pub course_id: String,
    pub title: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.to_string(),
            course_id: group.course_id.to_string(),
            title: group.title,
        }
    }
}

/// Request body for creating or updating a group
#[derive(Debug, Deserialize)]
pub struct GroupRequest {
    pub title: String,
}

/// Request body for a partial group update
#[derive(Debug, Deserialize)]
pub struct PatchGroupRequest {
    pub title: Option<String>,
}

/// GET /courses/:course_id/groups
pub async fn list_groups(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(course_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<GroupResponse>>, AppError> {
    caller.allow(Permission::IsAdminUser, &method)?;

    let groups = state
        .group_service
        .list(&CourseId(course_id), query.limit(), query.offset())
        .await?;

    Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

/// POST /courses/:course_id/groups
pub async fn create_group(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path(course_id): Path<Uuid>,
    payload: Result<Json<GroupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GroupResponse>), AppError> {
    caller.allow(Permission::IsAdminUser, &method)?;
    let Json(request) = payload?;

    let group = state
        .group_service
        .create(&CourseId(course_id), request.title)
        .await?;

    Ok((StatusCode::CREATED, Json(group.into())))
}

/// GET /courses/:course_id/groups/:id
pub async fn get_group(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path((course_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<GroupResponse>, AppError> {
    caller.allow(Permission::IsAdminUser, &method)?;

    let group = state
        .group_service
        .get(&CourseId(course_id), &GroupId(id))
        .await?;

    Ok(Json(group.into()))
}

/// PUT /courses/:course_id/groups/:id
pub async fn replace_group(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path((course_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<GroupRequest>, JsonRejection>,
) -> Result<Json<GroupResponse>, AppError> {
    caller.allow(Permission::IsAdminUser, &method)?;
    let Json(request) = payload?;

    let update = GroupUpdate {
        title: Some(request.title),
    };
    let group = state
        .group_service
        .update(&CourseId(course_id), &GroupId(id), update)
        .await?;

    Ok(Json(group.into()))
}

/// PATCH /courses/:course_id/groups/:id
pub async fn patch_group(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path((course_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<PatchGroupRequest>, JsonRejection>,
) -> Result<Json<GroupResponse>, AppError> {
    caller.allow(Permission::IsAdminUser, &method)?;
    let Json(request) = payload?;

    let update = GroupUpdate {
        title: request.title,
    };
    let group = state
        .group_service
        .update(&CourseId(course_id), &GroupId(id), update)
        .await?;

    Ok(Json(group.into()))
}

/// DELETE /courses/:course_id/groups/:id
pub async fn delete_group(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
    Path((course_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    caller.allow(Permission::IsAdminUser, &method)?;

    state
        .group_service
        .delete(&CourseId(course_id), &GroupId(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
