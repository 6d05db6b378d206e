//! Handlers for the `/announcements` resource.
//!
//! Staff manage announcements; everyone reads the published ones addressed
//! to their audience.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use studiodesk_core::announcements::{audiences_for_role, validate_audience};
use studiodesk_core::error::CoreError;
use studiodesk_core::field_validation::{validate_max_len, validate_required};
use studiodesk_core::types::DbId;
use studiodesk_db::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};
use studiodesk_db::repositories::AnnouncementRepo;
use studiodesk_events::{event_types, PlatformEvent};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_TITLE_LEN: usize = 200;

/// GET /api/v1/announcements
///
/// Staff see drafts too. Everyone else sees published announcements for
/// their audience, pinned first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Announcement>>>> {
    let announcements = if auth.is_staff() {
        AnnouncementRepo::list_all(&state.pool).await?
    } else {
        AnnouncementRepo::list_published_for(&state.pool, audiences_for_role(&auth.role)).await?
    };
    Ok(Json(DataResponse {
        data: announcements,
    }))
}

/// POST /api/v1/announcements
///
/// Created as an unpublished draft.
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateAnnouncement>,
) -> AppResult<(StatusCode, Json<Announcement>)> {
    validate_required(&input.title, "title")?;
    validate_max_len(&input.title, MAX_TITLE_LEN, "title")?;
    validate_required(&input.body, "body")?;
    if let Some(audience) = &input.audience {
        validate_audience(audience)?;
    }

    let announcement = AnnouncementRepo::create(&state.pool, &input, staff.user_id).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// PUT /api/v1/announcements/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnouncement>,
) -> AppResult<Json<Announcement>> {
    if let Some(title) = &input.title {
        validate_required(title, "title")?;
        validate_max_len(title, MAX_TITLE_LEN, "title")?;
    }
    if let Some(body) = &input.body {
        validate_required(body, "body")?;
    }
    if let Some(audience) = &input.audience {
        validate_audience(audience)?;
    }

    let announcement = AnnouncementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Announcement", id))?;
    Ok(Json(announcement))
}

/// POST /api/v1/announcements/{id}/publish
///
/// Publishing notifies every active user in the audience.
pub async fn publish(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Announcement>> {
    let existing = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Announcement", id))?;
    if existing.is_published {
        return Err(AppError::Core(CoreError::Conflict(
            "Announcement is already published".into(),
        )));
    }

    let announcement = AnnouncementRepo::publish(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Announcement is already published".into(),
            ))
        })?;

    tracing::info!(announcement_id = id, audience = %announcement.audience, "Announcement published");

    state.publish(
        PlatformEvent::new(event_types::ANNOUNCEMENT_PUBLISHED)
            .with_source("announcement", announcement.id)
            .with_actor(staff.user_id)
            .with_payload(json!({
                "audience": announcement.audience,
                "title": announcement.title,
            })),
    );

    Ok(Json(announcement))
}

/// DELETE /api/v1/announcements/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AnnouncementRepo::delete(&state.pool, id).await? {
        return Err(not_found("Announcement", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
