//! Emotion diary endpoints.
//!
//! Every write goes through the same pipeline: sanitize → validate →
//! translate the mood label to its backend code → persist. Reads translate
//! the stored code back to the frontend label, so clients never see backend
//! vocabulary. All queries are scoped to the authenticated owner.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::diary::{
    CreateEntryRequest, DiaryEntry, DiaryEntryRow, UpdateEntryRequest,
};
use crate::mood::{to_backend_code, to_frontend_label};
use crate::stats::{calculate_stats, DiaryStats};
use crate::validation::{sanitize, validate_entry, EntryDraft};
use crate::AppState;

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<DiaryEntry>>> {
    let entries = fetch_entries(&state, auth_user.id).await?;
    Ok(Json(entries))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<Json<DiaryEntry>> {
    let draft = EntryDraft {
        title: body.title,
        content: body.content,
        mood: body.mood,
        gratitude_items: body.gratitude_items,
    };

    let result = validate_entry(&draft);
    if !result.is_valid {
        return Err(AppError::InvalidEntry(result.errors));
    }

    let mood_code = to_backend_code(&draft.mood);
    let gratitude_items = sanitize_gratitude(draft.gratitude_items.as_deref());

    let row = sqlx::query_as::<_, DiaryEntryRow>(
        r#"
        INSERT INTO diary_entries (id, user_id, title, content, mood, date, gratitude_items)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(sanitize(&draft.title))
    .bind(sanitize(&draft.content))
    .bind(mood_code.as_str())
    .bind(Utc::now().date_naive())
    .bind(serde_json::json!(gratitude_items))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(DiaryEntry::from(row)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<UpdateEntryRequest>,
) -> AppResult<Json<DiaryEntry>> {
    let existing = sqlx::query_as::<_, DiaryEntryRow>(
        "SELECT * FROM diary_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entrada não encontrada".into()))?;

    // Merge the patch over the stored entry and re-run the full validation
    // pipeline; partial writes never skip it.
    let draft = EntryDraft {
        title: body.title.unwrap_or_else(|| existing.title.clone()),
        content: body.content.unwrap_or_else(|| existing.content.clone()),
        mood: body
            .mood
            .unwrap_or_else(|| to_frontend_label(existing.mood.as_deref()).label().to_string()),
        gratitude_items: body.gratitude_items.or_else(|| {
            existing.gratitude_items.as_array().cloned()
        }),
    };

    let result = validate_entry(&draft);
    if !result.is_valid {
        return Err(AppError::InvalidEntry(result.errors));
    }

    let mood_code = to_backend_code(&draft.mood);
    let gratitude_items = sanitize_gratitude(draft.gratitude_items.as_deref());

    let row = sqlx::query_as::<_, DiaryEntryRow>(
        r#"
        UPDATE diary_entries SET
            title = $3,
            content = $4,
            mood = $5,
            gratitude_items = $6,
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .bind(sanitize(&draft.title))
    .bind(sanitize(&draft.content))
    .bind(mood_code.as_str())
    .bind(serde_json::json!(gratitude_items))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(DiaryEntry::from(row)))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM diary_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Entrada não encontrada".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DiaryStats>> {
    let entries = fetch_entries(&state, auth_user.id).await?;
    Ok(Json(calculate_stats(&entries, Utc::now())))
}

async fn fetch_entries(state: &AppState, user_id: Uuid) -> AppResult<Vec<DiaryEntry>> {
    let rows = sqlx::query_as::<_, DiaryEntryRow>(
        r#"
        SELECT * FROM diary_entries
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(rows.into_iter().map(DiaryEntry::from).collect())
}

/// Sanitize each validated gratitude item. Validation already rejected
/// non-string elements, so any stragglers here are simply dropped.
fn sanitize_gratitude(items: Option<&[Value]>) -> Vec<String> {
    items
        .unwrap_or_default()
        .iter()
        .filter_map(|v| v.as_str().map(sanitize))
        .collect()
}
