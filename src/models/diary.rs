use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::mood::{to_frontend_label, Mood};

/// Diary entry as stored. `mood` is raw text: legacy rows can be NULL or
/// hold codes the vocabulary no longer recognizes, and both must still read
/// back.
#[derive(Debug, Clone, FromRow)]
pub struct DiaryEntryRow {
    pub id: Uuid,
    #[allow(dead_code)]
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub date: NaiveDate,
    pub gratitude_items: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Diary entry in frontend shape: mood translated to its label, gratitude
/// items filtered down to strings.
#[derive(Debug, Clone, Serialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub date: NaiveDate,
    pub gratitude_items: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DiaryEntryRow> for DiaryEntry {
    fn from(row: DiaryEntryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            mood: to_frontend_label(row.mood.as_deref()),
            date: row.date,
            gratitude_items: gratitude_items_from_json(&row.gratitude_items),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// POST /api/diary body. Gratitude items arrive as raw JSON values so the
/// validator can report non-string elements by index instead of the request
/// failing to deserialize.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub title: String,
    pub content: String,
    pub mood: String,
    pub gratitude_items: Option<Vec<Value>>,
}

/// PUT /api/diary/:id body — partial update, all fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<String>,
    pub gratitude_items: Option<Vec<Value>>,
}

/// Extract the string elements of a stored JSONB gratitude array, dropping
/// anything else (nulls, numbers, non-array values from old clients).
pub fn gratitude_items_from_json(value: &Value) -> Vec<String> {
    match value.as_array() {
        Some(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gratitude_filtering_keeps_only_strings() {
        let value = json!(["saúde", 7, null, "família", {"a": 1}]);
        assert_eq!(gratitude_items_from_json(&value), vec!["saúde", "família"]);
    }

    #[test]
    fn test_gratitude_filtering_tolerates_non_arrays() {
        assert!(gratitude_items_from_json(&json!(null)).is_empty());
        assert!(gratitude_items_from_json(&json!("not-a-list")).is_empty());
        assert!(gratitude_items_from_json(&json!({})).is_empty());
    }

    #[test]
    fn test_row_conversion_falls_back_on_missing_mood() {
        let now = Utc::now();
        let row = DiaryEntryRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "título".into(),
            content: "conteúdo".into(),
            mood: None,
            date: now.date_naive(),
            gratitude_items: json!([]),
            created_at: now,
            updated_at: now,
        };
        let entry = DiaryEntry::from(row);
        assert_eq!(entry.mood, Mood::Esperancosa);
    }
}
