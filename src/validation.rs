//! Diary entry validation.
//!
//! Gatekeeper for the diary write path: nothing structurally invalid or
//! oversized reaches the database. Checks do not short-circuit — the result
//! aggregates every violation so the client can surface them all at once.
//! Error strings are user-facing and Portuguese, matching the app's locale.

use serde_json::Value;

use crate::mood::Mood;

pub const TITLE_MAX_CHARS: usize = 100;
pub const CONTENT_MAX_CHARS: usize = 5000;
pub const GRATITUDE_ITEM_MAX_CHARS: usize = 200;
pub const GRATITUDE_MAX_ITEMS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// A candidate diary entry, after sanitization but before validation.
/// Gratitude items stay as raw JSON values here because the column is JSONB
/// and clients have historically sent non-string elements.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub mood: String,
    pub gratitude_items: Option<Vec<Value>>,
}

/// Trim and collapse internal whitespace runs to single spaces. Idempotent.
pub fn sanitize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validate a draft entry. Pure; never fails. Callers must check `is_valid`
/// before writing. Length checks count characters of the sanitized text.
pub fn validate_entry(draft: &EntryDraft) -> ValidationResult {
    let mut errors = Vec::new();

    let title = sanitize(&draft.title);
    if title.is_empty() {
        errors.push("Título é obrigatório".to_string());
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push(format!(
            "Título deve ter no máximo {} caracteres",
            TITLE_MAX_CHARS
        ));
    }

    let content = sanitize(&draft.content);
    if content.is_empty() {
        errors.push("Conteúdo é obrigatório".to_string());
    } else if content.chars().count() > CONTENT_MAX_CHARS {
        errors.push(format!(
            "Conteúdo deve ter no máximo {} caracteres",
            CONTENT_MAX_CHARS
        ));
    }

    // The known-label set lives in the mood module; no duplicate list here.
    if Mood::parse(&draft.mood).is_none() {
        errors.push("Humor selecionado é inválido".to_string());
    }

    if let Some(items) = &draft.gratitude_items {
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                None => {
                    errors.push(format!("Item de gratidão {} deve ser texto", index + 1));
                }
                Some(text) => {
                    if sanitize(text).chars().count() > GRATITUDE_ITEM_MAX_CHARS {
                        errors.push(format!(
                            "Item de gratidão {} deve ter no máximo {} caracteres",
                            index + 1,
                            GRATITUDE_ITEM_MAX_CHARS
                        ));
                    }
                }
            }
        }
        if items.len() > GRATITUDE_MAX_ITEMS {
            errors.push(format!(
                "Máximo de {} itens de gratidão permitidos",
                GRATITUDE_MAX_ITEMS
            ));
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(title: &str, content: &str, mood: &str) -> EntryDraft {
        EntryDraft {
            title: title.to_string(),
            content: content.to_string(),
            mood: mood.to_string(),
            gratitude_items: None,
        }
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize("  a   b  "), "a b");
        assert_eq!(sanitize("um\t\ndia\r difícil"), "um dia difícil");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for s in ["  a   b  ", "", "já limpo", "\t\n x \t y \n"] {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_valid_entry_passes() {
        let result = validate_entry(&draft(
            "Um dia difícil",
            "Hoje foi complicado mas encontrei forças.",
            "sensivel",
        ));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_all_violations_reported_at_once() {
        let result = validate_entry(&draft("", "", "not-a-mood"));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Título é obrigatório",
                "Conteúdo é obrigatório",
                "Humor selecionado é inválido",
            ]
        );
    }

    #[test]
    fn test_title_boundary_at_100_chars() {
        let exactly = "a".repeat(100);
        assert!(validate_entry(&draft(&exactly, "conteúdo", "cansada")).is_valid);

        let over = "a".repeat(101);
        let result = validate_entry(&draft(&over, "conteúdo", "cansada"));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Título deve ter no máximo 100 caracteres"]
        );
    }

    #[test]
    fn test_content_boundary_at_5000_chars() {
        let exactly = "c".repeat(5000);
        assert!(validate_entry(&draft("título", &exactly, "aflita")).is_valid);

        let over = "c".repeat(5001);
        let result = validate_entry(&draft("título", &over, "aflita"));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Conteúdo deve ter no máximo 5000 caracteres"]
        );
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 100 accented chars is 200 bytes but still a valid title
        let title = "é".repeat(100);
        assert!(validate_entry(&draft(&title, "conteúdo", "irritada")).is_valid);
    }

    #[test]
    fn test_length_checked_after_sanitization() {
        // 101 raw chars that collapse to 99 sanitized chars
        let title = format!("  {}   {}  ", "a".repeat(49), "b".repeat(49));
        assert!(title.chars().count() > 100);
        assert!(validate_entry(&draft(&title, "conteúdo", "esperancosa")).is_valid);
    }

    #[test]
    fn test_gratitude_limits() {
        let ten: Vec<_> = (0..10).map(|i| json!(format!("item {}", i))).collect();
        let mut d = draft("título", "conteúdo", "cansada");
        d.gratitude_items = Some(ten.clone());
        assert!(validate_entry(&d).is_valid);

        let mut eleven = ten;
        eleven.push(json!("um a mais"));
        d.gratitude_items = Some(eleven);
        let result = validate_entry(&d);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Máximo de 10 itens de gratidão permitidos"]
        );
    }

    #[test]
    fn test_oversized_gratitude_item_reported_by_index() {
        let mut items: Vec<_> = (0..9).map(|i| json!(format!("item {}", i))).collect();
        items.insert(3, json!("x".repeat(201)));
        let mut d = draft("título", "conteúdo", "cansada");
        d.gratitude_items = Some(items);

        let result = validate_entry(&d);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Item de gratidão 4 deve ter no máximo 200 caracteres"]
        );
    }

    #[test]
    fn test_non_string_gratitude_item_reported_by_index() {
        let mut d = draft("título", "conteúdo", "cansada");
        d.gratitude_items = Some(vec![json!("saúde"), json!(42), json!(null)]);

        let result = validate_entry(&d);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Item de gratidão 2 deve ser texto",
                "Item de gratidão 3 deve ser texto",
            ]
        );
    }

    #[test]
    fn test_end_to_end_draft_pipeline() {
        let d = EntryDraft {
            title: "Um dia difícil".into(),
            content: "Hoje foi complicado mas encontrei forças.".into(),
            mood: "sensivel".into(),
            gratitude_items: Some(vec![json!("saúde"), json!("família")]),
        };
        let result = validate_entry(&d);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());

        let code = crate::mood::to_backend_code(&d.mood);
        assert_eq!(code, crate::mood::MoodCode::Sensitive);
        assert_eq!(
            crate::mood::to_frontend_label(Some(code.as_str())),
            crate::mood::Mood::Sensivel
        );
    }
}
