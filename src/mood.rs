//! Mood vocabulary translation.
//!
//! Single source of truth for the mapping between the user-facing Portuguese
//! mood labels and the English codes stored in the database. The two enums
//! are in bijection, enforced by exhaustive `match` in both directions; no
//! other module may hard-code either vocabulary.
//!
//! Conversions never fail: unknown or missing values degrade to the hopeful
//! mood with a diagnostic, so diary data always renders something.

use serde::{Deserialize, Serialize};

/// User-facing mood vocabulary, as shown (and serialized) to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Cansada,
    Aflita,
    Sensivel,
    Irritada,
    Esperancosa,
}

/// Backend mood vocabulary, stored in the `diary_entries.mood` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCode {
    Tired,
    Anxious,
    Sensitive,
    Irritated,
    Hopeful,
}

impl Default for Mood {
    fn default() -> Self {
        Self::Esperancosa
    }
}

impl Default for MoodCode {
    fn default() -> Self {
        Self::Hopeful
    }
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Cansada,
        Mood::Aflita,
        Mood::Sensivel,
        Mood::Irritada,
        Mood::Esperancosa,
    ];

    /// Backend code for this label. Exhaustive: extending either vocabulary
    /// without updating the mapping is a compile error.
    pub fn code(self) -> MoodCode {
        match self {
            Mood::Cansada => MoodCode::Tired,
            Mood::Aflita => MoodCode::Anxious,
            Mood::Sensivel => MoodCode::Sensitive,
            Mood::Irritada => MoodCode::Irritated,
            Mood::Esperancosa => MoodCode::Hopeful,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Cansada => "cansada",
            Mood::Aflita => "aflita",
            Mood::Sensivel => "sensivel",
            Mood::Irritada => "irritada",
            Mood::Esperancosa => "esperancosa",
        }
    }

    /// Parse a frontend label. `None` when the string is not one of the five
    /// known labels; callers decide whether that is a validation error or a
    /// fallback case.
    pub fn parse(label: &str) -> Option<Mood> {
        Mood::ALL.iter().copied().find(|m| m.label() == label)
    }
}

impl MoodCode {
    /// Frontend label for this code (the reverse half of the bijection).
    pub fn mood(self) -> Mood {
        match self {
            MoodCode::Tired => Mood::Cansada,
            MoodCode::Anxious => Mood::Aflita,
            MoodCode::Sensitive => Mood::Sensivel,
            MoodCode::Irritated => Mood::Irritada,
            MoodCode::Hopeful => Mood::Esperancosa,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodCode::Tired => "tired",
            MoodCode::Anxious => "anxious",
            MoodCode::Sensitive => "sensitive",
            MoodCode::Irritated => "irritated",
            MoodCode::Hopeful => "hopeful",
        }
    }

    pub fn parse(code: &str) -> Option<MoodCode> {
        Mood::ALL.iter().map(|m| m.code()).find(|c| c.as_str() == code)
    }
}

/// Convert a raw frontend label to its backend code. Total: an unrecognized
/// label is logged and resolved to the hopeful code instead of failing.
pub fn to_backend_code(label: &str) -> MoodCode {
    match Mood::parse(label) {
        Some(mood) => mood.code(),
        None => {
            tracing::warn!(label, "unknown mood label, falling back to hopeful");
            MoodCode::default()
        }
    }
}

/// Convert a stored mood code back to a frontend label. Total: `None` means
/// the row predates the mood field and resolves silently to hopeful; an
/// unrecognized string (legacy or corrupted data) is logged and resolves the
/// same way.
pub fn to_frontend_label(code: Option<&str>) -> Mood {
    match code {
        None => Mood::default(),
        Some(raw) => match MoodCode::parse(raw) {
            Some(code) => code.mood(),
            None => {
                tracing::warn!(code = raw, "unknown mood code, falling back to esperancosa");
                Mood::default()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_is_identity_for_all_labels() {
        for mood in Mood::ALL {
            assert_eq!(to_frontend_label(Some(mood.code().as_str())), mood);
        }
    }

    #[test]
    fn test_missing_and_garbage_codes_fall_back_to_hopeful() {
        assert_eq!(to_frontend_label(None), Mood::Esperancosa);
        assert_eq!(to_frontend_label(Some("")), Mood::Esperancosa);
        assert_eq!(to_frontend_label(Some("garbage-code")), Mood::Esperancosa);
        // Frontend labels are not valid backend codes
        assert_eq!(to_frontend_label(Some("cansada")), Mood::Esperancosa);
    }

    #[test]
    fn test_unknown_label_falls_back_to_hopeful_code() {
        assert_eq!(to_backend_code("not-a-mood"), MoodCode::Hopeful);
        assert_eq!(to_backend_code(""), MoodCode::Hopeful);
    }

    #[test]
    fn test_label_to_code_mapping() {
        assert_eq!(to_backend_code("cansada"), MoodCode::Tired);
        assert_eq!(to_backend_code("aflita"), MoodCode::Anxious);
        assert_eq!(to_backend_code("sensivel"), MoodCode::Sensitive);
        assert_eq!(to_backend_code("irritada"), MoodCode::Irritated);
        assert_eq!(to_backend_code("esperancosa"), MoodCode::Hopeful);
    }

    #[test]
    fn test_codes_are_distinct() {
        // The mapping is a true bijection: no two labels share a code.
        for a in Mood::ALL {
            for b in Mood::ALL {
                if a != b {
                    assert_ne!(a.code(), b.code(), "{:?} and {:?} collide", a, b);
                }
            }
        }
    }

    #[test]
    fn test_serde_uses_frontend_labels() {
        assert_eq!(serde_json::to_string(&Mood::Sensivel).unwrap(), "\"sensivel\"");
        let parsed: Mood = serde_json::from_str("\"cansada\"").unwrap();
        assert_eq!(parsed, Mood::Cansada);
    }
}
