//! Diary statistics.
//!
//! Pure aggregation over an in-memory slice of entries; no I/O. The current
//! instant is an explicit parameter so tests (and any caller needing a
//! stable snapshot) can pin it instead of reading the ambient clock.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::diary::DiaryEntry;
use crate::mood::Mood;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiaryStats {
    pub total_entries: u32,
    pub this_week_entries: u32,
    /// Ordered by first encounter while reducing over the entries. The order
    /// matters: it is what makes the most-common tie-break reproducible.
    pub mood_counts: Vec<MoodCount>,
    pub most_common_mood: Mood,
}

/// Aggregate stats for a user's entries. An empty slice is valid input and
/// yields zero counts with the hopeful default mood.
pub fn calculate_stats(entries: &[DiaryEntry], now: DateTime<Utc>) -> DiaryStats {
    let week_ago = now - Duration::days(7);
    let this_week_entries = entries
        .iter()
        .filter(|e| e.created_at >= week_ago)
        .count() as u32;

    let mut mood_counts: Vec<MoodCount> = Vec::new();
    for entry in entries {
        match mood_counts.iter_mut().find(|mc| mc.mood == entry.mood) {
            Some(mc) => mc.count += 1,
            None => mood_counts.push(MoodCount {
                mood: entry.mood,
                count: 1,
            }),
        }
    }

    // Strict comparison keeps the first-encountered mood on ties.
    let most_common_mood = mood_counts
        .iter()
        .fold(None::<&MoodCount>, |best, mc| match best {
            Some(b) if b.count >= mc.count => Some(b),
            _ => Some(mc),
        })
        .map(|mc| mc.mood)
        .unwrap_or_default();

    DiaryStats {
        total_entries: entries.len() as u32,
        this_week_entries,
        mood_counts,
        most_common_mood,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn entry(mood: Mood, created_at: DateTime<Utc>) -> DiaryEntry {
        DiaryEntry {
            id: Uuid::new_v4(),
            title: "título".into(),
            content: "conteúdo".into(),
            mood,
            date: created_at.date_naive(),
            gratitude_items: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let stats = calculate_stats(&[], fixed_now());
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.this_week_entries, 0);
        assert!(stats.mood_counts.is_empty());
        assert_eq!(stats.most_common_mood, Mood::Esperancosa);
    }

    #[test]
    fn test_most_common_mood() {
        let now = fixed_now();
        let mut entries = Vec::new();
        for _ in 0..3 {
            entries.push(entry(Mood::Esperancosa, now));
        }
        for _ in 0..2 {
            entries.push(entry(Mood::Irritada, now));
        }
        entries.push(entry(Mood::Cansada, now));

        let stats = calculate_stats(&entries, now);
        assert_eq!(stats.total_entries, 6);
        assert_eq!(stats.most_common_mood, Mood::Esperancosa);
        assert_eq!(
            stats.mood_counts,
            vec![
                MoodCount { mood: Mood::Esperancosa, count: 3 },
                MoodCount { mood: Mood::Irritada, count: 2 },
                MoodCount { mood: Mood::Cansada, count: 1 },
            ]
        );
    }

    #[test]
    fn test_tie_break_keeps_first_encountered() {
        let now = fixed_now();
        let entries = vec![
            entry(Mood::Aflita, now),
            entry(Mood::Cansada, now),
            entry(Mood::Cansada, now),
            entry(Mood::Aflita, now),
        ];
        let stats = calculate_stats(&entries, now);
        assert_eq!(stats.most_common_mood, Mood::Aflita);
    }

    #[test]
    fn test_week_window_is_inclusive_at_seven_days() {
        let now = fixed_now();
        let entries = vec![
            entry(Mood::Cansada, now - Duration::days(6)),
            entry(Mood::Cansada, now - Duration::days(7)),
            entry(Mood::Cansada, now - Duration::days(8)),
        ];
        let stats = calculate_stats(&entries, now);
        assert_eq!(stats.total_entries, 3);
        // Exactly seven days ago still counts; eight does not.
        assert_eq!(stats.this_week_entries, 2);
    }

    #[test]
    fn test_mood_counts_preserve_insertion_order_in_json() {
        let now = fixed_now();
        let entries = vec![
            entry(Mood::Irritada, now),
            entry(Mood::Sensivel, now),
            entry(Mood::Irritada, now),
        ];
        let stats = calculate_stats(&entries, now);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json["mood_counts"],
            serde_json::json!([
                { "mood": "irritada", "count": 2 },
                { "mood": "sensivel", "count": 1 },
            ])
        );
    }
}
