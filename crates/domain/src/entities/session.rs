//! De-duplication session
//!
//! A session is the window within which a question is dealt at most once.
//! It lasts 24 hours from its start; a stored session older than that is
//! discarded when loaded.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Question;
use crate::ids::SessionId;
use crate::types::GameMode;

/// Lifetime of a session in milliseconds (24 hours)
pub const SESSION_DURATION_MS: i64 = 86_400_000;

/// Used-question record for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSession {
    used_questions: BTreeSet<String>,
    session_id: SessionId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    start_time: DateTime<Utc>,
}

impl QuestionSession {
    pub fn new(session_id: SessionId, start_time: DateTime<Utc>) -> Self {
        Self {
            used_questions: BTreeSet::new(),
            session_id,
            start_time,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id.clone()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Valid only while `now - start_time < 24h`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        (now - self.start_time).num_milliseconds() >= SESSION_DURATION_MS
    }

    /// Record a question as dealt. Returns false if it was already used.
    pub fn mark_used(&mut self, text: impl Into<String>) -> bool {
        self.used_questions.insert(text.into())
    }

    pub fn is_used(&self, text: &str) -> bool {
        self.used_questions.contains(text)
    }

    pub fn used_count(&self) -> usize {
        self.used_questions.len()
    }

    pub fn used_questions(&self) -> impl Iterator<Item = &str> {
        self.used_questions.iter().map(String::as_str)
    }

    /// Usage counts against `pool`, overall and per mode.
    ///
    /// Only texts present in the pool are counted as used, so prompts dealt
    /// from outside the pool (request prompts, deleted custom questions)
    /// never push `remaining` below zero.
    pub fn stats<'a>(&self, pool: impl IntoIterator<Item = &'a Question>) -> SessionStats {
        let pool: Vec<&Question> = pool.into_iter().filter(|q| !q.is_wildcard()).collect();

        let mode_stats: Vec<ModeStats> = GameMode::all()
            .iter()
            .map(|mode| {
                let in_mode = pool.iter().filter(|q| q.mode() == *mode);
                let (total, used) = in_mode.fold((0, 0), |(total, used), q| {
                    (total + 1, used + usize::from(self.is_used(q.text())))
                });
                ModeStats {
                    mode: *mode,
                    total,
                    used,
                    remaining: total - used,
                }
            })
            .collect();

        let total = mode_stats.iter().map(|m| m.total).sum();
        let used = mode_stats.iter().map(|m| m.used).sum();

        SessionStats {
            total,
            used,
            remaining: total - used,
            session_id: self.session_id.clone(),
            start_time: self.start_time,
            mode_stats,
        }
    }
}

/// Usage for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStats {
    pub mode: GameMode,
    pub total: usize,
    pub used: usize,
    pub remaining: usize,
}

/// Usage across every mode plus session identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total: usize,
    pub used: usize,
    pub remaining: usize,
    pub session_id: SessionId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    pub mode_stats: Vec<ModeStats>,
}

impl SessionStats {
    pub fn for_mode(&self, mode: GameMode) -> Option<&ModeStats> {
        self.mode_stats.iter().find(|stats| stats.mode == mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 14, 19, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let session = QuestionSession::new(SessionId::new(), start());
        assert!(!session.is_expired(start() + Duration::hours(23)));
        assert!(!session.is_expired(start() + Duration::milliseconds(SESSION_DURATION_MS - 1)));
        assert!(session.is_expired(start() + Duration::milliseconds(SESSION_DURATION_MS)));
    }

    #[test]
    fn test_mark_used_is_idempotent() {
        let mut session = QuestionSession::new(SessionId::new(), start());
        assert!(session.mark_used("What's your biggest ick?"));
        assert!(!session.mark_used("What's your biggest ick?"));
        assert_eq!(session.used_count(), 1);
        assert!(session.is_used("What's your biggest ick?"));
    }

    #[test]
    fn test_persisted_shape() {
        let mut session = QuestionSession::new(SessionId::new(), start());
        session.mark_used("b");
        session.mark_used("a");
        let json = serde_json::to_value(&session).expect("serialize");
        assert_eq!(json["usedQuestions"], serde_json::json!(["a", "b"]));
        assert_eq!(json["startTime"], start().timestamp_millis());
        assert_eq!(json["sessionId"], session.session_id().to_string());
    }

    #[test]
    fn test_stats_ignore_used_texts_outside_pool() {
        let pool = vec![
            Question::new("one", GameMode::FirstDate),
            Question::new("two", GameMode::FirstDate),
            Question::new("three", GameMode::GroupMode),
            Question::wildcard("Make up your own question!"),
        ];
        let mut session = QuestionSession::new(SessionId::new(), start());
        session.mark_used("one");
        session.mark_used("not in the pool");

        let stats = session.stats(&pool);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.used, 1);
        assert_eq!(stats.remaining, 2);

        let first_date = stats.for_mode(GameMode::FirstDate).expect("first date stats");
        assert_eq!((first_date.total, first_date.used, first_date.remaining), (2, 1, 1));
        let love_birds = stats.for_mode(GameMode::LoveBirds).expect("love birds stats");
        assert_eq!(love_birds.total, 0);
    }
}
