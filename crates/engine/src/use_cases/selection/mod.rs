//! Question selection use cases.
//!
//! `QuestionSelectionEngine` owns the de-duplication session. It deals decks
//! from the catalog plus approved custom questions, records which questions
//! were shown and persists the session after every change.

use std::sync::Arc;

use tokio::sync::RwLock;

use connection_cards_domain::{
    build_deck, Deck, GameMode, Question, QuestionCatalog, QuestionClassifier, QuestionSession,
    SelectionCriteria, SessionConfig, SessionId, SessionStats,
};

use crate::infrastructure::ports::{storage_keys, ClockPort, RandomPort, StorageError, StoragePort};
use crate::stores::CustomQuestionStore;

pub struct QuestionSelectionEngine {
    catalog: Arc<QuestionCatalog>,
    custom: Arc<CustomQuestionStore>,
    classifier: Arc<dyn QuestionClassifier>,
    storage: Arc<dyn StoragePort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    session: RwLock<QuestionSession>,
}

impl QuestionSelectionEngine {
    /// Restore the persisted session, or start a fresh one when it is
    /// missing, unreadable or older than 24 hours.
    pub fn load(
        catalog: Arc<QuestionCatalog>,
        custom: Arc<CustomQuestionStore>,
        classifier: Arc<dyn QuestionClassifier>,
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let now = clock.now();
        let session = match read_session(storage.as_ref()) {
            Some(session) if !session.is_expired(now) => {
                tracing::info!(
                    session_id = %session.session_id(),
                    used = session.used_count(),
                    "Resumed question session"
                );
                session
            }
            Some(expired) => {
                tracing::info!(session_id = %expired.session_id(), "Stored session expired");
                let fresh = QuestionSession::new(SessionId::from_uuid(random.gen_uuid()), now);
                write_session(storage.as_ref(), &fresh);
                fresh
            }
            None => {
                let fresh = QuestionSession::new(SessionId::from_uuid(random.gen_uuid()), now);
                write_session(storage.as_ref(), &fresh);
                fresh
            }
        };

        Self {
            catalog,
            custom,
            classifier,
            storage,
            clock,
            random,
            session: RwLock::new(session),
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Deal a deck for `mode`.
    ///
    /// The deck is meant to be played through by index; calling again
    /// reshuffles. When every question of the mode has been used, the full
    /// pool is dealt again with [`Deck::repeats`] set.
    pub async fn get_available_questions(
        &self,
        mode: GameMode,
        config: Option<&SessionConfig>,
        energy_level: Option<u8>,
    ) -> Deck {
        let mut criteria = SelectionCriteria::new(mode);
        if let Some(config) = config {
            criteria = criteria.with_config(config);
        }
        if let Some(level) = energy_level {
            criteria = criteria.with_energy(level);
        }

        let custom = self.custom.approved_by_mode(Some(mode)).await;
        let session = self.session.read().await;
        let mut pick = |upper: usize| self.random.gen_index(upper);
        let deck = build_deck(
            &self.catalog,
            &custom,
            &session,
            &criteria,
            self.classifier.as_ref(),
            &mut pick,
        );

        if deck.repeats {
            tracing::warn!(
                mode = %mode,
                session_id = %session.session_id(),
                count = deck.len(),
                "Every question for this mode was used, dealing repeats"
            );
        } else {
            tracing::debug!(
                mode = %mode,
                mood = ?criteria.mood,
                energy = ?criteria.energy_level,
                count = deck.len(),
                "Dealt deck"
            );
        }
        deck
    }

    /// Record `text` as shown. The wildcard sentinel is never recorded.
    pub async fn mark_question_as_used(&self, text: &str) {
        if text == self.catalog.wildcard().text() {
            return;
        }
        let mut session = self.session.write().await;
        if session.mark_used(text) {
            write_session(self.storage.as_ref(), &session);
        }
    }

    /// Usage counts across catalog and approved custom questions
    pub async fn get_session_stats(&self) -> SessionStats {
        let custom = self.custom.approved_by_mode(None).await;
        let pool: Vec<&Question> = self
            .catalog
            .all_questions()
            .iter()
            .chain(custom.iter().map(|c| &c.question))
            .collect();
        self.session.read().await.stats(pool)
    }

    /// Forget every used question and start a new session.
    pub async fn clear_session(&self) -> SessionId {
        let fresh = QuestionSession::new(
            SessionId::from_uuid(self.random.gen_uuid()),
            self.clock.now(),
        );
        let session_id = fresh.session_id();

        let mut session = self.session.write().await;
        *session = fresh;
        if let Err(e) = self.storage.remove(storage_keys::SESSION) {
            tracing::warn!(error = %e, "Failed to erase stored session");
        }
        tracing::info!(session_id = %session_id, "Question session cleared");
        session_id
    }

    /// Snapshot of the current session record
    pub async fn session(&self) -> QuestionSession {
        self.session.read().await.clone()
    }
}

fn read_session(storage: &dyn StoragePort) -> Option<QuestionSession> {
    match storage.load(storage_keys::SESSION) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt stored session, starting fresh");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read stored session, starting fresh");
            None
        }
    }
}

fn write_session(storage: &dyn StoragePort, session: &QuestionSession) {
    let result = serde_json::to_string(session)
        .map_err(StorageError::from)
        .and_then(|json| storage.save(storage_keys::SESSION, &json));
    if let Err(e) = result {
        tracing::warn!(error = %e, session_id = %session.session_id(), "Failed to persist session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom, SystemRandom};
    use crate::infrastructure::storage::MemoryStorage;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use connection_cards_domain::{KeywordClassifier, PlayerId, SessionMood};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
    }

    struct Harness {
        storage: Arc<MemoryStorage>,
        custom: Arc<CustomQuestionStore>,
    }

    impl Harness {
        fn new() -> Self {
            let storage = Arc::new(MemoryStorage::new());
            let custom = Arc::new(CustomQuestionStore::load(
                storage.clone(),
                Arc::new(FixedClock::at(start())),
                Arc::new(FixedRandom),
            ));
            Self { storage, custom }
        }

        fn engine_at(&self, now: DateTime<Utc>) -> QuestionSelectionEngine {
            QuestionSelectionEngine::load(
                Arc::new(QuestionCatalog::builtin()),
                self.custom.clone(),
                Arc::new(KeywordClassifier::new()),
                self.storage.clone(),
                Arc::new(FixedClock::at(now)),
                Arc::new(SystemRandom::new()),
            )
        }
    }

    #[tokio::test]
    async fn used_questions_are_never_dealt_again() {
        let harness = Harness::new();
        let engine = harness.engine_at(start());

        let deck = engine.get_available_questions(GameMode::ThirdDate, None, None).await;
        let used: Vec<String> = deck.texts().take(3).map(str::to_string).collect();
        for text in &used {
            engine.mark_question_as_used(text).await;
        }

        for _ in 0..5 {
            let deck = engine.get_available_questions(GameMode::ThirdDate, None, Some(5)).await;
            assert!(!deck.repeats);
            assert!(deck.texts().all(|t| !used.iter().any(|u| u == t)));
        }
    }

    #[tokio::test]
    async fn session_survives_reload_within_window() {
        let harness = Harness::new();
        let engine = harness.engine_at(start());
        engine.mark_question_as_used("Describe yourself in three words.").await;
        let id = engine.session().await.session_id();

        let reloaded = harness.engine_at(start() + Duration::hours(23));
        let session = reloaded.session().await;
        assert_eq!(session.session_id(), id);
        assert!(session.is_used("Describe yourself in three words."));
    }

    #[tokio::test]
    async fn expired_session_is_replaced_on_load() {
        let harness = Harness::new();
        let engine = harness.engine_at(start());
        engine.mark_question_as_used("Describe yourself in three words.").await;
        let id = engine.session().await.session_id();

        let reloaded = harness.engine_at(start() + Duration::hours(24));
        let session = reloaded.session().await;
        assert_ne!(session.session_id(), id);
        assert_eq!(session.used_count(), 0);
        assert_eq!(session.start_time(), start() + Duration::hours(24));
    }

    #[tokio::test]
    async fn resumes_session_with_short_text_id() {
        let harness = Harness::new();
        let started = (start() - Duration::seconds(60)).timestamp_millis();
        harness
            .storage
            .save(
                storage_keys::SESSION,
                &format!(
                    r#"{{"usedQuestions":["Describe yourself in three words."],"sessionId":"k3j9x2abc","startTime":{started}}}"#
                ),
            )
            .unwrap();

        let engine = harness.engine_at(start());
        let session = engine.session().await;
        assert_eq!(session.session_id().as_str(), "k3j9x2abc");
        assert_eq!(session.used_count(), 1);
        assert!(session.is_used("Describe yourself in three words."));
        assert_eq!(engine.get_session_stats().await.session_id.as_str(), "k3j9x2abc");
    }

    #[tokio::test]
    async fn corrupt_session_starts_fresh() {
        let harness = Harness::new();
        harness.storage.save(storage_keys::SESSION, "{\"usedQuestions\":").unwrap();

        let engine = harness.engine_at(start());
        assert_eq!(engine.session().await.used_count(), 0);
        let stored = harness.storage.load(storage_keys::SESSION).unwrap().unwrap();
        assert!(serde_json::from_str::<QuestionSession>(&stored).is_ok());
    }

    #[tokio::test]
    async fn wildcard_is_never_marked() {
        let harness = Harness::new();
        let engine = harness.engine_at(start());
        let wildcard = engine.catalog().wildcard().text().to_string();
        engine.mark_question_as_used(&wildcard).await;
        assert_eq!(engine.session().await.used_count(), 0);
    }

    #[tokio::test]
    async fn stats_include_approved_custom_questions() {
        let harness = Harness::new();
        harness
            .custom
            .add(Question::new("Our own group question", GameMode::GroupMode), PlayerId::new(1))
            .await;
        harness
            .custom
            .add(Question::new("Pending date question", GameMode::FirstDate), PlayerId::new(1))
            .await;
        let engine = harness.engine_at(start());

        engine.mark_question_as_used("Our own group question").await;
        let stats = engine.get_session_stats().await;
        let catalog = QuestionCatalog::builtin();

        assert_eq!(stats.total, catalog.len() + 1);
        assert_eq!(stats.used, 1);
        assert_eq!(stats.remaining, catalog.len());
        let group = stats.for_mode(GameMode::GroupMode).unwrap();
        assert_eq!(group.total, catalog.by_mode(GameMode::GroupMode).count() + 1);
        let first_date = stats.for_mode(GameMode::FirstDate).unwrap();
        assert_eq!(first_date.total, 16);

        let deck = engine.get_available_questions(GameMode::GroupMode, None, None).await;
        assert!(!deck.texts().any(|t| t == "Our own group question"));
    }

    #[tokio::test]
    async fn clear_session_resets_and_erases() {
        let harness = Harness::new();
        let engine = harness.engine_at(start());
        engine.mark_question_as_used("Describe yourself in three words.").await;
        let old = engine.session().await.session_id();

        let new = engine.clear_session().await;

        assert_ne!(new, old);
        assert_eq!(engine.session().await.used_count(), 0);
        assert_eq!(harness.storage.load(storage_keys::SESSION).unwrap(), None);
    }

    #[tokio::test]
    async fn mood_config_narrows_group_deck() {
        let harness = Harness::new();
        let engine = harness.engine_at(start());
        let config = SessionConfig::new(SessionMood::Funny, 5);

        let all = engine.get_available_questions(GameMode::GroupMode, None, None).await;
        let funny = engine
            .get_available_questions(GameMode::GroupMode, Some(&config), None)
            .await;
        assert!(!funny.is_empty());
        assert!(funny.len() < all.len());
    }
}
