//! Player-authored question storage.
//!
//! The full collection lives in memory and is rewritten to storage after
//! every mutation. Storage problems never reach callers: a corrupt or
//! unreadable document loads as an empty collection and failed writes are
//! logged.

use std::sync::Arc;

use tokio::sync::RwLock;

use connection_cards_domain::{
    CustomQuestion, CustomQuestionId, CustomQuestionUpdate, GameMode, PlayerId, Question,
};

use crate::infrastructure::ports::{storage_keys, ClockPort, RandomPort, StorageError, StoragePort};

pub struct CustomQuestionStore {
    questions: RwLock<Vec<CustomQuestion>>,
    storage: Arc<dyn StoragePort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl CustomQuestionStore {
    /// Load the persisted collection, starting empty if it is missing or corrupt.
    pub fn load(
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let questions = read_collection(storage.as_ref());
        tracing::debug!(count = questions.len(), "Loaded custom questions");
        Self {
            questions: RwLock::new(questions),
            storage,
            clock,
            random,
        }
    }

    /// Store a new question authored by `author`.
    ///
    /// Group-mode submissions are approved immediately; other modes wait
    /// for [`CustomQuestionUpdate::approve`].
    pub async fn add(&self, question: Question, author: PlayerId) -> CustomQuestion {
        let custom = CustomQuestion::new(
            CustomQuestionId::from_uuid(self.random.gen_uuid()),
            question,
            author,
            self.clock.now(),
        );

        let mut questions = self.questions.write().await;
        questions.push(custom.clone());
        self.persist(&questions);

        tracing::info!(
            id = %custom.id,
            author = %author,
            mode = %custom.mode(),
            approved = custom.approved,
            "Custom question added"
        );
        custom
    }

    /// Returns false when no question has `id`.
    pub async fn remove(&self, id: &CustomQuestionId) -> bool {
        let mut questions = self.questions.write().await;
        let before = questions.len();
        questions.retain(|q| &q.id != id);
        if questions.len() == before {
            return false;
        }
        self.persist(&questions);
        true
    }

    /// Apply a partial update; `None` when no question has `id`.
    pub async fn update(
        &self,
        id: &CustomQuestionId,
        update: CustomQuestionUpdate,
    ) -> Option<CustomQuestion> {
        let mut questions = self.questions.write().await;
        let question = questions.iter_mut().find(|q| &q.id == id)?;
        question.apply(update);
        let updated = question.clone();
        self.persist(&questions);
        Some(updated)
    }

    /// Approved questions, optionally for one mode only
    pub async fn approved_by_mode(&self, mode: Option<GameMode>) -> Vec<CustomQuestion> {
        self.questions
            .read()
            .await
            .iter()
            .filter(|q| q.approved && mode.map_or(true, |m| q.mode() == m))
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<CustomQuestion> {
        self.questions.read().await.clone()
    }

    pub async fn by_author(&self, author: PlayerId) -> Vec<CustomQuestion> {
        self.questions
            .read()
            .await
            .iter()
            .filter(|q| q.author_id == author)
            .cloned()
            .collect()
    }

    /// Drop every question and erase the persisted document.
    pub async fn clear_all(&self) {
        let mut questions = self.questions.write().await;
        questions.clear();
        if let Err(e) = self.storage.remove(storage_keys::CUSTOM_QUESTIONS) {
            tracing::warn!(error = %e, "Failed to erase custom questions");
        }
        tracing::info!("Custom questions cleared");
    }

    fn persist(&self, questions: &[CustomQuestion]) {
        let result = serde_json::to_string(questions)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.save(storage_keys::CUSTOM_QUESTIONS, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, count = questions.len(), "Failed to persist custom questions");
        }
    }
}

fn read_collection(storage: &dyn StoragePort) -> Vec<CustomQuestion> {
    let raw = match storage.load(storage_keys::CUSTOM_QUESTIONS) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read custom questions, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(questions) => questions,
        Err(e) => {
            tracing::warn!(error = %e, "Corrupt custom questions, starting empty");
            Vec::new()
        }
    }
}
