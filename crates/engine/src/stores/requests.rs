//! Per-player topic requests.
//!
//! Requests live only for the lifetime of the process.

use std::sync::Arc;

use tokio::sync::RwLock;

use connection_cards_domain::{PlayerId, PlayerRequest, Question, RequestId, RequestTopic};

use crate::infrastructure::ports::{ClockPort, RandomPort};

pub struct PlayerRequestRegistry {
    requests: RwLock<Vec<PlayerRequest>>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl PlayerRequestRegistry {
    pub fn new(clock: Arc<dyn ClockPort>, random: Arc<dyn RandomPort>) -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
            clock,
            random,
        }
    }

    pub async fn add_request(
        &self,
        player: PlayerId,
        topic: RequestTopic,
        specific_prompt: Option<String>,
    ) -> PlayerRequest {
        let request = PlayerRequest::new(
            RequestId::from_uuid(self.random.gen_uuid()),
            player,
            topic,
            specific_prompt,
            self.clock.now(),
        );
        self.requests.write().await.push(request.clone());
        tracing::info!(id = %request.id, player = %player, topic = %topic, "Topic request added");
        request
    }

    /// Mark a request fulfilled. Returns false when `id` is unknown.
    pub async fn fulfill_request(&self, id: RequestId) -> bool {
        let mut requests = self.requests.write().await;
        match requests.iter_mut().find(|r| r.id == id) {
            Some(request) => {
                request.fulfill();
                true
            }
            None => false,
        }
    }

    pub async fn remove_request(&self, id: RequestId) -> bool {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|r| r.id != id);
        requests.len() != before
    }

    /// Deal up to five topic-matched questions for `request` from `pool`
    pub fn generate_requested_questions(
        &self,
        request: &PlayerRequest,
        pool: &[Question],
    ) -> Vec<Question> {
        let mut pick = |upper: usize| self.random.gen_index(upper);
        let questions = request.requested_questions(pool, &mut pick);
        tracing::debug!(id = %request.id, count = questions.len(), "Generated requested questions");
        questions
    }

    /// The oldest unfulfilled request
    pub async fn next_request_to_fulfill(&self) -> Option<PlayerRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.is_active())
            .min_by_key(|r| r.created_at)
            .cloned()
    }

    /// Unfulfilled requests, optionally for one player
    pub async fn active_requests(&self, player: Option<PlayerId>) -> Vec<PlayerRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.is_active() && player.map_or(true, |p| r.player_id == p))
            .cloned()
            .collect()
    }

    pub async fn player_requests(&self, player: PlayerId) -> Vec<PlayerRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.player_id == player)
            .cloned()
            .collect()
    }

    pub async fn has_active_request(&self, player: PlayerId) -> bool {
        self.requests
            .read()
            .await
            .iter()
            .any(|r| r.is_active() && r.player_id == player)
    }

    pub async fn all(&self) -> Vec<PlayerRequest> {
        self.requests.read().await.clone()
    }

    pub async fn clear_fulfilled(&self) {
        self.requests.write().await.retain(PlayerRequest::is_active);
    }

    pub async fn clear_all(&self) {
        self.requests.write().await.clear();
    }
}
