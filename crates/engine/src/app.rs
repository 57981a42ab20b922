//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use connection_cards_domain::{
    DomainError, GameMode, GameRound, InteractionKind, KeywordClassifier, Player, PlayerRequest,
    Question, QuestionCatalog, SessionConfig, SessionEnergy, SessionId, SessionStats,
};

use crate::infrastructure::ports::{ClockPort, RandomPort, StoragePort};
use crate::stores::{CustomQuestionStore, PlayerRequestRegistry};
use crate::use_cases::{EnergyMonitor, QuestionSelectionEngine};

/// Main application state.
///
/// Owns every stateful component for one device. Built once per process and
/// handed to whatever drives the game.
pub struct App {
    pub catalog: Arc<QuestionCatalog>,
    pub custom_questions: Arc<CustomQuestionStore>,
    pub requests: Arc<PlayerRequestRegistry>,
    pub selection: Arc<QuestionSelectionEngine>,
    pub energy: EnergyMonitor,
}

/// What happened when a turn was completed
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// The card that was answered
    pub answered: Question,
    pub energy: SessionEnergy,
    /// No cards are left in the round
    pub finished: bool,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// The energy monitor runs without a timer; see [`App::with_energy_timer`].
    pub fn new(
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let energy = EnergyMonitor::new(clock.clone());
        Self::compose(storage, clock, random, energy)
    }

    /// Like [`App::new`], with energy recomputed every `tick`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_energy_timer(
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        tick: Duration,
    ) -> Self {
        let energy = EnergyMonitor::start(clock.clone(), tick);
        Self::compose(storage, clock, random, energy)
    }

    fn compose(
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        energy: EnergyMonitor,
    ) -> Self {
        let catalog = Arc::new(QuestionCatalog::builtin());
        let custom_questions = Arc::new(CustomQuestionStore::load(
            storage.clone(),
            clock.clone(),
            random.clone(),
        ));
        let requests = Arc::new(PlayerRequestRegistry::new(clock.clone(), random.clone()));
        let selection = Arc::new(QuestionSelectionEngine::load(
            catalog.clone(),
            custom_questions.clone(),
            Arc::new(KeywordClassifier::new()),
            storage,
            clock,
            random,
        ));

        Self {
            catalog,
            custom_questions,
            requests,
            selection,
            energy,
        }
    }

    /// Deal a round for `mode` at the current energy level.
    pub async fn start_round(
        &self,
        mode: GameMode,
        players: Vec<Player>,
        config: &SessionConfig,
    ) -> Result<GameRound, DomainError> {
        let level = self.energy.level().await;
        let deck = self
            .selection
            .get_available_questions(mode, Some(config), Some(level))
            .await;
        tracing::info!(
            mode = %mode,
            mood = %config.mood(),
            level,
            count = deck.len(),
            repeats = deck.repeats,
            "Round started"
        );
        GameRound::new(deck, players)
    }

    /// The current player answered the card on the table.
    ///
    /// Marks the card used, feeds the answer time to the energy monitor and
    /// moves to the next card and player. `None` when the round is over.
    pub async fn complete_turn(
        &self,
        round: &mut GameRound,
        response_time: Option<Duration>,
    ) -> Option<TurnOutcome> {
        let answered = round.current_question()?.clone();
        self.selection.mark_question_as_used(answered.text()).await;

        let response_time_ms =
            response_time.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        let energy = self
            .energy
            .record_interaction(InteractionKind::QuestionAnswered { response_time_ms })
            .await;

        round.advance();
        Some(TurnOutcome {
            answered,
            energy,
            finished: round.is_finished(),
        })
    }

    /// Swap the card on the table for the wildcard.
    pub async fn play_wildcard(&self, round: &mut GameRound) -> Result<Question, DomainError> {
        let player = round.current_player().id;
        let wildcard = round.use_wildcard(self.catalog.wildcard())?.clone();
        self.energy.record_interaction(InteractionKind::WildcardUsed).await;
        tracing::info!(
            player = %player,
            left = round.wildcards_left(player),
            "Wildcard played"
        );
        Ok(wildcard)
    }

    /// Manual +1 / -1 energy adjustment
    pub async fn adjust_energy(&self, delta: i32) -> SessionEnergy {
        self.energy.step(delta).await
    }

    pub async fn session_stats(&self) -> SessionStats {
        self.selection.get_session_stats().await
    }

    pub async fn clear_session(&self) -> SessionId {
        self.selection.clear_session().await
    }

    /// Fulfil the oldest open topic request, dealing its questions from the
    /// catalog plus approved custom questions.
    pub async fn fulfill_next_request(&self) -> Option<(PlayerRequest, Vec<Question>)> {
        let request = self.requests.next_request_to_fulfill().await?;

        let mut pool: Vec<Question> = self.catalog.all_questions().to_vec();
        pool.extend(
            self.custom_questions
                .approved_by_mode(None)
                .await
                .into_iter()
                .map(|c| c.question),
        );

        let questions = self.requests.generate_requested_questions(&request, &pool);
        self.requests.fulfill_request(request.id).await;
        Some((request, questions))
    }

    /// Stop background work
    pub fn shutdown(&self) {
        self.energy.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SystemRandom};
    use crate::infrastructure::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};
    use connection_cards_domain::{PlayerId, RequestTopic, INITIAL_WILDCARDS};

    fn app() -> App {
        App::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap())),
            Arc::new(SystemRandom::new()),
        )
    }

    #[tokio::test]
    async fn turns_mark_questions_and_feed_energy() {
        let app = app();
        let mut round = app
            .start_round(GameMode::SecondDate, Player::default_pair(), &SessionConfig::default())
            .await
            .unwrap();
        let first = round.current_question().unwrap().text().to_string();

        let outcome = app
            .complete_turn(&mut round, Some(Duration::from_secs(12)))
            .await
            .unwrap();

        assert_eq!(outcome.answered.text(), first);
        assert!(!outcome.finished);
        assert_eq!(round.current_player().id, PlayerId::new(2));
        assert!(app.selection.session().await.is_used(&first));
        assert_eq!(app.energy.metrics().await.questions_answered, 1);
        assert_eq!(app.energy.metrics().await.average_response_time, 12_000.0);
    }

    #[tokio::test]
    async fn wildcards_are_limited_and_not_marked_used() {
        let app = app();
        let mut round = app
            .start_round(GameMode::GroupMode, Player::seat_all(["Solo"]), &SessionConfig::default())
            .await
            .unwrap();

        for _ in 0..INITIAL_WILDCARDS {
            let card = app.play_wildcard(&mut round).await.unwrap();
            assert!(card.is_wildcard());
            app.complete_turn(&mut round, None).await.unwrap();
        }
        assert!(app.play_wildcard(&mut round).await.is_err());

        assert_eq!(app.energy.metrics().await.wildcard_usage, u32::from(INITIAL_WILDCARDS));
        assert_eq!(app.session_stats().await.used, 0);
    }

    #[tokio::test]
    async fn finished_round_completes_no_more_turns() {
        let app = app();
        let mut round = app
            .start_round(GameMode::ThirdDate, Player::default_pair(), &SessionConfig::default())
            .await
            .unwrap();
        let deck_len = round.deck_len();

        let mut last = None;
        while let Some(outcome) = app.complete_turn(&mut round, None).await {
            last = Some(outcome);
        }
        assert!(last.unwrap().finished);
        assert_eq!(
            app.session_stats().await.for_mode(GameMode::ThirdDate).unwrap().used,
            deck_len
        );
    }

    #[tokio::test]
    async fn next_request_is_fulfilled_with_questions() {
        let app = app();
        app.requests
            .add_request(PlayerId::new(1), RequestTopic::Fun, Some("Ask me about karaoke".into()))
            .await;

        let (request, questions) = app.fulfill_next_request().await.unwrap();
        assert_eq!(questions[0].text(), "Ask me about karaoke");
        assert!(!app.requests.has_active_request(request.player_id).await);
        assert!(app.fulfill_next_request().await.is_none());
    }

    #[tokio::test]
    async fn adjust_energy_steps_level() {
        let app = app();
        assert_eq!(app.adjust_energy(1).await.level, 6);
        assert_eq!(app.adjust_energy(-1).await.level, 5);
    }
}
