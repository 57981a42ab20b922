//! Turn and round state
//!
//! A round walks a dealt deck one card at a time while seats take turns in
//! order. Each player holds a small allowance of wildcards that swap the
//! card on the table for the catalog's free-question sentinel.

use std::collections::HashMap;

use crate::catalog::INITIAL_WILDCARDS;
use crate::entities::{Player, Question};
use crate::error::DomainError;
use crate::ids::PlayerId;
use crate::selection::Deck;
use crate::types::GameMode;

#[derive(Debug, Clone, PartialEq)]
pub struct GameRound {
    mode: GameMode,
    players: Vec<Player>,
    questions: Vec<Question>,
    repeats: bool,
    question_index: usize,
    player_index: usize,
    wildcards: HashMap<PlayerId, u8>,
}

impl GameRound {
    /// Start a round over `deck`. At least one player is required.
    pub fn new(deck: Deck, players: Vec<Player>) -> Result<Self, DomainError> {
        if players.is_empty() {
            return Err(DomainError::validation("a round needs at least one player"));
        }
        let wildcards = players
            .iter()
            .map(|player| (player.id, INITIAL_WILDCARDS))
            .collect();
        Ok(Self {
            mode: deck.mode,
            players,
            questions: deck.questions,
            repeats: deck.repeats,
            question_index: 0,
            player_index: 0,
            wildcards,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Whether this round was dealt from an exhausted pool
    pub fn is_repeat_deck(&self) -> bool {
        self.repeats
    }

    pub fn deck_len(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based position of the card on the table
    pub fn position(&self) -> usize {
        self.question_index
    }

    /// The card on the table, or `None` once the deck is spent
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.question_index)
    }

    pub fn current_player(&self) -> &Player {
        // `new` guarantees a non-empty table and the index wraps modulo len.
        &self.players[self.player_index]
    }

    pub fn is_finished(&self) -> bool {
        self.question_index >= self.questions.len()
    }

    /// Move to the next card and the next seat
    pub fn advance(&mut self) {
        if self.is_finished() {
            return;
        }
        self.question_index += 1;
        self.player_index = (self.player_index + 1) % self.players.len();
    }

    pub fn wildcards_left(&self, player: PlayerId) -> u8 {
        self.wildcards.get(&player).copied().unwrap_or(0)
    }

    /// Swap the card on the table for `wildcard`, spending one of the
    /// current player's wildcards.
    pub fn use_wildcard(&mut self, wildcard: &Question) -> Result<&Question, DomainError> {
        let player = self.current_player().id;

        let current = self
            .questions
            .get(self.question_index)
            .ok_or_else(|| DomainError::constraint("the deck is finished"))?;
        if current.is_wildcard() {
            return Err(DomainError::constraint("the current card is already a wildcard"));
        }

        let left = self
            .wildcards
            .get_mut(&player)
            .ok_or_else(|| DomainError::not_found("Player", player.to_string()))?;
        if *left == 0 {
            return Err(DomainError::constraint(format!(
                "player {} has no wildcards left",
                player
            )));
        }
        *left -= 1;

        let slot = &mut self.questions[self.question_index];
        *slot = wildcard.clone();
        Ok(&*slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WILDCARD_TEXT;

    fn deck(n: usize) -> Deck {
        Deck {
            mode: GameMode::GroupMode,
            questions: (0..n)
                .map(|i| Question::new(format!("Question {i}"), GameMode::GroupMode))
                .collect(),
            repeats: false,
        }
    }

    fn round(n: usize) -> GameRound {
        GameRound::new(deck(n), Player::seat_all(["Ana", "Ben", "Cy"])).expect("round")
    }

    #[test]
    fn test_requires_players() {
        let err = GameRound::new(deck(3), vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_turns_rotate_round_robin() {
        let mut round = round(5);
        let seats: Vec<u32> = (0..5)
            .map(|_| {
                let seat = round.current_player().id.seat();
                round.advance();
                seat
            })
            .collect();
        assert_eq!(seats, vec![1, 2, 3, 1, 2]);
        assert!(round.is_finished());
        assert!(round.current_question().is_none());
    }

    #[test]
    fn test_advance_past_end_is_noop() {
        let mut round = round(1);
        round.advance();
        round.advance();
        assert_eq!(round.position(), 1);
    }

    #[test]
    fn test_wildcard_replaces_current_card() {
        let mut round = round(4);
        let wildcard = Question::wildcard(WILDCARD_TEXT);

        let shown = round.use_wildcard(&wildcard).expect("wildcard").clone();
        assert!(shown.is_wildcard());
        assert_eq!(round.wildcards_left(PlayerId::new(1)), INITIAL_WILDCARDS - 1);
        assert_eq!(round.wildcards_left(PlayerId::new(2)), INITIAL_WILDCARDS);

        let again = round.use_wildcard(&wildcard).unwrap_err();
        assert!(matches!(again, DomainError::Constraint(_)));
    }

    #[test]
    fn test_wildcards_run_out() {
        let mut round = GameRound::new(deck(10), Player::seat_all(["Solo"])).expect("round");
        let wildcard = Question::wildcard(WILDCARD_TEXT);
        for _ in 0..INITIAL_WILDCARDS {
            round.use_wildcard(&wildcard).expect("wildcard");
            round.advance();
        }
        assert_eq!(round.wildcards_left(PlayerId::new(1)), 0);
        let err = round.use_wildcard(&wildcard).unwrap_err();
        assert!(err.to_string().contains("no wildcards left"));
    }

    #[test]
    fn test_wildcard_on_finished_deck_fails() {
        let mut round = round(0);
        assert!(round.is_finished());
        let err = round.use_wildcard(&Question::wildcard(WILDCARD_TEXT)).unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
    }
}
