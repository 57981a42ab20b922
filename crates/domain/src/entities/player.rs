//! Players seated at the table

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Seat players in order, numbering them from 1
    pub fn seat_all<I, S>(names: I) -> Vec<Player>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .zip(1u32..)
            .map(|(name, seat)| Player::new(PlayerId::new(seat), name))
            .collect()
    }

    /// The two-seat table used by the date modes
    pub fn default_pair() -> Vec<Player> {
        Self::seat_all(["Player 1", "Player 2"])
    }
}
