//! Player data model.

use crate::points::Points;
use serde::{Deserialize, Serialize};

/// Player ID type. Identities are opaque strings chosen by the caller.
pub type PlayerId = String;

/// Player record as persisted by a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub balance: Points,
}

impl Player {
    /// Create a fresh record with a zero balance.
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            balance: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_empty() {
        let player = Player::new("alice");
        assert_eq!(player.id, "alice");
        assert_eq!(player.balance, 0.0);
    }

    #[test]
    fn serializes_id_and_balance() {
        let player = Player {
            id: "bob".to_string(),
            balance: 12.5,
        };
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json, serde_json::json!({"id": "bob", "balance": 12.5}));

        let back: Player = serde_json::from_value(json).unwrap();
        assert_eq!(back, player);
    }
}
