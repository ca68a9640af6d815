//! Friendship edge definitions.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Status of a directed friendship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    /// Request sent, not reciprocated yet.
    #[default]
    Pending,
    /// Both users added each other.
    Confirmed,
}

impl FriendshipStatus {
    /// Row id of this status in the `friendship_status` table.
    pub fn id(self) -> i64 {
        match self {
            FriendshipStatus::Pending => 1,
            FriendshipStatus::Confirmed => 2,
        }
    }

    /// Looks up a status by its row id.
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(FriendshipStatus::Pending),
            2 => Some(FriendshipStatus::Confirmed),
            _ => None,
        }
    }

    /// Name stored in the `friendship_status` table.
    pub fn as_str(self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "PENDING",
            FriendshipStatus::Confirmed => "CONFIRMED",
        }
    }
}

/// A directed friendship edge from `user_id` to `friend_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friendship {
    /// User who sent the request.
    pub user_id: UserId,
    /// User the request was sent to.
    pub friend_id: UserId,
    /// Whether the reverse edge exists too.
    pub status: FriendshipStatus,
}

impl Friendship {
    /// Creates a new pending edge.
    pub fn pending(user_id: UserId, friend_id: UserId) -> Self {
        Self {
            user_id,
            friend_id,
            status: FriendshipStatus::Pending,
        }
    }

    /// Returns true if the friendship has been reciprocated.
    pub fn is_confirmed(&self) -> bool {
        self.status == FriendshipStatus::Confirmed
    }
}
