use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of casting a vote. `created` is false when the (user, item) pair
/// already had a vote row, in which case the counter was left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub item_id: Uuid,
    pub item_title: String,
    pub created: bool,
    pub vote_count: i32,
}
