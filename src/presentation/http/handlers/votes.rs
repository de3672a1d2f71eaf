use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::voting::{outcome::VoteOutcome, repository::VoteRepository},
    presentation::http::{errors::AppError, middleware::user::require_user_id, state::AppState},
};

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub item_id: Uuid,
    pub created: bool,
    pub vote_count: i32,
    pub message: String,
}

/// A repeated vote is a success, not an error: the response reports the
/// standing tally and `created: false`.
fn vote_response(outcome: VoteOutcome) -> VoteResponse {
    let message = if outcome.created {
        format!("You voted for {}.", outcome.item_title)
    } else {
        format!("You already voted for {}.", outcome.item_title)
    };
    VoteResponse {
        item_id: outcome.item_id,
        created: outcome.created,
        vote_count: outcome.vote_count,
        message,
    }
}

pub async fn vote_movie(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<VoteResponse>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;
    let outcome = state.vote_repo.cast_movie_vote(user_id, id).await?;
    if outcome.created {
        tracing::info!(user_id = %user_id, movie_id = %id, "movie vote recorded");
    }
    Ok(Json(vote_response(outcome)))
}

pub async fn vote_actor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<VoteResponse>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;
    let outcome = state.vote_repo.cast_actor_vote(user_id, id).await?;
    if outcome.created {
        tracing::info!(user_id = %user_id, actor_id = %id, "actor vote recorded");
    }
    Ok(Json(vote_response(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(created: bool, vote_count: i32) -> VoteOutcome {
        VoteOutcome {
            item_id: Uuid::now_v7(),
            item_title: "Dune".to_string(),
            created,
            vote_count,
        }
    }

    #[test]
    fn first_vote_reports_created_and_the_new_tally() {
        let resp = vote_response(outcome(true, 1));
        assert!(resp.created);
        assert_eq!(resp.vote_count, 1);
        assert_eq!(resp.message, "You voted for Dune.");
    }

    #[test]
    fn repeated_vote_is_a_no_op_with_the_standing_tally() {
        let resp = vote_response(outcome(false, 1));
        assert!(!resp.created);
        assert_eq!(resp.vote_count, 1);
        assert_eq!(resp.message, "You already voted for Dune.");
    }

    #[test]
    fn response_carries_the_item_id_and_count_through() {
        let o = outcome(true, 41);
        let id = o.item_id;
        let resp = vote_response(o);
        assert_eq!(resp.item_id, id);
        assert_eq!(resp.vote_count, 41);
    }
}
