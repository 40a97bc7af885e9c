//! Favorite / unfavorite / retweet from the timeline.
//!
//! These are fire-and-report: the API call either works or a short error is
//! posted to the status line. Nothing is returned to the caller.

use crate::status::StatusSender;
use thiserror::Error;

/// Numeric post id as delivered by the timeline API.
pub type PostId = i64;

/// Failure reported by the social API client.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SocialError(pub String);

/// The subset of the social API the timeline view calls directly.
pub trait SocialActionClient {
    fn favorite(&self, id: PostId) -> Result<(), SocialError>;
    fn unfavorite(&self, id: PostId) -> Result<(), SocialError>;
    fn retweet(&self, id: PostId) -> Result<(), SocialError>;
}

/// Which action failed, as shown on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialAction {
    Favorite,
    Unfavorite,
    Retweet,
}

impl SocialAction {
    pub fn error_message(self) -> &'static str {
        match self {
            SocialAction::Favorite => "Err:Favorite",
            SocialAction::Unfavorite => "Err:Unfavorite",
            SocialAction::Retweet => "Err:Retweet",
        }
    }

    fn call(self, client: &dyn SocialActionClient, id: PostId) -> Result<(), SocialError> {
        match self {
            SocialAction::Favorite => client.favorite(id),
            SocialAction::Unfavorite => client.unfavorite(id),
            SocialAction::Retweet => client.retweet(id),
        }
    }
}

/// Run `action` on post `id`, posting a status message if it fails.
pub fn perform(
    action: SocialAction,
    client: &dyn SocialActionClient,
    status: &StatusSender,
    id: PostId,
) {
    if let Err(e) = action.call(client, id) {
        log::warn!("{:?} on post {} failed: {}", action, id, e);
        status.set(action.error_message());
    }
}

pub fn favorite_post(client: &dyn SocialActionClient, status: &StatusSender, id: PostId) {
    perform(SocialAction::Favorite, client, status, id);
}

pub fn unfavorite_post(client: &dyn SocialActionClient, status: &StatusSender, id: PostId) {
    perform(SocialAction::Unfavorite, client, status, id);
}

pub fn retweet_post(client: &dyn SocialActionClient, status: &StatusSender, id: PostId) {
    perform(SocialAction::Retweet, client, status, id);
}
