use async_trait::async_trait;

use crate::user::{User, UserDraft, UserId};

use super::Result;

/// Repository for user operations.
///
/// Implementations run over a connection supplied by the caller and hold no
/// business rules; input is validated before `save` is reached.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets every user in insertion order.
    async fn get_content(&self) -> Result<Vec<User>>;

    /// Gets the users whose name or email contains `term`.
    ///
    /// Callers route an empty term to [`UserRepository::get_content`] instead.
    async fn get_by_term(&self, term: &str) -> Result<Vec<User>>;

    /// Gets a user by its ID, `None` when no such row exists.
    async fn find(&self, id: UserId) -> Result<Option<User>>;

    /// Inserts the draft when it has no ID, otherwise overwrites the row with
    /// that ID. Returns the ID of the persisted row.
    async fn save(&self, draft: &UserDraft) -> Result<UserId>;

    /// Deletes a user by its ID. Deleting a missing row is not an error.
    async fn destroy(&self, id: UserId) -> Result<()>;
}
