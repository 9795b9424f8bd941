/**
 * Authorization Policy
 *
 * Owner-only mutation. A caller may change or delete a resource when it is
 * authenticated and its user id equals the resource's recorded owner.
 * An anonymous caller is always reported as `NotAuthenticated`, even for
 * resources it would not own, so it learns nothing about the resource.
 */

use thiserror::Error;

use crate::backend::middleware::auth::AuthOutcome;
use crate::shared::UserId;

/// Why a mutation was refused
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("not authorized")]
    NotAuthorized,
}

/// Check that `outcome` may mutate a resource owned by `owner`.
///
/// Returns the acting user's id on success.
pub fn authorize<'a>(outcome: &'a AuthOutcome, owner: &UserId) -> Result<&'a UserId, PolicyError> {
    let user_id = outcome.user_id().ok_or(PolicyError::NotAuthenticated)?;
    if user_id != owner {
        return Err(PolicyError::NotAuthorized);
    }
    Ok(user_id)
}

/// Boolean form of [`authorize`].
pub fn can_mutate(outcome: &AuthOutcome, owner: &UserId) -> bool {
    authorize(outcome, owner).is_ok()
}
