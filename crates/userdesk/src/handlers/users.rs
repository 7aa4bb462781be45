//! User CRUD handlers.
//!
//! Every handler that touches storage opens its own [`DbSession`] and lets it
//! drop on return, which closes the connection on success, validation failure
//! and error paths alike. Writes run inside an explicit transaction.

use askama::Template;
use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{header::LOCATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::{CookieJar, SignedCookieJar};
use serde::Deserialize;

use userdesk_core::storage::{RepositoryError, UserRepository};
use userdesk_core::user::{validate, User, UserDraft, UserForm, UserId, ValidationErrors};

use super::flash::{push_flash, take_flashes, FlashMessage};
use super::pages::HtmlTemplate;
use crate::{handlers::AppError, state::AppState, storage::DbSession};

/// Where successful writes redirect to.
pub const USERS_PATH: &str = "/users/";

const SAVE_FAILED: &str = "Failed to save user";

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(path = "users/index.html")]
struct IndexTemplate {
    users: Vec<User>,
    search: String,
    messages: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "users/new.html")]
struct NewTemplate {
    user: UserForm,
    errors: ValidationErrors,
}

#[derive(Template)]
#[template(path = "users/edit.html")]
struct EditTemplate {
    id: UserId,
    user: UserForm,
    errors: ValidationErrors,
}

#[derive(Template)]
#[template(path = "users/show.html")]
struct ShowTemplate {
    user: User,
}

/// Query parameters for the user list.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: Option<String>,
}

/// The `{id}` path segment of a user route.
///
/// A segment that is not an integer is rejected through [`AppError`], so it
/// gets the same HTML error page as every other failure.
pub struct UserPath(pub UserId);

impl<S> FromRequestParts<S> for UserPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<UserId>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// `302 Found` redirect to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

async fn find_user(session: &DbSession, id: UserId) -> Result<User, AppError> {
    session
        .repository
        .find(id)
        .await?
        .ok_or_else(|| AppError::from(RepositoryError::user_not_found(id)))
}

/// Saves the draft in its own transaction, rolling back if anything fails.
async fn save_in_transaction(
    session: &DbSession,
    draft: &UserDraft,
) -> Result<UserId, RepositoryError> {
    session.begin().await?;

    let result = match session.repository.save(draft).await {
        Ok(id) => session.commit().await.map(|()| id),
        Err(err) => Err(err),
    };

    if result.is_err() {
        if let Err(rollback_err) = session.rollback().await {
            tracing::warn!(error = %rollback_err, "Rollback failed");
        }
    }

    result
}

// ============================================================================
// List / Search
// ============================================================================

/// List or search users (GET /users/).
///
/// An empty or missing `term` lists everyone. Pending flash messages are
/// shown once and cleared.
pub async fn list_users(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    raw: CookieJar,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let session = state.database.open().await?;

    let term = query.term.unwrap_or_default();
    let users = if term.is_empty() {
        session.repository.get_content().await?
    } else {
        session.repository.get_by_term(&term).await?
    };

    tracing::debug!(count = users.len(), term = %term, "Listed users");

    let (jar, raw, messages) = take_flashes(jar, raw);
    let page = IndexTemplate {
        users,
        search: term,
        messages,
    };

    Ok((jar, raw, HtmlTemplate(page)).into_response())
}

// ============================================================================
// Create
// ============================================================================

/// Blank create form (GET /users/new).
pub async fn new_user() -> impl IntoResponse {
    HtmlTemplate(NewTemplate {
        user: UserForm::blank(),
        errors: ValidationErrors::new(),
    })
}

/// Create a user (POST /users).
///
/// Validation failures and storage failures re-render the form with the
/// submitted values; success redirects to the list with a flash message.
pub async fn create_user(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
    let session = state.database.open().await?;

    let errors = validate(&form);
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "Rejected invalid user form");
        return Ok(HtmlTemplate(NewTemplate { user: form, errors }).into_response());
    }

    match save_in_transaction(&session, &UserDraft::new(form.clone())).await {
        Ok(id) => {
            tracing::info!(user_id = %id, "Created new user");
            let jar = push_flash(jar, FlashMessage::success("User created"));
            Ok((jar, found(USERS_PATH)).into_response())
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to create user");
            let jar = push_flash(jar, FlashMessage::danger(SAVE_FAILED));
            let page = NewTemplate {
                user: form,
                errors: ValidationErrors::database(SAVE_FAILED),
            };
            Ok((jar, HtmlTemplate(page)).into_response())
        }
    }
}

// ============================================================================
// Show / Edit
// ============================================================================

/// User detail page (GET /users/{id}).
pub async fn show_user(
    State(state): State<AppState>,
    UserPath(id): UserPath,
) -> Result<Response, AppError> {
    let session = state.database.open().await?;
    let user = find_user(&session, id).await?;

    Ok(HtmlTemplate(ShowTemplate { user }).into_response())
}

/// Edit form pre-filled with the stored values (GET /users/{id}/edit).
pub async fn edit_user(
    State(state): State<AppState>,
    UserPath(id): UserPath,
) -> Result<Response, AppError> {
    let session = state.database.open().await?;
    let user = find_user(&session, id).await?;

    let page = EditTemplate {
        id: user.id,
        user: UserForm::from(&user),
        errors: ValidationErrors::new(),
    };

    Ok(HtmlTemplate(page).into_response())
}

// ============================================================================
// Update
// ============================================================================

/// Overwrite a user's name and email (POST /users/{id}/patch).
///
/// Validation failures answer 422 with the submitted values re-rendered.
pub async fn update_user(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    UserPath(id): UserPath,
    Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
    let session = state.database.open().await?;
    let user = find_user(&session, id).await?;

    let errors = validate(&form);
    if !errors.is_empty() {
        tracing::debug!(user_id = %id, fields = errors.len(), "Rejected invalid user form");
        let page = EditTemplate {
            id: user.id,
            user: form,
            errors,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, HtmlTemplate(page)).into_response());
    }

    let draft = UserDraft::new(form.clone()).with_id(user.id);
    match save_in_transaction(&session, &draft).await {
        Ok(id) => {
            tracing::info!(user_id = %id, "Updated user");
            let jar = push_flash(jar, FlashMessage::success("User updated"));
            Ok((jar, found(USERS_PATH)).into_response())
        }
        Err(err) => {
            tracing::error!(user_id = %id, error = %err, "Failed to update user");
            let jar = push_flash(jar, FlashMessage::danger(SAVE_FAILED));
            let page = EditTemplate {
                id: user.id,
                user: form,
                errors: ValidationErrors::database(SAVE_FAILED),
            };
            Ok((jar, HtmlTemplate(page)).into_response())
        }
    }
}

// ============================================================================
// Delete
// ============================================================================

/// Delete a user (POST /users/{id}/delete).
///
/// Deleting a user that is already gone still redirects with a success flash.
pub async fn delete_user(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    UserPath(id): UserPath,
) -> Result<Response, AppError> {
    let session = state.database.open().await?;

    session.begin().await?;
    if let Err(err) = session.repository.destroy(id).await {
        if let Err(rollback_err) = session.rollback().await {
            tracing::warn!(error = %rollback_err, "Rollback failed");
        }
        return Err(err.into());
    }
    session.commit().await?;

    tracing::info!(user_id = %id, "Deleted user");

    let jar = push_flash(jar, FlashMessage::success("User deleted"));
    Ok((jar, found(USERS_PATH)).into_response())
}
