//! Account services, `/api/users` handlers, and `/api/login`.
//!
//! Passwords are stored as argon2 PHC strings and verified on login; the
//! plaintext comparison of early revisions is gone. Replies never include
//! the stored hash — see [`UserView`].

use std::sync::Arc;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gradebook_core::{
  model::{self, Role, User},
  statement::{Predicate, Statement},
  store::RecordStore,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, reply::Reply};

// ─── Views and inputs ────────────────────────────────────────────────────────

/// What the API exposes of an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
  pub id:       Option<i64>,
  pub username: String,
  pub role:     Role,
}

impl From<User> for UserView {
  fn from(user: User) -> UserView {
    UserView {
      id:       user.id,
      username: user.username,
      role:     user.role,
    }
  }
}

/// Registration input; the password arrives in the clear and leaves as a
/// hash.
#[derive(Debug, Deserialize)]
pub struct NewUser {
  pub username: String,
  pub password: String,
  #[serde(default = "NewUser::default_role")]
  pub role:     Role,
}

impl NewUser {
  fn default_role() -> Role {
    Role::Teacher
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Produce the argon2 PHC string for `password`.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|err| ApiError::Rejected(format!("unusable password: {err}")))
}

/// Look up one account by username.
pub fn find_user<S: RecordStore>(store: &S, username: &str) -> Result<Option<User>, ApiError> {
  let rows = store
    .execute(Statement::select(
      "users",
      Some(Predicate::new("username", username)),
    ))
    .map_err(ApiError::store)?
    .rows();
  rows
    .first()
    .map(model::from_row)
    .transpose()
    .map_err(ApiError::from)
}

/// All accounts, in insertion order.
pub fn list_users<S: RecordStore>(store: &S) -> Result<Vec<User>, ApiError> {
  let rows = store
    .execute(Statement::select("users", None))
    .map_err(ApiError::store)?
    .rows();
  rows
    .iter()
    .map(model::from_row)
    .collect::<Result<_, _>>()
    .map_err(ApiError::from)
}

/// Register a new account; usernames are unique.
pub fn register_user<S: RecordStore>(store: &S, new: &NewUser) -> Result<(), ApiError> {
  if new.username.trim().is_empty() {
    return Err(ApiError::Rejected("username must not be empty".into()));
  }
  if new.password.is_empty() {
    return Err(ApiError::Rejected("password must not be empty".into()));
  }
  if find_user(store, &new.username)?.is_some() {
    return Err(ApiError::Rejected("username already exists".into()));
  }

  let user = User {
    id:            None,
    username:      new.username.clone(),
    password_hash: hash_password(&new.password)?,
    role:          new.role,
  };
  store
    .execute(Statement::insert("users", model::to_row(&user)?))
    .map_err(ApiError::store)?;
  Ok(())
}

/// Verify credentials. Unknown usernames and wrong passwords are
/// indistinguishable to the caller.
pub fn authenticate<S: RecordStore>(
  store: &S,
  username: &str,
  password: &str,
) -> Result<User, ApiError> {
  let user = find_user(store, username)?.ok_or(ApiError::Unauthorized)?;
  let parsed = PasswordHash::new(&user.password_hash).map_err(|_| ApiError::Unauthorized)?;
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .map_err(|_| ApiError::Unauthorized)?;
  Ok(user)
}

/// Remove one account by surrogate id.
pub fn delete_user<S: RecordStore>(store: &S, id: i64) -> Result<(), ApiError> {
  let removed = store
    .execute(Statement::delete("users", Predicate::new("id", id)))
    .map_err(ApiError::store)?
    .affected();
  if removed == 0 {
    return Err(ApiError::NotFound("user not found".into()));
  }
  Ok(())
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub username: String,
  pub password: String,
}

/// `POST /api/login` — body: `{"username": "...", "password": "..."}`
pub async fn login<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<Reply>, ApiError> {
  let user = authenticate(store.as_ref(), &body.username, &body.password)?;
  Ok(Json(Reply::message_with_data(
    "login successful",
    UserView::from(user),
  )?))
}

/// `GET /api/users`
pub async fn list<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
) -> Result<Json<Reply>, ApiError> {
  let views: Vec<UserView> = list_users(store.as_ref())?
    .into_iter()
    .map(UserView::from)
    .collect();
  Ok(Json(Reply::data(views)?))
}

/// `POST /api/users`
pub async fn create<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Json(new): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
  register_user(store.as_ref(), &new)?;
  Ok((StatusCode::CREATED, Json(Reply::message("user added"))))
}

/// `DELETE /api/users/{id}`
pub async fn delete_one<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Reply>, ApiError> {
  delete_user(store.as_ref(), id)?;
  Ok(Json(Reply::message("user deleted")))
}
