//! User repository
//!
//! Registration, login, profile reads and partial updates. Passwords are
//! stored and compared as given; hashing is out of scope here.

use crate::db::{Db, DbError};
use crate::models::{RegisterRequest, UpdateProfileRequest, User};

use super::{undefined_column, unique_violation};

/// User repository
pub struct UserRepo<'a> {
    db: &'a Db,
}

impl<'a> UserRepo<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// List all users with their identity fields and avatar, when set.
    ///
    /// Falls back to the avatar-less columns on a schema the bootstrapper
    /// has not migrated yet, so the listing works against legacy rows.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        self.db
            .with_conn(|conn| {
                Box::pin(async move {
                    let full = sqlx::query_as::<_, User>(
                        "SELECT id, username, email, avatar_url FROM users ORDER BY id",
                    )
                    .fetch_all(&mut *conn)
                    .await;

                    match full {
                        Ok(users) => Ok(users),
                        Err(err) if undefined_column(&err) => {
                            let rows: Vec<(i32, String, String)> =
                                sqlx::query_as("SELECT id, username, email FROM users ORDER BY id")
                                    .fetch_all(&mut *conn)
                                    .await?;
                            Ok(rows
                                .into_iter()
                                .map(|(id, username, email)| User {
                                    id,
                                    username,
                                    email,
                                    avatar_url: None,
                                })
                                .collect())
                        }
                        Err(err) => Err(err.into()),
                    }
                })
            })
            .await
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i32) -> Result<User, DbError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, User>(
                        "SELECT id, username, email, avatar_url FROM users WHERE id = $1",
                    )
                    .bind(id)
                    .fetch_optional(&mut *conn)
                    .await?
                    .ok_or(DbError::NotFound {
                        resource: "user",
                        id,
                    })
                })
            })
            .await
    }

    /// Register a new account.
    ///
    /// Conflicts when any existing row matches the username OR the email.
    /// The pre-check picks the message; the unique indexes are what actually
    /// guarantee it under concurrent registration.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, DbError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    let existing: Option<i32> =
                        sqlx::query_scalar("SELECT id FROM users WHERE email = $1 OR username = $2")
                            .bind(&req.email)
                            .bind(&req.username)
                            .fetch_optional(&mut *conn)
                            .await?;
                    if existing.is_some() {
                        return Err(DbError::Conflict("user already exists"));
                    }

                    let id: i32 = sqlx::query_scalar(
                        "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
                    )
                    .bind(&req.username)
                    .bind(&req.email)
                    .bind(&req.password)
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(|err| match unique_violation(&err) {
                        Some(_) => DbError::Conflict("user already exists"),
                        None => DbError::Sqlx(err),
                    })?;

                    Ok(User {
                        id,
                        username: req.username,
                        email: req.email,
                        avatar_url: None,
                    })
                })
            })
            .await
    }

    /// Check credentials and return the account.
    ///
    /// `login` matches against username OR email; the password must match
    /// exactly. Unknown login and wrong password collapse into the same
    /// error so the response does not reveal which one was wrong.
    pub async fn login(&self, login: &str, password: &str) -> Result<User, DbError> {
        let login = login.to_owned();
        let password = password.to_owned();

        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    let row: Option<(i32, String, String, String)> = sqlx::query_as(
                        "SELECT id, username, email, password FROM users \
                         WHERE email = $1 OR username = $1",
                    )
                    .bind(&login)
                    .fetch_optional(&mut *conn)
                    .await?;

                    let (id, username, email, stored_password) =
                        row.ok_or(DbError::InvalidCredentials)?;
                    if stored_password != password {
                        return Err(DbError::InvalidCredentials);
                    }

                    // Best-effort: a missing avatar_url column (schema not yet
                    // migrated) must never block a login.
                    let avatar_url: Option<String> =
                        sqlx::query_scalar("SELECT avatar_url FROM users WHERE id = $1")
                            .bind(id)
                            .fetch_optional(&mut *conn)
                            .await
                            .ok()
                            .flatten()
                            .flatten();

                    Ok(User {
                        id,
                        username,
                        email,
                        avatar_url,
                    })
                })
            })
            .await
    }

    /// Apply a partial profile update and return the resulting row.
    ///
    /// Absent fields keep their stored values (COALESCE). Username and email
    /// changes re-check uniqueness against other rows first; a violation
    /// racing past that check maps to the same conflict by constraint name.
    pub async fn update(&self, id: i32, changes: UpdateProfileRequest) -> Result<User, DbError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    let exists: Option<i32> =
                        sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
                            .bind(id)
                            .fetch_optional(&mut *conn)
                            .await?;
                    if exists.is_none() {
                        return Err(DbError::NotFound {
                            resource: "user",
                            id,
                        });
                    }

                    if let Some(username) = &changes.username {
                        let taken: Option<i32> = sqlx::query_scalar(
                            "SELECT id FROM users WHERE username = $1 AND id != $2",
                        )
                        .bind(username)
                        .bind(id)
                        .fetch_optional(&mut *conn)
                        .await?;
                        if taken.is_some() {
                            return Err(DbError::Conflict("username is already taken"));
                        }
                    }

                    if let Some(email) = &changes.email {
                        let taken: Option<i32> = sqlx::query_scalar(
                            "SELECT id FROM users WHERE email = $1 AND id != $2",
                        )
                        .bind(email)
                        .bind(id)
                        .fetch_optional(&mut *conn)
                        .await?;
                        if taken.is_some() {
                            return Err(DbError::Conflict("email is already taken"));
                        }
                    }

                    if changes.is_empty() {
                        let user: User = sqlx::query_as(
                            "SELECT id, username, email, avatar_url FROM users WHERE id = $1",
                        )
                        .bind(id)
                        .fetch_one(&mut *conn)
                        .await?;
                        return Ok(user);
                    }

                    let user: User = sqlx::query_as(
                        r#"
                        UPDATE users
                        SET username = COALESCE($2, username),
                            email = COALESCE($3, email),
                            avatar_url = COALESCE($4, avatar_url)
                        WHERE id = $1
                        RETURNING id, username, email, avatar_url
                        "#,
                    )
                    .bind(id)
                    .bind(changes.username.as_deref())
                    .bind(changes.email.as_deref())
                    .bind(changes.avatar_url.as_deref())
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(|err| match unique_violation(&err) {
                        Some(constraint) if constraint.contains("username") => {
                            DbError::Conflict("username is already taken")
                        }
                        Some(_) => DbError::Conflict("email is already taken"),
                        None => DbError::Sqlx(err),
                    })?;

                    Ok(user)
                })
            })
            .await
    }
}
