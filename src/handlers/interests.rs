//! Interest handling logic
//!
//! Besides listing and creating interests, this resolves an interest name to
//! the names of every user holding it: interest lookup, then its join rows,
//! then one user-name lookup per join row. The user lookups run as a bounded
//! concurrent gather and fail as a whole if any single lookup fails.

use crate::db::Database;
use crate::error::{CoreError, Result};
use futures::future::try_join_all;
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// A stored interest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: i64,
    pub name: String,
}

/// Default bound on concurrent user-name lookups per resolve request
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Interest handler for business logic
#[derive(Clone)]
pub struct InterestHandler {
    db: Arc<Database>,
    max_concurrent_lookups: usize,
}

impl InterestHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_concurrency(db, DEFAULT_MAX_CONCURRENT_LOOKUPS)
    }

    /// Create a handler whose resolve fan-out runs at most `max_concurrent_lookups` lookups at once
    pub fn with_concurrency(db: Arc<Database>, max_concurrent_lookups: usize) -> Self {
        InterestHandler {
            db,
            max_concurrent_lookups: max_concurrent_lookups.max(1),
        }
    }

    /// All interests in store order
    pub async fn list(&self) -> Result<Vec<Interest>> {
        self.db
            .with_conn(|conn| {
                let mut stmt = conn.prepare("SELECT id, name FROM interests ORDER BY id")?;
                let interests = stmt
                    .query_map([], |row| {
                        Ok(Interest {
                            id: row.get(0)?,
                            name: row.get(1)?,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(interests)
            })
            .await
    }

    /// Names of all users holding the interest called `name`
    ///
    /// The lookup uses `name` exactly as given; stored names are lowercase, so
    /// a mixed-case query does not match.
    pub async fn resolve_users(&self, name: &str) -> Result<Vec<String>> {
        let lookup = name.to_string();
        let interest_id: Option<i64> = self
            .db
            .with_conn(move |conn| {
                Ok(conn
                    .query_row("SELECT id FROM interests WHERE name = ?", [&lookup], |row| {
                        row.get(0)
                    })
                    .optional()?)
            })
            .await?;

        let Some(interest_id) = interest_id else {
            return Err(CoreError::NotFound(
                "Interest",
                format!("Interest {} is not valid.", name),
            ));
        };

        let user_ids: Vec<i64> = self
            .db
            .with_conn(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT user_id FROM user_interests WHERE interest_id = ? ORDER BY id",
                )?;
                let ids = stmt
                    .query_map([interest_id], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(ids)
            })
            .await?;

        tracing::debug!(
            "Resolving {} users for interest {} ({})",
            user_ids.len(),
            interest_id,
            name
        );

        let db = &self.db;
        gather_bounded(user_ids, self.max_concurrent_lookups, |user_id| {
            let db = db.clone();
            async move {
                db.with_conn(move |conn| {
                    // A dangling user_id surfaces as QueryReturnedNoRows and fails the request
                    Ok(conn.query_row("SELECT name FROM users WHERE id = ?", [user_id], |row| {
                        row.get::<_, String>(0)
                    })?)
                })
                .await
            }
        })
        .await
    }

    /// Store a new interest under its lowercased name and return its id
    pub async fn create(&self, name: &str) -> Result<i64> {
        let name = name.to_lowercase();
        let id = self
            .db
            .with_conn(move |conn| {
                conn.execute("INSERT INTO interests (name) VALUES (?)", [&name])?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| e.into_conflict("That interest already exists"))?;

        tracing::info!("Created interest {}", id);
        Ok(id)
    }
}

/// Run `lookup` for every item with at most `limit` futures in flight
///
/// Results keep input order. The first error fails the whole gather.
async fn gather_bounded<I, F, Fut, T>(items: I, limit: usize, lookup: F) -> Result<Vec<T>>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let lookups = items.into_iter().map(|item| {
        let sem = semaphore.clone();
        let pending = lookup(item);
        async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|e| CoreError::Task(e.to_string()))?;
            pending.await
        }
    });

    try_join_all(lookups).await
}
