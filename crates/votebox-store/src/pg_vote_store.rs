//! `PostgreSQL` implementation of the `VoteStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use votebox_core::error::DomainError;
use votebox_core::repository::VoteStore;
use votebox_core::vote::Vote;

use crate::storage_error;

/// Single-statement upsert keyed by the `(session_id, product_id)` primary
/// key. `xmax` is zero only for a freshly inserted row version, so the
/// statement reports insert-vs-update without a separate read.
const UPSERT_VOTE: &str = r"
INSERT INTO votes (session_id, product_id, rate)
VALUES ($1, $2, $3)
ON CONFLICT (session_id, product_id) DO UPDATE SET rate = EXCLUDED.rate
RETURNING (xmax = 0) AS inserted
";

const SELECT_BY_SESSION: &str =
    "SELECT session_id, product_id, rate FROM votes WHERE session_id = $1 ORDER BY product_id";

const SELECT_BY_PRODUCT: &str =
    "SELECT session_id, product_id, rate FROM votes WHERE product_id = $1 ORDER BY session_id";

const SELECT_ALL: &str =
    "SELECT session_id, product_id, rate FROM votes ORDER BY session_id, product_id";

type VoteRow = (String, String, i32);

fn into_vote((session_id, product_id, rate): VoteRow) -> Vote {
    Vote {
        session_id,
        product_id,
        rate,
    }
}

/// PostgreSQL-backed vote store.
#[derive(Debug, Clone)]
pub struct PgVoteStore {
    pool: PgPool,
}

impl PgVoteStore {
    /// Creates a new `PgVoteStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select(&self, sql: &str, filter: Option<&str>) -> Result<Vec<Vote>, DomainError> {
        let query = sqlx::query_as::<_, VoteRow>(sql);
        let query = match filter {
            Some(value) => query.bind(value),
            None => query,
        };
        let rows = query.fetch_all(&self.pool).await.map_err(storage_error)?;
        Ok(rows.into_iter().map(into_vote).collect())
    }
}

#[async_trait]
impl VoteStore for PgVoteStore {
    async fn upsert_vote(&self, vote: &Vote) -> Result<bool, DomainError> {
        let inserted: bool = sqlx::query_scalar(UPSERT_VOTE)
            .bind(&vote.session_id)
            .bind(&vote.product_id)
            .bind(vote.rate)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        debug!(product_id = %vote.product_id, inserted, "vote upserted");
        Ok(!inserted)
    }

    async fn find_by_session(&self, session_id: &str) -> Result<Vec<Vote>, DomainError> {
        self.select(SELECT_BY_SESSION, Some(session_id)).await
    }

    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Vote>, DomainError> {
        self.select(SELECT_BY_PRODUCT, Some(product_id)).await
    }

    async fn find_all(&self) -> Result<Vec<Vote>, DomainError> {
        self.select(SELECT_ALL, None).await
    }
}
