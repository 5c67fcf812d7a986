use crate::domain::card::{CardPerformance, DueCard};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};

#[derive(Debug, sqlx::FromRow)]
struct DueCardRow {
    id: i64,
    flds: String,
    last_interval: Option<i64>,
    ease: Option<i64>,
    flags: Option<i64>,
}

impl From<DueCardRow> for DueCard {
    fn from(row: DueCardRow) -> Self {
        let performance = match (row.last_interval, row.ease, row.flags) {
            (Some(last_interval), Some(ease), Some(flags)) => Some(CardPerformance {
                last_interval,
                ease,
                flags,
            }),
            _ => None,
        };
        DueCard::new(row.id, &row.flds, performance)
    }
}

/// The due-card query for one collection day.
///
/// Built once per run and borrowed by the row stream, which keeps the
/// statement text alive while rows are consumed.
#[derive(Debug, Clone)]
pub struct DueQuery {
    sql: String,
    count_sql: String,
    day: i64,
    deck_ids: Vec<i64>,
}

impl DueQuery {
    pub fn new(day: i64, deck_ids: &[i64], include_performance: bool) -> Self {
        let deck_filter = if deck_ids.is_empty() {
            String::new()
        } else {
            let placeholders = vec!["?"; deck_ids.len()].join(", ");
            format!("c.did IN ({}) AND ", placeholders)
        };

        // Review cards only store the collection day in `due`; the latest
        // revlog entry per card carries interval and ease.
        let sql = if include_performance {
            format!(
                r#"
                SELECT c.id AS id, n.flds AS flds, r.lastIvl AS last_interval, r.ease AS ease, c.flags AS flags
                FROM cards c
                JOIN notes n ON c.nid = n.id
                JOIN (SELECT cid, MAX(id) AS max_id FROM revlog GROUP BY cid) AS x ON c.id = x.cid
                JOIN revlog r ON x.cid = r.cid AND x.max_id = r.id
                WHERE {}c.due = ?
                ORDER BY c.flags DESC, r.ease ASC
                "#,
                deck_filter
            )
        } else {
            format!(
                r#"
                SELECT c.id AS id, n.flds AS flds, NULL AS last_interval, NULL AS ease, NULL AS flags
                FROM cards c
                JOIN notes n ON c.nid = n.id
                WHERE {}c.due = ?
                "#,
                deck_filter
            )
        };
        let count_sql = format!("SELECT COUNT(*) FROM ({})", sql);

        Self {
            sql,
            count_sql,
            day,
            deck_ids: deck_ids.to_vec(),
        }
    }

    pub fn day(&self) -> i64 {
        self.day
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

pub struct CardRepository {
    pool: DbPool,
}

impl CardRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Creation time of the collection (`col.crt`), in unix seconds
    pub async fn collection_created_at(&self) -> AppResult<i64> {
        let crt = sqlx::query_scalar::<_, i64>("SELECT crt FROM col")
            .fetch_one(&self.pool)
            .await?;
        Ok(crt)
    }

    /// Current unix time according to the store's own clock
    pub async fn current_time(&self) -> AppResult<i64> {
        let now = sqlx::query_scalar::<_, i64>("SELECT CAST(strftime('%s', 'now') AS INTEGER)")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }

    pub async fn count_due(&self, query: &DueQuery) -> AppResult<i64> {
        let mut count = sqlx::query_scalar::<_, i64>(&query.count_sql);
        for deck_id in &query.deck_ids {
            count = count.bind(*deck_id);
        }
        let total = count.bind(query.day).fetch_one(&self.pool).await?;
        Ok(total)
    }

    /// Stream due cards in query order. The stream holds the connection
    /// until it is dropped.
    pub fn fetch_due<'a>(&'a self, query: &'a DueQuery) -> BoxStream<'a, AppResult<DueCard>> {
        let mut rows = sqlx::query_as::<_, DueCardRow>(&query.sql);
        for deck_id in &query.deck_ids {
            rows = rows.bind(*deck_id);
        }
        rows.bind(query.day)
            .fetch(&self.pool)
            .map_ok(DueCard::from)
            .map_err(AppError::from)
            .boxed()
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
