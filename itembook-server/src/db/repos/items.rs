//! Item repository
//!
//! One statement per operation:
//! - list: optional curriculum equality filter, allow-listed ORDER BY
//! - create: INSERT with an application-generated UUID v7 primary key
//! - update/delete: keyed by primary key, zero rows affected is NotFound

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::DbError;
use crate::models::{NewItem, SortKey};

const SELECT_ITEMS: &str = r#"
    SELECT id, category, curriculum, title, link, summary, made_day, updated_day
    FROM items
"#;

/// Item record from database
#[derive(Debug, Clone, FromRow)]
pub struct ItemRecord {
    pub id: Uuid,
    pub category: String,
    pub curriculum: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub made_day: String,
    pub updated_day: Option<DateTime<Utc>>,
}

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List items, optionally restricted to one curriculum.
    ///
    /// `sort` renders only fixed column and direction names, so the ORDER BY
    /// is pushed as SQL while `curriculum` is always bound.
    pub async fn list(
        &self,
        curriculum: Option<&str>,
        sort: SortKey,
    ) -> Result<Vec<ItemRecord>, DbError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_ITEMS);

        if let Some(curriculum) = curriculum {
            query.push(" WHERE curriculum = ").push_bind(curriculum);
        }
        query.push(" ORDER BY ").push(sort);

        let items = query
            .build_query_as::<ItemRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok(items)
    }

    /// Get a single item by primary key.
    pub async fn get(&self, id: Uuid) -> Result<ItemRecord, DbError> {
        let item: Option<ItemRecord> = sqlx::query_as(
            r#"
            SELECT id, category, curriculum, title, link, summary, made_day, updated_day
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        item.ok_or_else(|| not_found(id))
    }

    /// Insert a new item, returning its generated id.
    pub async fn create(&self, item: &NewItem) -> Result<Uuid, DbError> {
        let id = Uuid::now_v7();

        sqlx::query(
            r#"
            INSERT INTO items (id, category, curriculum, title, link, summary, made_day)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(item.category.as_str())
        .bind(&item.curriculum)
        .bind(&item.title)
        .bind(&item.link)
        .bind(&item.summary)
        .bind(&item.made_day)
        .execute(self.pool)
        .await?;

        Ok(id)
    }

    /// Overwrite every caller-writable field and stamp `updated_day`.
    pub async fn update(&self, id: Uuid, item: &NewItem) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET category = $2,
                curriculum = $3,
                title = $4,
                link = $5,
                summary = $6,
                made_day = $7,
                updated_day = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(item.category.as_str())
        .bind(&item.curriculum)
        .bind(&item.title)
        .bind(&item.link)
        .bind(&item.summary)
        .bind(&item.made_day)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Delete one item by primary key.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: Uuid) -> DbError {
    DbError::NotFound {
        resource: "item",
        id: id.to_string(),
    }
}
