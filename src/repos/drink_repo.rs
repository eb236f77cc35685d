/*
 * Responsibility
 * - drinks CRUD (レシピは JSON テキスト列として保存し、ここで (de)serialize)
 * - 本番は Postgres、DATABASE_URL 無し/テストは in-memory
 */
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

#[derive(Debug, Clone)]
pub struct DrinkRecord {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Generic CRUD over drink records. The store owns the records exclusively;
/// handlers never see the serialized recipe column.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    async fn list(&self) -> Result<Vec<DrinkRecord>, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<DrinkRecord>, RepoError>;

    async fn insert(&self, title: &str, recipe: &[Ingredient]) -> Result<DrinkRecord, RepoError>;

    /// `None` fields are left untouched. Returns `None` for an unknown id.
    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<DrinkRecord>, RepoError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct DrinkRow {
    #[sqlx(rename = "drinkId")]
    drink_id: i64,

    title: String,

    // JSON text, parsed into Vec<Ingredient> on the way out
    recipe: String,

    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl DrinkRow {
    fn into_record(self) -> Result<DrinkRecord, RepoError> {
        let recipe: Vec<Ingredient> = serde_json::from_str(&self.recipe)?;
        Ok(DrinkRecord {
            id: self.drink_id,
            title: self.title,
            recipe,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn list(&self) -> Result<Vec<DrinkRecord>, RepoError> {
        let rows = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT
                "drinkId", title, recipe, "createdAt", "updatedAt"
            FROM drinks
            ORDER BY "drinkId" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DrinkRow::into_record).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<DrinkRecord>, RepoError> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT
                "drinkId", title, recipe, "createdAt", "updatedAt"
            FROM drinks
            WHERE "drinkId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DrinkRow::into_record).transpose()
    }

    async fn insert(&self, title: &str, recipe: &[Ingredient]) -> Result<DrinkRecord, RepoError> {
        let recipe_json = serde_json::to_string(recipe)?;

        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING
                "drinkId", title, recipe, "createdAt", "updatedAt"
            "#,
        )
        .bind(title)
        .bind(recipe_json)
        .fetch_one(&self.pool)
        .await?;

        row.into_record()
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<DrinkRecord>, RepoError> {
        let recipe_json = recipe.map(serde_json::to_string).transpose()?;

        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            UPDATE drinks
            SET
                title = COALESCE($2, title),
                recipe = COALESCE($3, recipe),
                "updatedAt" = now()
            WHERE "drinkId" = $1
            RETURNING
                "drinkId", title, recipe, "createdAt", "updatedAt"
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(recipe_json)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DrinkRow::into_record).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM drinks
            WHERE "drinkId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory store for DATABASE_URL-less runs and tests.
pub struct MemoryDrinkStore {
    inner: RwLock<MemoryInner>,
}

struct MemoryInner {
    next_id: i64,
    rows: BTreeMap<i64, DrinkRecord>,
}

impl MemoryDrinkStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryDrinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list(&self) -> Result<Vec<DrinkRecord>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<DrinkRecord>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn insert(&self, title: &str, recipe: &[Ingredient]) -> Result<DrinkRecord, RepoError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let now = Utc::now();
        let record = DrinkRecord {
            id,
            title: title.to_string(),
            recipe: recipe.to_vec(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(id, record.clone());

        Ok(record)
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<DrinkRecord>, RepoError> {
        let mut inner = self.inner.write().await;

        let Some(record) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = title {
            record.title = title.to_string();
        }
        if let Some(recipe) = recipe {
            record.recipe = recipe.to_vec();
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id).is_some())
    }
}
