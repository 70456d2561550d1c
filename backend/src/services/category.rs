//! Product category service

use shared::{normalize_text, Category, CategoryInput};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

impl CategoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List categories ordered by name
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub async fn create(&self, input: CategoryInput) -> AppResult<Category> {
        input.validate()?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(input.name.trim())
        .bind(normalize_text(input.description))
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "name", "Category"))?;

        tracing::info!(category_id = %row.id, "Category created");
        Ok(row.into())
    }

    pub async fn update(&self, category_id: Uuid, input: CategoryInput) -> AppResult<Category> {
        input.validate()?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories SET name = $1, description = $2
            WHERE id = $3
            RETURNING id, name, description
            "#,
        )
        .bind(input.name.trim())
        .bind(normalize_text(input.description))
        .bind(category_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "name", "Category"))?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        tracing::info!(category_id = %category_id, "Category updated");
        Ok(row.into())
    }

    /// Delete a category; its products become uncategorised
    pub async fn delete(&self, category_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        tracing::info!(category_id = %category_id, "Category deleted");
        Ok(())
    }
}
