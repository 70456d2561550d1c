//! Product catalog service

use shared::{
    normalize_text, validate_sku, CategoryRef, CreateProductInput, Product, UpdateProductInput,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Product service for catalog CRUD
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Product row joined with its category name
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    sku: String,
    description: Option<String>,
    current_stock: i32,
    minimum_stock: i32,
    category_id: Option<Uuid>,
    image_url: Option<String>,
    category_name: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(CategoryRef { id, name }),
            _ => None,
        };

        Product {
            id: row.id,
            name: row.name,
            sku: row.sku,
            description: row.description,
            current_stock: row.current_stock,
            minimum_stock: row.minimum_stock,
            category_id: row.category_id,
            image_url: row.image_url,
            category,
        }
    }
}

const SELECT_PRODUCT: &str = r#"
    SELECT p.id, p.name, p.sku, p.description, p.current_stock, p.minimum_stock,
           p.category_id, p.image_url, c.name AS category_name
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

fn check_sku(sku: &str) -> AppResult<()> {
    validate_sku(sku).map_err(|msg| AppError::invalid_field("sku", msg))
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List products ordered by name, optionally filtered by a search query
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{} ORDER BY p.name", SELECT_PRODUCT))
            .fetch_all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(Product::from)
            .filter(|p| search.map_or(true, |q| p.matches_search(q)))
            .collect())
    }

    /// Get a product by id
    pub async fn get(&self, product_id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, ProductRow>(&format!("{} WHERE p.id = $1", SELECT_PRODUCT))
            .bind(product_id)
            .fetch_optional(&self.db)
            .await?
            .map(Product::from)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Create a product
    pub async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;
        check_sku(&input.sku)?;

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO products (name, sku, description, current_stock, minimum_stock, category_id, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.sku)
        .bind(normalize_text(input.description))
        .bind(input.current_stock)
        .bind(input.minimum_stock)
        .bind(input.category_id)
        .bind(normalize_text(input.image_url))
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "sku", "Category"))?;

        tracing::info!(product_id = %id, sku = %input.sku, "Product created");
        self.get(id).await
    }

    /// Update a product; absent fields keep their stored value
    pub async fn update(&self, product_id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        input.validate()?;
        if let Some(sku) = &input.sku {
            check_sku(sku)?;
        }

        let existing = self.get(product_id).await?;
        let updated = input.apply_to(&existing);

        sqlx::query(
            r#"
            UPDATE products
            SET name = $1, sku = $2, description = $3, current_stock = $4,
                minimum_stock = $5, category_id = $6, image_url = $7, updated_at = NOW()
            WHERE id = $8
            "#,
        )
        .bind(updated.name.trim())
        .bind(&updated.sku)
        .bind(normalize_text(updated.description))
        .bind(updated.current_stock)
        .bind(updated.minimum_stock)
        .bind(updated.category_id)
        .bind(normalize_text(updated.image_url))
        .bind(product_id)
        .execute(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "sku", "Category"))?;

        tracing::info!(product_id = %product_id, "Product updated");
        self.get(product_id).await
    }

    /// Delete a product and, by cascade, its transactions and supplier links
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        tracing::info!(product_id = %product_id, "Product deleted");
        Ok(())
    }
}
