//! Supplier service with product links

use rust_decimal::Decimal;
use shared::{
    normalize_text, validate_unit_price, CreateSupplierInput, LinkProductInput, LinkedProduct,
    Product, ProductSupplier, Supplier, UpdateSupplierInput,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Supplier service
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Supplier row
#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    notes: Option<String>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            notes: row.notes,
        }
    }
}

/// Link row joined with the linked product
#[derive(Debug, FromRow)]
struct LinkedProductRow {
    supplier_id: Uuid,
    product_id: Uuid,
    unit_price: Option<Decimal>,
    lead_time_days: Option<i32>,
    name: String,
    sku: String,
    description: Option<String>,
    current_stock: i32,
    minimum_stock: i32,
    category_id: Option<Uuid>,
    image_url: Option<String>,
}

impl From<LinkedProductRow> for LinkedProduct {
    fn from(row: LinkedProductRow) -> Self {
        LinkedProduct {
            link: ProductSupplier {
                supplier_id: row.supplier_id,
                product_id: row.product_id,
                unit_price: row.unit_price,
                lead_time_days: row.lead_time_days,
            },
            product: Product {
                id: row.product_id,
                name: row.name,
                sku: row.sku,
                description: row.description,
                current_stock: row.current_stock,
                minimum_stock: row.minimum_stock,
                category_id: row.category_id,
                image_url: row.image_url,
                category: None,
            },
        }
    }
}

impl SupplierService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List suppliers ordered by name, optionally filtered by a search query
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, email, phone, address, notes FROM suppliers ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(Supplier::from)
            .filter(|s| search.map_or(true, |q| s.matches_search(q)))
            .collect())
    }

    /// Get a supplier by id
    pub async fn get(&self, supplier_id: Uuid) -> AppResult<Supplier> {
        sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, email, phone, address, notes FROM suppliers WHERE id = $1",
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .map(Supplier::from)
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// Create a supplier
    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        input.validate()?;

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, email, phone, address, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, address, notes
            "#,
        )
        .bind(input.name.trim())
        .bind(normalize_text(input.email))
        .bind(normalize_text(input.phone))
        .bind(normalize_text(input.address))
        .bind(normalize_text(input.notes))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(supplier_id = %row.id, "Supplier created");
        Ok(row.into())
    }

    /// Update a supplier; absent fields keep their stored value
    pub async fn update(
        &self,
        supplier_id: Uuid,
        input: UpdateSupplierInput,
    ) -> AppResult<Supplier> {
        input.validate()?;
        let existing = self.get(supplier_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let email = input.email.or(existing.email);
        let phone = input.phone.or(existing.phone);
        let address = input.address.or(existing.address);
        let notes = input.notes.or(existing.notes);

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            UPDATE suppliers
            SET name = $1, email = $2, phone = $3, address = $4, notes = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING id, name, email, phone, address, notes
            "#,
        )
        .bind(name.trim())
        .bind(normalize_text(email))
        .bind(normalize_text(phone))
        .bind(normalize_text(address))
        .bind(normalize_text(notes))
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(supplier_id = %supplier_id, "Supplier updated");
        Ok(row.into())
    }

    /// Delete a supplier and its product links
    pub async fn delete(&self, supplier_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        tracing::info!(supplier_id = %supplier_id, "Supplier deleted");
        Ok(())
    }

    /// Products supplied by a supplier, with the link terms
    pub async fn linked_products(&self, supplier_id: Uuid) -> AppResult<Vec<LinkedProduct>> {
        // Surface a missing supplier as 404 rather than an empty list
        self.get(supplier_id).await?;

        let rows = sqlx::query_as::<_, LinkedProductRow>(
            r#"
            SELECT ps.supplier_id, ps.product_id, ps.unit_price, ps.lead_time_days,
                   p.name, p.sku, p.description, p.current_stock, p.minimum_stock,
                   p.category_id, p.image_url
            FROM product_suppliers ps
            JOIN products p ON p.id = ps.product_id
            WHERE ps.supplier_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(LinkedProduct::from).collect())
    }

    /// Link a product to a supplier
    pub async fn link_product(
        &self,
        supplier_id: Uuid,
        input: LinkProductInput,
    ) -> AppResult<ProductSupplier> {
        input.validate()?;
        validate_unit_price(input.unit_price)
            .map_err(|msg| AppError::invalid_field("unit_price", msg))?;

        sqlx::query(
            r#"
            INSERT INTO product_suppliers (supplier_id, product_id, unit_price, lead_time_days)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(supplier_id)
        .bind(input.product_id)
        .bind(input.unit_price)
        .bind(input.lead_time_days)
        .execute(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "product_id", "Supplier or product"))?;

        tracing::info!(supplier_id = %supplier_id, product_id = %input.product_id, "Product linked");
        Ok(ProductSupplier {
            supplier_id,
            product_id: input.product_id,
            unit_price: input.unit_price,
            lead_time_days: input.lead_time_days,
        })
    }

    /// Remove a product link
    pub async fn unlink_product(&self, supplier_id: Uuid, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM product_suppliers WHERE supplier_id = $1 AND product_id = $2",
        )
        .bind(supplier_id)
        .bind(product_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product link".to_string()));
        }

        Ok(())
    }
}
