//! Stock transaction service
//!
//! Recording a transaction is a single insert. Product stock counters are
//! not touched here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{
    normalize_text, validate_unit_price, ProductRef, RecordTransactionInput, Transaction,
    TransactionType, TransactionWithProduct,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Transaction service
#[derive(Clone)]
pub struct TransactionService {
    db: PgPool,
}

/// Filters for the transaction list
#[derive(Debug, Default)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub search: Option<String>,
}

/// Transaction row joined with its product name and SKU
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    transaction_type: TransactionType,
    product_id: Uuid,
    quantity: i32,
    unit_price: Option<Decimal>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    created_by: Option<Uuid>,
    product_name: String,
    product_sku: String,
}

impl From<TransactionRow> for TransactionWithProduct {
    fn from(row: TransactionRow) -> Self {
        TransactionWithProduct {
            transaction: Transaction {
                id: row.id,
                transaction_type: row.transaction_type,
                product_id: row.product_id,
                quantity: row.quantity,
                unit_price: row.unit_price,
                notes: row.notes,
                created_at: row.created_at,
                created_by: row.created_by,
            },
            product: ProductRef {
                name: row.product_name,
                sku: row.product_sku,
            },
        }
    }
}

const SELECT_TRANSACTION: &str = r#"
    SELECT t.id, t.type AS transaction_type, t.product_id, t.quantity, t.unit_price,
           t.notes, t.created_at, t.created_by,
           p.name AS product_name, p.sku AS product_sku
    FROM transactions t
    JOIN products p ON p.id = t.product_id
"#;

fn into_transactions(rows: Vec<TransactionRow>) -> Vec<TransactionWithProduct> {
    rows.into_iter().map(TransactionWithProduct::from).collect()
}

impl TransactionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List transactions, newest first
    pub async fn list(&self, filter: &TransactionFilter) -> AppResult<Vec<TransactionWithProduct>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE ($1::transaction_type IS NULL OR t.type = $1) ORDER BY t.created_at DESC",
            SELECT_TRANSACTION
        ))
        .bind(filter.transaction_type)
        .fetch_all(&self.db)
        .await?;

        let transactions = into_transactions(rows);
        Ok(match filter.search.as_deref() {
            Some(query) => transactions
                .into_iter()
                .filter(|t| t.matches_search(query))
                .collect(),
            None => transactions,
        })
    }

    /// Get a transaction by id
    pub async fn get(&self, transaction_id: Uuid) -> AppResult<TransactionWithProduct> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE t.id = $1",
            SELECT_TRANSACTION
        ))
        .bind(transaction_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction".to_string()))?;

        Ok(row.into())
    }

    /// Record a transaction
    pub async fn record(
        &self,
        user_id: Uuid,
        input: RecordTransactionInput,
    ) -> AppResult<TransactionWithProduct> {
        input.validate()?;
        validate_unit_price(input.unit_price)
            .map_err(|msg| AppError::invalid_field("unit_price", msg))?;

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO transactions (type, product_id, quantity, unit_price, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.transaction_type)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(normalize_text(input.notes))
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, "id", "Product"))?;

        tracing::info!(
            transaction_id = %id,
            product_id = %input.product_id,
            transaction_type = input.transaction_type.as_str(),
            quantity = input.quantity,
            "Transaction recorded"
        );
        self.get(id).await
    }

    /// Transactions created at or after `start`, oldest first
    pub async fn since(&self, start: DateTime<Utc>) -> AppResult<Vec<TransactionWithProduct>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE t.created_at >= $1 ORDER BY t.created_at ASC",
            SELECT_TRANSACTION
        ))
        .bind(start)
        .fetch_all(&self.db)
        .await?;

        Ok(into_transactions(rows))
    }

    /// The `limit` most recent transactions, oldest first
    pub async fn latest(&self, limit: usize) -> AppResult<Vec<TransactionWithProduct>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} ORDER BY t.created_at DESC LIMIT $1",
            SELECT_TRANSACTION
        ))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        let mut transactions = into_transactions(rows);
        transactions.reverse();
        Ok(transactions)
    }
}
