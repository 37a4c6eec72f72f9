//! Order Repository
//!
//! Orders are immutable snapshots plus a mutable status column. Items and
//! delivery address are stored as JSON TEXT, decoupled from the live catalog.

use std::str::FromStr;

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderCreate, OrderStatus, PaymentMethod};
use sqlx::{FromRow, SqlitePool};

const ORDER_COLUMNS: &str = "id, session_id, items, total, payment_method, delivery_address, \
     status, estimated_delivery, created_at, idempotency_key";

/// Admin list filters. `date` wins over the range when both are present;
/// range bounds are inclusive. Dates are `YYYY-MM-DD` (creation day).
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Raw row with JSON TEXT columns still encoded
#[derive(Debug, Clone, FromRow)]
struct OrderRow {
    id: i64,
    session_id: String,
    items: String,
    total: String,
    payment_method: String,
    delivery_address: String,
    status: String,
    estimated_delivery: i32,
    created_at: String,
    idempotency_key: Option<String>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepoError;

    fn try_from(row: OrderRow) -> RepoResult<Order> {
        let status = OrderStatus::from_str(&row.status)
            .map_err(|e| RepoError::Database(e.to_string()))?;
        let payment_method = PaymentMethod::from_str(&row.payment_method)
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(Order {
            id: row.id,
            session_id: row.session_id,
            items: serde_json::from_str(&row.items)?,
            total: row.total,
            payment_method,
            delivery_address: serde_json::from_str(&row.delivery_address)?,
            status,
            estimated_delivery: row.estimated_delivery,
            created_at: row.created_at,
            idempotency_key: row.idempotency_key,
        })
    }
}

/// Create an order in `pending` from the checkout payload.
///
/// When the payload carries an idempotency key that was already stored, the
/// existing order is returned and no second row is created.
pub async fn create(pool: &SqlitePool, data: OrderCreate) -> RepoResult<Order> {
    if let Some(key) = &data.idempotency_key
        && let Some(existing) = find_by_idempotency_key(pool, key).await?
    {
        tracing::info!(order_id = existing.id, "Duplicate checkout suppressed by idempotency key");
        return Ok(existing);
    }

    let created_at = shared::util::now_rfc3339();
    let insert = sqlx::query(
        "INSERT INTO orders (session_id, items, total, payment_method, delivery_address, \
         status, estimated_delivery, created_at, idempotency_key) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.session_id)
    .bind(serde_json::to_string(&data.items)?)
    .bind(&data.total)
    .bind(data.payment_method.as_str())
    .bind(serde_json::to_string(&data.delivery_address)?)
    .bind(OrderStatus::Pending.as_str())
    .bind(data.estimated_delivery)
    .bind(&created_at)
    .bind(&data.idempotency_key)
    .execute(pool)
    .await;

    let id = match insert {
        Ok(result) => result.last_insert_rowid(),
        // Two submissions raced past the lookup; the unique index caught the
        // second one, so hand back the row the winner created.
        Err(e) if e.to_string().contains("UNIQUE") => {
            if let Some(key) = &data.idempotency_key
                && let Some(existing) = find_by_idempotency_key(pool, key).await?
            {
                return Ok(existing);
            }
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(Order::try_from).transpose()
}

async fn find_by_idempotency_key(pool: &SqlitePool, key: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE idempotency_key = ?"
    ))
    .bind(key)
    .fetch_optional(pool)
    .await?;
    row.map(Order::try_from).transpose()
}

/// A session's orders, newest first.
pub async fn find_by_session(pool: &SqlitePool, session_id: &str) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE session_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Order::try_from).collect()
}

/// All orders, newest first, with optional admin filters.
///
/// Creation-day comparisons work lexically on the RFC 3339 prefix.
pub async fn find_all(pool: &SqlitePool, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
    let mut sql = format!("SELECT {ORDER_COLUMNS} FROM orders");
    let mut clauses: Vec<&str> = Vec::new();

    if filter.status.is_some() {
        clauses.push("status = ?");
    }
    if filter.date.is_some() {
        clauses.push("substr(created_at, 1, 10) = ?");
    } else {
        if filter.from.is_some() {
            clauses.push("substr(created_at, 1, 10) >= ?");
        }
        if filter.to.is_some() {
            clauses.push("substr(created_at, 1, 10) <= ?");
        }
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let mut query = sqlx::query_as::<_, OrderRow>(&sql);
    if let Some(status) = filter.status {
        query = query.bind(status.as_str());
    }
    if let Some(date) = &filter.date {
        query = query.bind(date);
    } else {
        if let Some(from) = &filter.from {
            query = query.bind(from);
        }
        if let Some(to) = &filter.to {
            query = query.bind(to);
        }
    }

    let rows = query.fetch_all(pool).await?;
    rows.into_iter().map(Order::try_from).collect()
}

/// Overwrite the status column. No transition checks here; the handler
/// decides whether the strict table applies.
pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}
