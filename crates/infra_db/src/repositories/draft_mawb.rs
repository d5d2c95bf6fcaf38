//! Draft MAWB repository
//!
//! Persists the draft header, its items with nested dimension lines, and the
//! sibling charge collection as one atomic unit keyed by the owning MAWB id.
//! Each item's chargeable weight is derived from its dimension lines right
//! before the item row is written.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{ChargeId, Currency, DimensionId, DraftItemId, DraftMawbId, MawbId};
use domain_docs::{
    DocumentStatus, DraftCharge, DraftItem, DraftMawb, ItemDimension, NewDraftMawb,
};
use domain_fees::chargeable_weight::{chargeable_weight, DimensionEntry, WeightUnit};

use crate::error::{DatabaseError, DocumentOpError};
use crate::repositories::{ensure_mawb_exists, CALL_TIMEOUT};

/// Repository for draft MAWB documents
#[derive(Debug, Clone)]
pub struct DraftMawbRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct DraftRow {
    draft_id: Uuid,
    mawb_id: Uuid,
    mawb_number: String,
    shipper: String,
    consignee: String,
    departure_port: String,
    destination_port: String,
    currency: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct DraftItemRow {
    item_id: Uuid,
    draft_id: Uuid,
    line_no: i32,
    description: Option<String>,
    pieces: i32,
    gross_weight: Decimal,
    weight_unit: String,
    total_volume_m3: Decimal,
    chargeable_weight_kg: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct DimRow {
    dim_id: Uuid,
    item_id: Uuid,
    line_no: i32,
    length_cm: Decimal,
    width_cm: Decimal,
    height_cm: Decimal,
    box_count: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct ChargeRow {
    charge_id: Uuid,
    draft_id: Uuid,
    line_no: i32,
    charge_code: String,
    description: Option<String>,
    amount: Decimal,
}

fn weight_unit_to_str(unit: WeightUnit) -> &'static str {
    match unit {
        WeightUnit::Kg => "kg",
        WeightUnit::Lb => "lb",
    }
}

fn weight_unit_from_str(s: &str) -> Result<WeightUnit, DatabaseError> {
    match s {
        "kg" => Ok(WeightUnit::Kg),
        "lb" => Ok(WeightUnit::Lb),
        other => Err(DatabaseError::SerializationError(format!(
            "unknown weight unit '{other}'"
        ))),
    }
}

impl DraftItemRow {
    fn into_domain(self, dims: Vec<ItemDimension>) -> Result<DraftItem, DatabaseError> {
        Ok(DraftItem {
            id: DraftItemId::from(self.item_id),
            draft_id: DraftMawbId::from(self.draft_id),
            line_no: self.line_no,
            description: self.description,
            pieces: self.pieces,
            gross_weight: self.gross_weight,
            weight_unit: weight_unit_from_str(&self.weight_unit)?,
            total_volume_m3: self.total_volume_m3,
            chargeable_weight_kg: self.chargeable_weight_kg,
            dims,
        })
    }
}

impl From<DimRow> for ItemDimension {
    fn from(row: DimRow) -> Self {
        ItemDimension {
            id: DimensionId::from(row.dim_id),
            item_id: DraftItemId::from(row.item_id),
            line_no: row.line_no,
            length: row.length_cm,
            width: row.width_cm,
            height: row.height_cm,
            count: row.box_count,
        }
    }
}

impl From<ChargeRow> for DraftCharge {
    fn from(row: ChargeRow) -> Self {
        DraftCharge {
            id: ChargeId::from(row.charge_id),
            draft_id: DraftMawbId::from(row.draft_id),
            line_no: row.line_no,
            charge_code: row.charge_code,
            description: row.description,
            amount: row.amount,
        }
    }
}

impl DraftRow {
    fn into_domain(
        self,
        items: Vec<DraftItem>,
        charges: Vec<DraftCharge>,
    ) -> Result<DraftMawb, DatabaseError> {
        let currency: Currency = self
            .currency
            .parse()
            .map_err(|e: core_kernel::MoneyError| DatabaseError::SerializationError(e.to_string()))?;
        let status: DocumentStatus = self
            .status
            .parse()
            .map_err(|e: domain_docs::DocumentError| {
                DatabaseError::SerializationError(e.to_string())
            })?;

        Ok(DraftMawb {
            id: DraftMawbId::from(self.draft_id),
            mawb_id: MawbId::from(self.mawb_id),
            mawb_number: self.mawb_number,
            shipper: self.shipper,
            consignee: self.consignee,
            departure_port: self.departure_port,
            destination_port: self.destination_port,
            currency,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
            charges,
        })
    }
}

impl DraftMawbRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates or fully replaces the draft MAWB owned by a MAWB
    ///
    /// First call inserts the header with status Draft; later calls update
    /// the header in place (status untouched) and replace every item,
    /// dimension line, and charge. Chargeable weight and volume are computed
    /// per item from its dimension lines before the row is written. Any
    /// failure rolls back the whole call. Returns the canonical stored
    /// document, re-read after commit.
    #[instrument(skip(self, input), fields(mawb_id = %mawb_id))]
    pub async fn upsert(
        &self,
        mawb_id: MawbId,
        input: NewDraftMawb,
    ) -> Result<DraftMawb, DatabaseError> {
        tokio::time::timeout(CALL_TIMEOUT, self.upsert_tx(mawb_id, input))
            .await
            .map_err(|_| DatabaseError::Timeout)?
    }

    async fn upsert_tx(
        &self,
        mawb_id: MawbId,
        input: NewDraftMawb,
    ) -> Result<DraftMawb, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        ensure_mawb_exists(&mut *tx, mawb_id).await?;

        let (draft_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO draft_mawbs (
                draft_id, mawb_id, mawb_number, shipper, consignee,
                departure_port, destination_port, currency, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'draft')
            ON CONFLICT (mawb_id) DO UPDATE SET
                mawb_number = EXCLUDED.mawb_number,
                shipper = EXCLUDED.shipper,
                consignee = EXCLUDED.consignee,
                departure_port = EXCLUDED.departure_port,
                destination_port = EXCLUDED.destination_port,
                currency = EXCLUDED.currency,
                updated_at = now()
            RETURNING draft_id
            "#,
        )
        .bind(Uuid::from(DraftMawbId::new_v7()))
        .bind(Uuid::from(mawb_id))
        .bind(&input.mawb_number)
        .bind(&input.shipper)
        .bind(&input.consignee)
        .bind(&input.departure_port)
        .bind(&input.destination_port)
        .bind(input.currency.code())
        .fetch_one(&mut *tx)
        .await?;

        // Dimension rows cascade away with their items
        sqlx::query("DELETE FROM draft_items WHERE draft_id = $1")
            .bind(draft_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM draft_charges WHERE draft_id = $1")
            .bind(draft_id)
            .execute(&mut *tx)
            .await?;

        for (index, item) in input.items.iter().enumerate() {
            let weight = chargeable_weight(&item.dims, item.gross_weight, item.weight_unit);
            let item_id = Uuid::from(DraftItemId::new_v7());

            sqlx::query(
                r#"
                INSERT INTO draft_items (
                    item_id, draft_id, line_no, description, pieces,
                    gross_weight, weight_unit, total_volume_m3, chargeable_weight_kg
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item_id)
            .bind(draft_id)
            .bind(index as i32 + 1)
            .bind(&item.description)
            .bind(item.pieces)
            .bind(item.gross_weight)
            .bind(weight_unit_to_str(item.weight_unit))
            .bind(weight.total_volume_m3)
            .bind(weight.chargeable_weight_kg)
            .execute(&mut *tx)
            .await?;

            for (dim_index, dim) in item.dims.iter().enumerate() {
                insert_dim(&mut tx, item_id, dim_index as i32 + 1, dim).await?;
            }
        }

        for (index, charge) in input.charges.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO draft_charges (
                    charge_id, draft_id, line_no, charge_code, description, amount
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::from(ChargeId::new_v7()))
            .bind(draft_id)
            .bind(index as i32 + 1)
            .bind(&charge.charge_code)
            .bind(&charge.description)
            .bind(charge.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        debug!(
            draft_id = %draft_id,
            items = input.items.len(),
            charges = input.charges.len(),
            "draft MAWB upserted"
        );

        self.find_by_mawb(mawb_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("DraftMawb", mawb_id))
    }

    /// Loads the draft MAWB owned by a MAWB, children in line order
    pub async fn find_by_mawb(&self, mawb_id: MawbId) -> Result<Option<DraftMawb>, DatabaseError> {
        let header = sqlx::query_as::<_, DraftRow>(
            r#"
            SELECT draft_id, mawb_id, mawb_number, shipper, consignee,
                   departure_port, destination_port, currency, status,
                   created_at, updated_at
            FROM draft_mawbs
            WHERE mawb_id = $1
            "#,
        )
        .bind(Uuid::from(mawb_id))
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, DraftItemRow>(
            r#"
            SELECT item_id, draft_id, line_no, description, pieces,
                   gross_weight, weight_unit, total_volume_m3, chargeable_weight_kg
            FROM draft_items
            WHERE draft_id = $1
            ORDER BY line_no
            "#,
        )
        .bind(header.draft_id)
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(item_rows.len());
        for row in item_rows {
            let dims = sqlx::query_as::<_, DimRow>(
                r#"
                SELECT dim_id, item_id, line_no, length_cm, width_cm, height_cm, box_count
                FROM draft_item_dims
                WHERE item_id = $1
                ORDER BY line_no
                "#,
            )
            .bind(row.item_id)
            .fetch_all(&self.pool)
            .await?;

            let dims = dims.into_iter().map(ItemDimension::from).collect();
            items.push(row.into_domain(dims)?);
        }

        let charges = sqlx::query_as::<_, ChargeRow>(
            r#"
            SELECT charge_id, draft_id, line_no, charge_code, description, amount
            FROM draft_charges
            WHERE draft_id = $1
            ORDER BY line_no
            "#,
        )
        .bind(header.draft_id)
        .fetch_all(&self.pool)
        .await?;

        let charges = charges.into_iter().map(DraftCharge::from).collect();
        Ok(Some(header.into_domain(items, charges)?))
    }

    /// Confirms the draft MAWB owned by a MAWB
    pub async fn confirm(&self, mawb_id: MawbId) -> Result<DraftMawb, DocumentOpError> {
        self.set_status(mawb_id, DocumentStatus::Confirmed).await
    }

    /// Rejects the draft MAWB owned by a MAWB
    pub async fn reject(&self, mawb_id: MawbId) -> Result<DraftMawb, DocumentOpError> {
        self.set_status(mawb_id, DocumentStatus::Rejected).await
    }

    #[instrument(skip(self), fields(mawb_id = %mawb_id, target = %target))]
    async fn set_status(
        &self,
        mawb_id: MawbId,
        target: DocumentStatus,
    ) -> Result<DraftMawb, DocumentOpError> {
        tokio::time::timeout(CALL_TIMEOUT, self.set_status_tx(mawb_id, target))
            .await
            .map_err(|_| DatabaseError::Timeout)?
    }

    async fn set_status_tx(
        &self,
        mawb_id: MawbId,
        target: DocumentStatus,
    ) -> Result<DraftMawb, DocumentOpError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        ensure_mawb_exists(&mut *tx, mawb_id).await?;

        // Row lock so a concurrent status change sees the committed value
        let row: Option<(Uuid, String)> = sqlx::query_as(
            "SELECT draft_id, status FROM draft_mawbs WHERE mawb_id = $1 FOR UPDATE",
        )
        .bind(Uuid::from(mawb_id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let (draft_id, status_text) =
            row.ok_or_else(|| DatabaseError::not_found("DraftMawb", mawb_id))?;
        let current: DocumentStatus = status_text
            .parse()
            .map_err(|e: domain_docs::DocumentError| {
                DatabaseError::SerializationError(e.to_string())
            })?;
        let next = current.transition_to(target)?;

        sqlx::query("UPDATE draft_mawbs SET status = $1, updated_at = now() WHERE draft_id = $2")
            .bind(next.as_str())
            .bind(draft_id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let stored = self
            .find_by_mawb(mawb_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("DraftMawb", mawb_id))?;
        Ok(stored)
    }
}

async fn insert_dim(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    item_id: Uuid,
    line_no: i32,
    dim: &DimensionEntry,
) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        INSERT INTO draft_item_dims (
            dim_id, item_id, line_no, length_cm, width_cm, height_cm, box_count
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(Uuid::from(DimensionId::new_v7()))
    .bind(item_id)
    .bind(line_no)
    .bind(dim.length)
    .bind(dim.width)
    .bind(dim.height)
    .bind(dim.count)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
