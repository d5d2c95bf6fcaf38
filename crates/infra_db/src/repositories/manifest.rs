//! Cargo manifest repository
//!
//! Persists the manifest header plus its house-waybill items as one atomic
//! unit keyed by the owning MAWB id. The header is written with a single
//! insert-or-update against the unique mawb_id constraint; children are
//! always deleted and reinserted fresh, never patched.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{Currency, ManifestId, ManifestItemId, MawbId};
use domain_docs::{CargoManifest, DocumentStatus, ManifestItem, NewManifest};

use crate::error::{DatabaseError, DocumentOpError};
use crate::repositories::{ensure_mawb_exists, CALL_TIMEOUT};

/// Repository for cargo manifest documents
#[derive(Debug, Clone)]
pub struct ManifestRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct ManifestRow {
    manifest_id: Uuid,
    mawb_id: Uuid,
    mawb_number: String,
    flight_number: String,
    flight_date: NaiveDate,
    departure_port: String,
    destination_port: String,
    carrier: String,
    currency: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ManifestItemRow {
    item_id: Uuid,
    manifest_id: Uuid,
    line_no: i32,
    hawb_number: String,
    pieces: i32,
    gross_weight_kg: Decimal,
    category_code: String,
    vat: Decimal,
    duty: Decimal,
    consignee: Option<String>,
    description: Option<String>,
}

impl ManifestRow {
    fn into_domain(self, items: Vec<ManifestItem>) -> Result<CargoManifest, DatabaseError> {
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

        Ok(CargoManifest {
            id: ManifestId::from(self.manifest_id),
            mawb_id: MawbId::from(self.mawb_id),
            mawb_number: self.mawb_number,
            flight_number: self.flight_number,
            flight_date: self.flight_date,
            departure_port: self.departure_port,
            destination_port: self.destination_port,
            carrier: self.carrier,
            currency,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
        })
    }
}

impl From<ManifestItemRow> for ManifestItem {
    fn from(row: ManifestItemRow) -> Self {
        ManifestItem {
            id: ManifestItemId::from(row.item_id),
            manifest_id: ManifestId::from(row.manifest_id),
            line_no: row.line_no,
            hawb_number: row.hawb_number,
            pieces: row.pieces,
            gross_weight_kg: row.gross_weight_kg,
            category_code: row.category_code,
            vat: row.vat,
            duty: row.duty,
            consignee: row.consignee,
            description: row.description,
        }
    }
}

impl ManifestRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates or fully replaces the manifest owned by a MAWB
    ///
    /// First call inserts the header with status Draft; later calls update
    /// the header in place (status untouched) and replace every item. Any
    /// failure rolls back the whole call. Returns the canonical stored
    /// document, re-read after commit.
    #[instrument(skip(self, input), fields(mawb_id = %mawb_id))]
    pub async fn upsert(
        &self,
        mawb_id: MawbId,
        input: NewManifest,
    ) -> Result<CargoManifest, DatabaseError> {
        tokio::time::timeout(CALL_TIMEOUT, self.upsert_tx(mawb_id, input))
            .await
            .map_err(|_| DatabaseError::Timeout)?
    }

    async fn upsert_tx(
        &self,
        mawb_id: MawbId,
        input: NewManifest,
    ) -> Result<CargoManifest, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        ensure_mawb_exists(&mut *tx, mawb_id).await?;

        let (manifest_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO cargo_manifests (
                manifest_id, mawb_id, mawb_number, flight_number, flight_date,
                departure_port, destination_port, carrier, currency, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'draft')
            ON CONFLICT (mawb_id) DO UPDATE SET
                mawb_number = EXCLUDED.mawb_number,
                flight_number = EXCLUDED.flight_number,
                flight_date = EXCLUDED.flight_date,
                departure_port = EXCLUDED.departure_port,
                destination_port = EXCLUDED.destination_port,
                carrier = EXCLUDED.carrier,
                currency = EXCLUDED.currency,
                updated_at = now()
            RETURNING manifest_id
            "#,
        )
        .bind(Uuid::from(ManifestId::new_v7()))
        .bind(Uuid::from(mawb_id))
        .bind(&input.mawb_number)
        .bind(&input.flight_number)
        .bind(input.flight_date)
        .bind(&input.departure_port)
        .bind(&input.destination_port)
        .bind(&input.carrier)
        .bind(input.currency.code())
        .fetch_one(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM manifest_items WHERE manifest_id = $1")
            .bind(manifest_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for (index, item) in input.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO manifest_items (
                    item_id, manifest_id, line_no, hawb_number, pieces,
                    gross_weight_kg, category_code, vat, duty, consignee, description
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(Uuid::from(ManifestItemId::new_v7()))
            .bind(manifest_id)
            .bind(index as i32 + 1)
            .bind(&item.hawb_number)
            .bind(item.pieces)
            .bind(item.gross_weight_kg)
            .bind(&item.category_code)
            .bind(item.vat)
            .bind(item.duty)
            .bind(&item.consignee)
            .bind(&item.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        debug!(
            manifest_id = %manifest_id,
            replaced_items = deleted,
            inserted_items = input.items.len(),
            "manifest upserted"
        );

        self.find_by_mawb(mawb_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("CargoManifest", mawb_id))
    }

    /// Loads the manifest owned by a MAWB, items in line order
    pub async fn find_by_mawb(
        &self,
        mawb_id: MawbId,
    ) -> Result<Option<CargoManifest>, DatabaseError> {
        let header = sqlx::query_as::<_, ManifestRow>(
            r#"
            SELECT manifest_id, mawb_id, mawb_number, flight_number, flight_date,
                   departure_port, destination_port, carrier, currency, status,
                   created_at, updated_at
            FROM cargo_manifests
            WHERE mawb_id = $1
            "#,
        )
        .bind(Uuid::from(mawb_id))
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, ManifestItemRow>(
            r#"
            SELECT item_id, manifest_id, line_no, hawb_number, pieces,
                   gross_weight_kg, category_code, vat, duty, consignee, description
            FROM manifest_items
            WHERE manifest_id = $1
            ORDER BY line_no
            "#,
        )
        .bind(header.manifest_id)
        .fetch_all(&self.pool)
        .await?;

        let items = items.into_iter().map(ManifestItem::from).collect();
        Ok(Some(header.into_domain(items)?))
    }

    /// Confirms the manifest owned by a MAWB
    pub async fn confirm(&self, mawb_id: MawbId) -> Result<CargoManifest, DocumentOpError> {
        self.set_status(mawb_id, DocumentStatus::Confirmed).await
    }

    /// Rejects the manifest owned by a MAWB
    pub async fn reject(&self, mawb_id: MawbId) -> Result<CargoManifest, DocumentOpError> {
        self.set_status(mawb_id, DocumentStatus::Rejected).await
    }

    #[instrument(skip(self), fields(mawb_id = %mawb_id, target = %target))]
    async fn set_status(
        &self,
        mawb_id: MawbId,
        target: DocumentStatus,
    ) -> Result<CargoManifest, DocumentOpError> {
        tokio::time::timeout(CALL_TIMEOUT, self.set_status_tx(mawb_id, target))
            .await
            .map_err(|_| DatabaseError::Timeout)?
    }

    async fn set_status_tx(
        &self,
        mawb_id: MawbId,
        target: DocumentStatus,
    ) -> Result<CargoManifest, DocumentOpError> {
        let mut tx: Transaction<'_, Postgres> = self.pool.begin().await.map_err(DatabaseError::from)?;

        ensure_mawb_exists(&mut *tx, mawb_id).await?;

        // Row lock so a concurrent status change sees the committed value
        let row: Option<(Uuid, String)> = sqlx::query_as(
            "SELECT manifest_id, status FROM cargo_manifests WHERE mawb_id = $1 FOR UPDATE",
        )
        .bind(Uuid::from(mawb_id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let (manifest_id, status_text) =
            row.ok_or_else(|| DatabaseError::not_found("CargoManifest", mawb_id))?;
        let current: DocumentStatus = status_text
            .parse()
            .map_err(|e: domain_docs::DocumentError| {
                DatabaseError::SerializationError(e.to_string())
            })?;
        let next = current.transition_to(target)?;

        sqlx::query("UPDATE cargo_manifests SET status = $1, updated_at = now() WHERE manifest_id = $2")
            .bind(next.as_str())
            .bind(manifest_id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let stored = self
            .find_by_mawb(mawb_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("CargoManifest", mawb_id))?;
        Ok(stored)
    }
}
