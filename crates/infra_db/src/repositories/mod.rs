//! Repository implementations
//!
//! Every write operation runs inside one database transaction bounded by a
//! fixed per-call time budget; when the budget runs out the caller gets
//! `DatabaseError::Timeout` and the server-side transaction rolls back with
//! the dropped connection.

use std::time::Duration;

use sqlx::PgExecutor;
use uuid::Uuid;

use core_kernel::MawbId;

use crate::error::DatabaseError;

pub mod draft_mawb;
pub mod manifest;
pub mod mawb_info;

/// Time budget for one repository call, transaction included
pub(crate) const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Precondition shared by upsert and status operations: the owning MAWB
/// record must exist.
pub(crate) async fn ensure_mawb_exists<'e, E>(
    executor: E,
    mawb_id: MawbId,
) -> Result<(), DatabaseError>
where
    E: PgExecutor<'e>,
{
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM mawb_info WHERE mawb_id = $1)")
            .bind(Uuid::from(mawb_id))
            .fetch_one(executor)
            .await?;

    if !exists.0 {
        return Err(DatabaseError::not_found("MAWB", mawb_id));
    }
    Ok(())
}
