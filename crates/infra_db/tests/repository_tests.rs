//! Integration tests for the document repositories
//!
//! These tests run against a throwaway PostgreSQL container and are ignored
//! by default; run them with `cargo test -- --ignored` where a Docker
//! daemon is available.

use rust_decimal_macros::dec;

use core_kernel::MawbId;
use domain_docs::{DocumentStatus, NewDraftCharge};
use domain_fees::chargeable_weight::WeightUnit;
use infra_db::{DatabaseError, DocumentOpError, DraftMawbRepository, ManifestRepository, MawbInfoRepository};
use std::sync::Arc;

use test_utils::{
    get_shared_test_database, NewDraftItemBuilder, NewDraftMawbBuilder, NewManifestBuilder,
    StringFixtures, TestDatabase,
};

async fn setup() -> Arc<TestDatabase> {
    test_utils::init_tracing();
    get_shared_test_database().await
}

async fn seed_mawb(repo: &MawbInfoRepository) -> MawbId {
    let mawb_id = MawbId::new_v7();
    repo.create(mawb_id, StringFixtures::mawb_number())
        .await
        .expect("mawb_info insert");
    mawb_id
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn first_upsert_creates_draft_document() {
    let db = setup().await;
    let mawbs = MawbInfoRepository::new(db.pool().clone());
    let manifests = ManifestRepository::new(db.pool().clone());

    let mawb_id = seed_mawb(&mawbs).await;
    let input = NewManifestBuilder::new().with_generated_items(3).build();

    let stored = manifests.upsert(mawb_id, input).await.unwrap();

    assert_eq!(stored.mawb_id, mawb_id);
    assert_eq!(stored.status, DocumentStatus::Draft);
    assert_eq!(stored.items.len(), 3);
    // Canonical values come from the re-read, not the payload
    assert!(stored.created_at <= stored.updated_at);
    let line_nos: Vec<i32> = stored.items.iter().map(|i| i.line_no).collect();
    assert_eq!(line_nos, vec![1, 2, 3]);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn upsert_is_idempotent_for_identical_children() {
    let db = setup().await;
    let mawbs = MawbInfoRepository::new(db.pool().clone());
    let manifests = ManifestRepository::new(db.pool().clone());

    let mawb_id = seed_mawb(&mawbs).await;
    let input = NewManifestBuilder::new().with_generated_items(5).build();

    let first = manifests.upsert(mawb_id, input.clone()).await.unwrap();
    let second = manifests.upsert(mawb_id, input).await.unwrap();

    // Same document, same children set, no duplicates
    assert_eq!(second.id, first.id);
    assert_eq!(second.items.len(), 5);
    let first_hawbs: Vec<&str> = first.items.iter().map(|i| i.hawb_number.as_str()).collect();
    let second_hawbs: Vec<&str> = second.items.iter().map(|i| i.hawb_number.as_str()).collect();
    assert_eq!(first_hawbs, second_hawbs);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn update_path_replaces_children_entirely() {
    let db = setup().await;
    let mawbs = MawbInfoRepository::new(db.pool().clone());
    let manifests = ManifestRepository::new(db.pool().clone());

    let mawb_id = seed_mawb(&mawbs).await;

    let first = NewManifestBuilder::new().with_generated_items(4).build();
    let stored = manifests.upsert(mawb_id, first).await.unwrap();
    assert_eq!(stored.items.len(), 4);

    let second = NewManifestBuilder::new()
        .with_flight_number("CZ3102")
        .with_generated_items(2)
        .build();
    let replaced = manifests.upsert(mawb_id, second).await.unwrap();

    assert_eq!(replaced.id, stored.id);
    assert_eq!(replaced.flight_number, "CZ3102");
    assert_eq!(replaced.items.len(), 2);
    // Header creation time survives the replace; status stays Draft
    assert_eq!(replaced.created_at, stored.created_at);
    assert_eq!(replaced.status, DocumentStatus::Draft);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn upsert_for_unknown_mawb_is_not_found() {
    let db = setup().await;
    let manifests = ManifestRepository::new(db.pool().clone());

    let result = manifests
        .upsert(MawbId::new_v7(), NewManifestBuilder::new().build())
        .await;

    assert!(matches!(result, Err(DatabaseError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn draft_items_get_computed_chargeable_weight() {
    let db = setup().await;
    let mawbs = MawbInfoRepository::new(db.pool().clone());
    let drafts = DraftMawbRepository::new(db.pool().clone());

    let mawb_id = seed_mawb(&mawbs).await;
    let input = NewDraftMawbBuilder::new()
        .with_item(
            NewDraftItemBuilder::new()
                .with_gross_weight(dec!(100), WeightUnit::Kg)
                .with_dim(dec!(100), dec!(50), dec!(30), dec!(2))
                .build(),
        )
        .with_item(
            NewDraftItemBuilder::new()
                .with_gross_weight(dec!(50), WeightUnit::Kg)
                .with_dim(dec!(100), dec!(100), dec!(100), dec!(4))
                .build(),
        )
        .with_charge(NewDraftCharge {
            charge_code: "AWC".to_string(),
            description: Some("air waybill charge".to_string()),
            amount: dec!(15.00),
        })
        .build();

    let stored = drafts.upsert(mawb_id, input).await.unwrap();

    assert_eq!(stored.items.len(), 2);
    let heavy = &stored.items[0];
    assert_eq!(heavy.total_volume_m3, dec!(0.300));
    assert_eq!(heavy.chargeable_weight_kg, dec!(100.00));
    assert_eq!(heavy.dims.len(), 1);

    let bulky = &stored.items[1];
    assert_eq!(bulky.total_volume_m3, dec!(4.000));
    assert_eq!(bulky.chargeable_weight_kg, dec!(666.68));

    assert_eq!(stored.charges.len(), 1);
    assert_eq!(stored.charges[0].amount, dec!(15.00));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn confirm_missing_parent_and_missing_document() {
    let db = setup().await;
    let mawbs = MawbInfoRepository::new(db.pool().clone());
    let manifests = ManifestRepository::new(db.pool().clone());

    // Unknown parent id
    let result = manifests.confirm(MawbId::new_v7()).await;
    assert!(matches!(
        result,
        Err(DocumentOpError::Database(DatabaseError::NotFound(_)))
    ));

    // Parent exists but no manifest was ever upserted
    let mawb_id = seed_mawb(&mawbs).await;
    let result = manifests.confirm(mawb_id).await;
    assert!(matches!(
        result,
        Err(DocumentOpError::Database(DatabaseError::NotFound(_)))
    ));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn confirmed_documents_cannot_be_reconfirmed() {
    let db = setup().await;
    let mawbs = MawbInfoRepository::new(db.pool().clone());
    let manifests = ManifestRepository::new(db.pool().clone());

    let mawb_id = seed_mawb(&mawbs).await;
    manifests
        .upsert(mawb_id, NewManifestBuilder::new().with_generated_items(1).build())
        .await
        .unwrap();

    let confirmed = manifests.confirm(mawb_id).await.unwrap();
    assert_eq!(confirmed.status, DocumentStatus::Confirmed);

    let again = manifests.confirm(mawb_id).await;
    assert!(matches!(again, Err(DocumentOpError::Workflow(_))));

    let rejected = manifests.reject(mawb_id).await;
    assert!(matches!(rejected, Err(DocumentOpError::Workflow(_))));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn reject_settles_draft_documents() {
    let db = setup().await;
    let mawbs = MawbInfoRepository::new(db.pool().clone());
    let drafts = DraftMawbRepository::new(db.pool().clone());

    let mawb_id = seed_mawb(&mawbs).await;
    drafts
        .upsert(mawb_id, NewDraftMawbBuilder::new().build())
        .await
        .unwrap();

    let rejected = drafts.reject(mawb_id).await.unwrap();
    assert_eq!(rejected.status, DocumentStatus::Rejected);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn deleting_mawb_cascades_both_document_trees() {
    let db = setup().await;
    let mawbs = MawbInfoRepository::new(db.pool().clone());
    let manifests = ManifestRepository::new(db.pool().clone());
    let drafts = DraftMawbRepository::new(db.pool().clone());

    let mawb_id = seed_mawb(&mawbs).await;
    manifests
        .upsert(mawb_id, NewManifestBuilder::new().with_generated_items(2).build())
        .await
        .unwrap();
    drafts
        .upsert(
            mawb_id,
            NewDraftMawbBuilder::new()
                .with_item(NewDraftItemBuilder::new().with_dim(dec!(10), dec!(10), dec!(10), dec!(1)).build())
                .build(),
        )
        .await
        .unwrap();

    let parent = mawbs.find(mawb_id).await.unwrap().expect("parent record");
    assert_eq!(parent.mawb_number, StringFixtures::mawb_number());

    mawbs.delete(mawb_id).await.unwrap();

    assert!(manifests.find_by_mawb(mawb_id).await.unwrap().is_none());
    assert!(drafts.find_by_mawb(mawb_id).await.unwrap().is_none());
    assert!(!mawbs.exists(mawb_id).await.unwrap());
    assert!(mawbs.find(mawb_id).await.unwrap().is_none());
}
