//! End-to-end behavior of the soft-delete layer over the in-memory backend.

use std::collections::HashSet;

use bson::{Bson, Uuid, doc};
use serde::{Deserialize, Serialize};
use softlayer::{memory::InMemoryStore, prelude::*};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Sample {
    id: Uuid,
    test: bool,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none", default)]
    deleted_at: Option<bson::DateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    deleted: Option<bool>,
}

impl Sample {
    fn new(test: bool) -> Self {
        Self { id: Uuid::new(), test, deleted_at: None, deleted: None }
    }
}

impl Document for Sample {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "samples"
    }
}

async fn samples(
    store: &SoftDeleteStore<InMemoryStore>,
) -> TypedSoftCollection<'_, InMemoryStore, Sample> {
    store
        .register::<Sample>(SoftDeleteOptions::default())
        .await
        .expect("registration succeeds")
}

fn test_filter() -> Expr {
    Filter::eq("test", true)
}

#[tokio::test]
async fn find_one_and_remove_works_as_soft_delete() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    let sample = Sample::new(true);
    collection
        .insert(vec![sample.clone()])
        .await
        .unwrap();

    let response = collection
        .find_one_and_remove(Some(test_filter()))
        .await
        .unwrap()
        .expect("the alive document matches");
    assert!(response.deleted_at.is_some());
    assert_eq!(response.deleted, Some(true));

    assert!(
        collection
            .find_by_id(&sample.id)
            .await
            .unwrap()
            .is_none()
    );

    let tombstoned = collection
        .find_by_id_deleted(&sample.id)
        .await
        .unwrap()
        .expect("visible through the deleted-only read");
    assert_eq!(tombstoned.deleted, Some(true));
}

#[tokio::test]
async fn visibility_scopes_partition_the_matching_documents() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    let docs: Vec<Sample> = (0..4).map(|_| Sample::new(true)).collect();
    collection.insert(docs.clone()).await.unwrap();
    // A document outside the filter, to prove the caller filter is respected.
    collection
        .insert(vec![Sample::new(false)])
        .await
        .unwrap();

    collection
        .find_by_id_and_delete(&docs[0].id)
        .await
        .unwrap();
    collection
        .find_by_id_and_delete(&docs[1].id)
        .await
        .unwrap();

    let ids = |found: Vec<Sample>| {
        found
            .into_iter()
            .map(|d| d.id)
            .collect::<HashSet<_>>()
    };

    let alive = ids(collection.find(test_filter().into()).await.unwrap());
    let deleted = ids(
        collection
            .find_deleted(test_filter().into())
            .await
            .unwrap(),
    );
    let all = ids(
        collection
            .find_with_deleted(test_filter().into())
            .await
            .unwrap(),
    );

    assert_eq!(alive.len(), 2);
    assert_eq!(deleted.len(), 2);
    assert_eq!(all.len(), 4);
    assert!(alive.is_disjoint(&deleted));
    assert_eq!(
        alive.union(&deleted).copied().collect::<HashSet<_>>(),
        all,
    );
}

#[tokio::test]
async fn delete_many_stamps_without_removing() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    collection
        .insert((0..4).map(|_| Sample::new(true)).collect())
        .await
        .unwrap();

    let summary = collection
        .delete_many(Some(test_filter()))
        .await
        .unwrap();
    assert_eq!(summary.matched_count, 4);
    assert_eq!(summary.modified_count, 4);

    assert!(
        collection
            .find(test_filter().into())
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        collection
            .find_deleted(test_filter().into())
            .await
            .unwrap()
            .len(),
        4,
    );
    assert_eq!(
        collection
            .find_with_deleted(test_filter().into())
            .await
            .unwrap()
            .len(),
        4,
    );
}

#[tokio::test]
async fn delete_one_narrows_to_alive_documents() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    collection
        .insert(vec![Sample::new(true)])
        .await
        .unwrap();

    let first = collection
        .delete_one(Some(test_filter()))
        .await
        .unwrap();
    assert_eq!(first.matched_count, 1);
    assert_eq!(first.modified_count, 1);

    // Everything matching the caller filter is already deleted.
    let second = collection
        .delete_one(Some(test_filter()))
        .await
        .unwrap();
    assert_eq!(second.matched_count, 0);

    // Still present through the unscoped read.
    assert_eq!(
        collection
            .find_with_deleted(test_filter().into())
            .await
            .unwrap()
            .len(),
        1,
    );
}

#[tokio::test]
async fn delete_many_operates_on_already_deleted_documents_too() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    collection
        .insert((0..4).map(|_| Sample::new(true)).collect())
        .await
        .unwrap();

    collection
        .delete_many(Some(test_filter()))
        .await
        .unwrap();

    // The rewrite is not narrowed to alive-only: a second pass re-stamps
    // every match.
    let again = collection
        .delete_many(Some(test_filter()))
        .await
        .unwrap();
    assert_eq!(again.matched_count, 4);
}

#[tokio::test]
async fn restore_makes_documents_visible_again_and_is_idempotent() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    let sample = Sample::new(true);
    collection
        .insert(vec![sample.clone()])
        .await
        .unwrap();
    collection
        .delete_many(Some(test_filter()))
        .await
        .unwrap();

    let restored = collection
        .restore(Some(test_filter()))
        .await
        .unwrap();
    assert_eq!(restored.matched_count, 1);
    assert_eq!(restored.modified_count, 1);

    let back = collection
        .find_by_id(&sample.id)
        .await
        .unwrap()
        .expect("restored document is visible to plain reads");
    assert_eq!(back.deleted_at, None);
    assert_eq!(back.deleted, Some(false));

    // A second restore matches but changes nothing.
    let again = collection
        .restore(Some(test_filter()))
        .await
        .unwrap();
    assert_eq!(again.matched_count, 1);
    assert_eq!(again.modified_count, 0);

    let still = collection
        .find_by_id(&sample.id)
        .await
        .unwrap()
        .expect("still visible");
    assert_eq!(still.deleted_at, None);
    assert_eq!(still.deleted, Some(false));
}

#[tokio::test]
async fn remove_synonyms_behave_like_their_delete_counterparts() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    let docs: Vec<Sample> = (0..3).map(|_| Sample::new(true)).collect();
    collection.insert(docs.clone()).await.unwrap();

    let removed = collection
        .find_by_id_and_remove(&docs[0].id)
        .await
        .unwrap()
        .expect("stamped and returned");
    assert_eq!(removed.deleted, Some(true));

    let one = collection
        .remove_one(Some(test_filter()))
        .await
        .unwrap();
    assert_eq!(one.matched_count, 1);

    let many = collection
        .remove_many(Some(test_filter()))
        .await
        .unwrap();
    assert_eq!(many.matched_count, 3);

    assert!(
        collection
            .find(test_filter().into())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn custom_marker_field_with_literal_value() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = store
        .collection(
            "custom",
            SoftDeleteOptions::default()
                .marker_field("myType")
                .marker_literal(true),
        )
        .await
        .unwrap();

    collection
        .insert(vec![(Uuid::new(), Bson::Document(doc! { "test": true }))])
        .await
        .unwrap();

    let response = collection
        .find_one_and_remove(Some(test_filter()))
        .await
        .unwrap()
        .expect("the alive document matches");

    let fields = response.as_document().unwrap();
    assert_eq!(fields.get("myType"), Some(&Bson::Boolean(true)));
    assert_eq!(fields.get("deleted"), Some(&Bson::Boolean(true)));
    // The default marker field plays no part in this configuration.
    assert_eq!(fields.get("deletedAt"), None);
}

#[tokio::test]
async fn marker_based_visibility_without_a_flag_field() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = store
        .collection(
            "tombstones",
            SoftDeleteOptions::default()
                .visibility(VisibilityMode::MarkerBased)
                .without_flag_field(),
        )
        .await
        .unwrap();

    let id = Uuid::new();
    collection
        .insert(vec![(id, Bson::Document(doc! { "test": true }))])
        .await
        .unwrap();

    let stamped = collection
        .find_one_and_delete(Some(test_filter()))
        .await
        .unwrap()
        .expect("the alive document matches");
    let fields = stamped.as_document().unwrap();
    assert!(matches!(fields.get("deletedAt"), Some(Bson::DateTime(_))));
    assert_eq!(fields.get("deleted"), None);

    assert!(collection.find_by_id(&id).await.unwrap().is_none());
    assert!(
        collection
            .find_by_id_deleted(&id)
            .await
            .unwrap()
            .is_some()
    );

    collection
        .restore(Some(test_filter()))
        .await
        .unwrap();
    let restored = collection
        .find_by_id(&id)
        .await
        .unwrap()
        .expect("visible again");
    assert_eq!(
        restored.as_document().unwrap().get("deletedAt"),
        Some(&Bson::Null),
    );
}

#[tokio::test]
async fn producer_marker_is_evaluated_at_deletion_time() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = store
        .collection(
            "produced",
            SoftDeleteOptions::default()
                .marker_producer(|| Bson::String("v2-cleanup".to_string()))
                .marker_type(FieldType::String),
        )
        .await
        .unwrap();

    collection
        .insert(vec![(Uuid::new(), Bson::Document(doc! { "test": true }))])
        .await
        .unwrap();

    let stamped = collection
        .find_one_and_delete(Some(test_filter()))
        .await
        .unwrap()
        .expect("the alive document matches");
    assert_eq!(
        stamped.as_document().unwrap().get("deletedAt"),
        Some(&Bson::String("v2-cleanup".to_string())),
    );
}

#[tokio::test]
async fn alive_only_updates_skip_deleted_documents() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    collection
        .insert(vec![Sample::new(true)])
        .await
        .unwrap();
    collection
        .delete_many(Some(test_filter()))
        .await
        .unwrap();

    let scoped = collection
        .update_one(Some(test_filter()), doc! { "test": false })
        .await
        .unwrap();
    assert_eq!(scoped.matched_count, 0);

    let unscoped = collection
        .update_one_with_deleted(Some(test_filter()), doc! { "test": false })
        .await
        .unwrap();
    assert_eq!(unscoped.matched_count, 1);
    assert_eq!(unscoped.modified_count, 1);
}

#[tokio::test]
async fn replace_one_keeps_the_document_in_the_alive_partition() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    let sample = Sample::new(true);
    collection
        .insert(vec![sample.clone()])
        .await
        .unwrap();

    // The replacement body carries neither governed field.
    let mut swapped = sample.clone();
    swapped.test = false;
    let summary = collection
        .replace_one(Some(test_filter()), &swapped)
        .await
        .unwrap();
    assert_eq!(summary.matched_count, 1);

    let alive = collection
        .find_by_id(&sample.id)
        .await
        .unwrap()
        .expect("replaced document is still alive");
    assert!(!alive.test);
    assert!(
        collection
            .find_by_id_deleted(&sample.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn replace_one_skips_deleted_documents() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    let sample = Sample::new(true);
    collection
        .insert(vec![sample.clone()])
        .await
        .unwrap();
    collection
        .find_by_id_and_delete(&sample.id)
        .await
        .unwrap();

    let scoped = collection
        .replace_one(Some(test_filter()), &sample)
        .await
        .unwrap();
    assert_eq!(scoped.matched_count, 0);

    let unscoped = collection
        .replace_one_with_deleted(Some(test_filter()), &sample)
        .await
        .unwrap();
    assert_eq!(unscoped.matched_count, 1);
}

#[tokio::test]
async fn invalid_registration_options_fail_before_touching_the_store() {
    let store = SoftDeleteStore::new(InMemoryStore::new());

    let err = store
        .collection("broken", SoftDeleteOptions::default().marker_field(""))
        .await
        .unwrap_err();
    assert!(matches!(err, SoftStoreError::Configuration(_)));

    // The failed registration never created the collection.
    assert!(
        store
            .list_collections()
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn store_errors_propagate_unchanged() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    let sample = Sample::new(true);
    collection
        .insert(vec![sample.clone()])
        .await
        .unwrap();
    let err = collection
        .insert(vec![sample])
        .await
        .unwrap_err();

    assert!(matches!(err, SoftStoreError::DocumentAlreadyExists(..)));
}

#[tokio::test]
async fn destroy_is_a_hard_delete_bypassing_the_policy() {
    let store = SoftDeleteStore::new(InMemoryStore::new());
    let collection = samples(&store).await;

    let sample = Sample::new(true);
    collection
        .insert(vec![sample.clone()])
        .await
        .unwrap();
    collection
        .delete_many(Some(test_filter()))
        .await
        .unwrap();

    collection
        .destroy(vec![sample.id])
        .await
        .unwrap();

    // Gone even from the unscoped read.
    assert!(
        collection
            .find_with_deleted(test_filter().into())
            .await
            .unwrap()
            .is_empty()
    );
}
