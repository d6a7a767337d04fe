//! Collection API: add, lookup, paging and id restriction

use crate::common::*;

#[test]
fn test_find_nearest_from_id_includes_self() {
    let collection = abc_collection();
    let results = collection
        .find_nearest_from_id("A", SearchOptions::new().with_limit(2))
        .unwrap();

    assert_eq!(result_ids(&results), vec![id("A"), id("C")]);
    assert_eq!(results[0].score, 0.0);
    assert_eq!(results[1].score, 1.0);
}

#[test]
fn test_find_nearest_from_array_within_ids() {
    let collection = abc_collection();
    let results = collection
        .find_nearest_from_array(
            &[0.0f32, 0.0],
            SearchOptions::new().within(["B", "C"]).with_limit(1),
        )
        .unwrap();

    assert_eq!(result_ids(&results), vec![id("C")]);
    assert_eq!(results[0].score, 1.0);
}

#[test]
fn test_full_ranking_is_ordered() {
    let collection = abc_collection();
    let results = collection
        .find_nearest_from_array(&[0.0f32, 0.0], SearchOptions::new())
        .unwrap();

    assert_eq!(result_ids(&results), vec![id("A"), id("C"), id("B")]);
    assert!((results[2].score - 5.0).abs() < 1e-6);
    assert_ranked(&results, VectorIndexMeasure::L2);
}

#[test]
fn test_pages_concatenate_to_full_ranking() {
    let (_db, collection) = collection(8, VectorIndexMeasure::Cosine);
    collection.add(random_items(37, 8, 11)).unwrap();
    let query = seeded_vector(8, 99);

    let full = collection
        .find_nearest_from_array(&query, SearchOptions::new())
        .unwrap();
    assert_eq!(full.len(), 37);

    let mut paged = Vec::new();
    for page in 0..5 {
        let options = SearchOptions::new().with_limit(10).with_offset(page * 10);
        paged.extend(collection.find_nearest_from_array(&query, options).unwrap());
    }

    assert_eq!(paged, full);
}

#[test]
fn test_upsert_replaces_vector_without_growing() {
    let collection = abc_collection();
    let inserted = collection
        .add(vec![VectorCollectionItem::new("B", vec![0.5, 0.0])])
        .unwrap();

    assert_eq!(inserted, 0);
    assert_eq!(collection.len(), 3);
    assert_eq!(collection.get("B"), Some(vec![0.5, 0.0]));

    let results = collection
        .find_nearest_from_array(&[0.0f32, 0.0], SearchOptions::new().with_limit(2))
        .unwrap();
    assert_eq!(result_ids(&results), vec![id("A"), id("B")]);
}

#[test]
fn test_integer_and_string_ids_are_distinct() {
    let (_db, collection) = collection(1, VectorIndexMeasure::L2);
    collection
        .add(vec![
            VectorCollectionItem::new(7, vec![1.0]),
            VectorCollectionItem::new("7", vec![2.0]),
        ])
        .unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.get(7), Some(vec![1.0]));
    assert_eq!(collection.get("7"), Some(vec![2.0]));
}

#[test]
fn test_item_from_json_array() {
    let (_db, collection) = collection(3, VectorIndexMeasure::Dot);
    let item = VectorCollectionItem::from_array("doc", &serde_json::json!([1, 2.5, -3])).unwrap();
    collection.add(vec![item]).unwrap();

    assert_eq!(collection.get("doc"), Some(vec![1.0, 2.5, -3.0]));
}

#[test]
fn test_f64_query_is_narrowed() {
    let collection = abc_collection();
    let results = collection
        .find_nearest_from_array(&[3.0f64, 4.0], SearchOptions::new().with_limit(1))
        .unwrap();
    assert_eq!(result_ids(&results), vec![id("B")]);
}

#[test]
fn test_dimension_mismatch_on_add_keeps_prefix() {
    let collection = abc_collection();
    let err = collection
        .add(vec![
            VectorCollectionItem::new("D", vec![2.0, 2.0]),
            VectorCollectionItem::new("E", vec![2.0, 2.0, 2.0]),
        ])
        .unwrap_err();

    assert!(err.is_validation_error());
    assert!(collection.contains("D"));
    assert!(!collection.contains("E"));
    collection
        .with_index(|index| index.check_invariants())
        .unwrap();
}

#[test]
fn test_missing_query_id() {
    let collection = abc_collection();
    let err = collection
        .find_nearest_from_id("nope", SearchOptions::new())
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err, VectorError::item_not_found("nope"));
}

#[test]
fn test_within_ids_unknown_entries_are_ignored() {
    let collection = abc_collection();
    let results = collection
        .find_nearest_from_array(
            &[0.0f32, 0.0],
            SearchOptions::new().within(["ghost", "B", "phantom"]),
        )
        .unwrap();
    assert_eq!(result_ids(&results), vec![id("B")]);
}

#[test]
fn test_empty_collection_returns_nothing() {
    let (_db, collection) = collection(4, VectorIndexMeasure::Cosine);
    assert!(collection.is_empty());

    let results = collection
        .find_nearest_from_array(&[1.0f32, 0.0, 0.0, 0.0], SearchOptions::new())
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_non_finite_query_rejected() {
    let collection = abc_collection();
    let err = collection
        .find_nearest_from_array(&[f32::INFINITY, 0.0], SearchOptions::new())
        .unwrap_err();
    assert!(matches!(err, VectorError::InvalidVector { .. }));
}
