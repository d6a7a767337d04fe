//! Scores and ordering under each measure, checked against a reference

use crate::common::*;

const MEASURES: [VectorIndexMeasure; 3] = [
    VectorIndexMeasure::L2,
    VectorIndexMeasure::Cosine,
    VectorIndexMeasure::Dot,
];

#[test]
fn test_scores_match_reference() {
    for measure in MEASURES {
        let (_db, collection) = collection(16, measure);
        let items = random_items(50, 16, 3);
        collection.add(items.clone()).unwrap();
        let query = seeded_vector(16, 1234);

        let results = collection
            .find_nearest_from_array(&query, SearchOptions::new())
            .unwrap();
        assert_eq!(results.len(), 50);
        assert_ranked(&results, measure);

        for result in &results {
            let item = items.iter().find(|i| i.id == result.id).unwrap();
            let expected = reference_score(&query, &item.vector, measure);
            assert!(
                (result.score - expected).abs() < 1e-4,
                "{}: {} scored {} but expected {}",
                measure,
                result.id,
                result.score,
                expected
            );
        }
    }
}

#[test]
fn test_self_query_ranks_first() {
    // Dot excluded: a longer vector can outscore the query's own row
    for measure in [VectorIndexMeasure::L2, VectorIndexMeasure::Cosine] {
        let (_db, collection) = collection(8, measure);
        collection.add(random_items(30, 8, 21)).unwrap();

        for key in [0i64, 13, 29] {
            let results = collection
                .find_nearest_from_id(key, SearchOptions::new().with_limit(1))
                .unwrap();
            assert_eq!(results[0].id, ItemId::from(key), "{}", measure);
        }
    }
}

#[test]
fn test_cosine_ignores_magnitude() {
    let (_db, collection) = collection(2, VectorIndexMeasure::Cosine);
    collection
        .add(vec![
            VectorCollectionItem::new("short", vec![1.0, 1.0]),
            VectorCollectionItem::new("long", vec![100.0, 100.0]),
            VectorCollectionItem::new("other", vec![1.0, -1.0]),
        ])
        .unwrap();

    let results = collection
        .find_nearest_from_array(&[2.0f32, 2.0], SearchOptions::new())
        .unwrap();
    assert!((results[0].score - 1.0).abs() < 1e-6);
    assert!((results[1].score - 1.0).abs() < 1e-6);
    assert_eq!(result_ids(&results[2..]), vec![id("other")]);
}

#[test]
fn test_dot_rewards_magnitude() {
    let (_db, collection) = collection(2, VectorIndexMeasure::Dot);
    collection
        .add(vec![
            VectorCollectionItem::new("short", vec![1.0, 1.0]),
            VectorCollectionItem::new("long", vec![100.0, 100.0]),
        ])
        .unwrap();

    let results = collection
        .find_nearest_from_id("short", SearchOptions::new())
        .unwrap();
    assert_eq!(result_ids(&results), vec![id("long"), id("short")]);
    assert_eq!(results[0].score, 200.0);
}

#[test]
fn test_zero_vector_under_cosine() {
    let (_db, collection) = collection(3, VectorIndexMeasure::Cosine);
    collection
        .add(vec![
            VectorCollectionItem::new("zero", vec![0.0, 0.0, 0.0]),
            VectorCollectionItem::new("x", vec![1.0, 0.0, 0.0]),
        ])
        .unwrap();

    let results = collection
        .find_nearest_from_id("zero", SearchOptions::new())
        .unwrap();
    assert!(results.iter().all(|r| r.score == 0.0));
    // All scores tie, so insertion order decides
    assert_eq!(result_ids(&results), vec![id("zero"), id("x")]);
}

#[test]
fn test_ties_resolve_by_insertion_order() {
    for measure in MEASURES {
        let (_db, collection) = collection(2, measure);
        let names = ["m", "c", "x", "a", "q"];
        collection
            .add(
                names
                    .iter()
                    .map(|n| VectorCollectionItem::new(*n, vec![1.0, 2.0])),
            )
            .unwrap();

        let results = collection
            .find_nearest_from_array(&[1.0f32, 2.0], SearchOptions::new().with_limit(3))
            .unwrap();
        assert_eq!(
            result_ids(&results),
            vec![id("m"), id("c"), id("x")],
            "{}",
            measure
        );
    }
}

#[test]
fn test_measure_names_parse() {
    assert_eq!(VectorIndexMeasure::parse("l2"), Some(VectorIndexMeasure::L2));
    assert_eq!(VectorIndexMeasure::parse("cosine"), Some(VectorIndexMeasure::Cosine));
    assert_eq!(VectorIndexMeasure::parse("dot"), Some(VectorIndexMeasure::Dot));
    assert_eq!(VectorIndexMeasure::parse("manhattan"), None);
    assert_eq!(VectorIndexMeasure::default(), VectorIndexMeasure::L2);
}
