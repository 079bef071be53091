//! Runs the stores against a real Postgres. Needs `TEST_DATABASE_URL`:
//! `cargo test -p maze_db -- --ignored`

use std::sync::Arc;

use maze_app::{
    app::MazeApp,
    filters::{QuadrantFilter, SpotFilter},
    stores::{QuadrantStore, SpotStore},
};
use maze_db::{DbPool, PostgresStorage, bootstrap_database, establish_test_connection_pool};
use maze_types::{
    common::Coordinate,
    errors::{ApplicationError, ErrorKind},
    quadrant::{Quadrant, QuadrantType},
    spot::Spot,
};

async fn setup() -> Result<(DbPool, MazeApp, String), ApplicationError> {
    let pool = establish_test_connection_pool().await?;
    let db = format!("maze_test_{}", uuid::Uuid::new_v4().simple());
    bootstrap_database(&pool, &db).await?;

    let app = MazeApp::new(Arc::new(PostgresStorage::new(pool.clone())));
    Ok((pool, app, db))
}

async fn teardown(pool: &DbPool, db: &str) {
    sqlx::query(&format!("DROP SCHEMA \"{db}\" CASCADE"))
        .execute(pool)
        .await
        .unwrap();
}

fn top_right() -> Quadrant {
    Quadrant::new(
        QuadrantType::TopRight,
        Some(Coordinate::new(0, 0)),
        Some(Coordinate::new(25, 25)),
    )
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_create_hydrate_and_cascade_delete() -> Result<(), ApplicationError> {
    let (pool, app, db) = setup().await?;

    let quadrant_id = app.quadrants.create(&db, &top_right()).await?;
    let spot_id = app
        .spots
        .create(&db, &Spot::new("exit", "4000", Coordinate::new(9, 0), &quadrant_id))
        .await?;

    let quadrant = app.quadrants.get(&db, &QuadrantFilter::by_id(&quadrant_id)).await?;
    assert_eq!(quadrant.spot_ids, vec![spot_id.clone()]);
    assert_eq!(quadrant.spots.len(), 1);
    assert_eq!(quadrant.spots[0].id, spot_id);

    assert!(app.quadrants.delete(&db, &QuadrantFilter::by_id(&quadrant_id)).await?);

    let err = app.spots.get(&db, &SpotFilter::by_id(&spot_id)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    teardown(&pool, &db).await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_list_and_delete_by_quadrant() -> Result<(), ApplicationError> {
    let (pool, app, db) = setup().await?;

    let quadrant_id = app.quadrants.create(&db, &top_right()).await?;
    for (name, gold) in [("exit", "4000"), ("entrance", "9000")] {
        let spot = Spot::new(name, gold, Coordinate::new(0, 10), &quadrant_id);
        app.spots.create(&db, &spot).await?;
    }

    let spots = app.spots.list(&db, &SpotFilter::by_quadrant(&quadrant_id)).await?;
    assert_eq!(spots.len(), 2);

    assert!(app.spots.delete(&db, &SpotFilter::by_quadrant(&quadrant_id)).await?);

    let quadrant = app.quadrants.get(&db, &QuadrantFilter::by_id(&quadrant_id)).await?;
    assert!(quadrant.spot_ids.is_empty());
    assert!(app.spots.list(&db, &SpotFilter::by_quadrant(&quadrant_id)).await?.is_empty());

    teardown(&pool, &db).await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_reparent_and_partial_updates() -> Result<(), ApplicationError> {
    let (pool, app, db) = setup().await?;

    let from = app.quadrants.create(&db, &top_right()).await?;
    let to = app
        .quadrants
        .create(&db, &Quadrant::new(QuadrantType::BottomLeft, None, None))
        .await?;
    let spot_id = app
        .spots
        .create(&db, &Spot::new("exit", "4000", Coordinate::new(9, 0), &from))
        .await?;

    let patch = Spot {
        id: spot_id.clone(),
        quadrant_id: to.clone(),
        name: "moved".to_string(),
        ..Default::default()
    };
    let updated = app.spots.update(&db, &patch).await?;
    assert_eq!(updated.gold_amount, "4000");
    assert_eq!(updated.name, "moved");

    let from_quadrant = app.quadrants.get(&db, &QuadrantFilter::by_id(&from)).await?;
    let to_quadrant = app.quadrants.get(&db, &QuadrantFilter::by_id(&to)).await?;
    assert!(from_quadrant.spot_ids.is_empty());
    assert_eq!(to_quadrant.spot_ids, vec![spot_id]);

    let limit = Quadrant {
        id: from.clone(),
        limit_point: Some(Coordinate::new(25, 30)),
        ..Default::default()
    };
    let updated = app.quadrants.update(&db, &limit).await?;
    assert_eq!(updated.start_point, Some(Coordinate::new(0, 0)));
    assert_eq!(updated.limit_point, Some(Coordinate::new(25, 30)));

    teardown(&pool, &db).await;
    Ok(())
}
