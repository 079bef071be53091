
use reqwest::StatusCode;
use serde_json::{Value, json};

use maze_app::test_utils::tests::assert_relationships;
use maze_types::errors::ApplicationError;

use crate::test_utils::tests::{TEST_DB, setup_web_app};

#[tokio::test]
async fn test_quadrant_lifecycle_with_spots() -> Result<(), ApplicationError> {
    let server = setup_web_app().await?;

    let res = server
        .client
        .post(server.url("/quadrant/create"))
        .json(&json!({
            "type": "TOP_RIGHT",
            "start_point": {"x": 0, "y": 0},
            "limit_point": {"x": 25, "y": 25}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let quadrant: Value = res.json().await.unwrap();
    let quadrant_id = quadrant["id"].as_str().unwrap().to_string();
    assert_eq!(quadrant["type"], "TOP_RIGHT");
    assert_eq!(quadrant["spot_ids"], json!([]));

    let res = server
        .client
        .post(server.url("/spot/create"))
        .json(&json!({
            "name": "entrance",
            "gold_amount": "1000",
            "coordinate": {"x": 3, "y": 4},
            "quadrant_id": quadrant_id
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let spot: Value = res.json().await.unwrap();
    let spot_id = spot["id"].as_str().unwrap().to_string();

    let res = server
        .client
        .get(server.url(&format!("/quadrant/read/{quadrant_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let read: Value = res.json().await.unwrap();
    assert_eq!(read["spot_ids"], json!([spot_id]));
    assert_eq!(read["spots"][0]["name"], "entrance");
    assert_eq!(read["spots"][0]["gold_amount"], "1000");
    assert_relationships(&server.storage, TEST_DB);

    let res = server
        .client
        .delete(server.url(&format!("/quadrant/delete/{quadrant_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({}));

    let res = server
        .client
        .get(server.url(&format!("/spot/read/{spot_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["error"],
        format!("Spot with ID {spot_id} not found"),
        "Spot should be removed with its quadrant"
    );
    assert!(server.storage.quadrants_in(TEST_DB).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_quadrant_partial_update() -> Result<(), ApplicationError> {
    let server = setup_web_app().await?;

    let quadrant: Value = server
        .client
        .post(server.url("/quadrant/create"))
        .json(&json!({
            "type": "BOTTOM_LEFT",
            "start_point": {"x": 0, "y": 26},
            "limit_point": {"x": 25, "y": 50}
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let quadrant_id = quadrant["id"].as_str().unwrap();

    let res = server
        .client
        .patch(server.url("/quadrant/update"))
        .json(&json!({
            "id": quadrant_id,
            "limit_point": {"x": 30, "y": 60}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["type"], "BOTTOM_LEFT");
    assert_eq!(updated["start_point"], json!({"x": 0, "y": 26}));
    assert_eq!(updated["limit_point"], json!({"x": 30, "y": 60}));

    let stored = server.storage.quadrants_in(TEST_DB);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].limit_point.map(|p| p.y), Some(60));

    Ok(())
}

#[tokio::test]
async fn test_quadrant_errors_are_bad_requests() -> Result<(), ApplicationError> {
    let server = setup_web_app().await?;

    let res = server
        .client
        .get(server.url("/quadrant/read/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "param :id must not be empty"})
    );

    let res = server
        .client
        .get(server.url("/quadrant/read/garbage"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Wrong id 'garbage'"})
    );

    let res = server
        .client
        .post(server.url("/quadrant/create"))
        .header("content-type", "application/json")
        .body("{\"type\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string(), "Malformed JSON should report an error");

    let res = server
        .client
        .patch(server.url("/quadrant/update"))
        .json(&json!({"limit_point": {"x": 1, "y": 1}}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(server.storage.quadrants_in(TEST_DB).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_quadrant_create_does_not_echo_spots() -> Result<(), ApplicationError> {
    let server = setup_web_app().await?;

    let res = server
        .client
        .post(server.url("/quadrant/create"))
        .json(&json!({
            "type": "TOP_LEFT",
            "spots": [{"name": "ghost", "gold_amount": "5"}]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = res.json().await.unwrap();
    assert!(created.get("spots").is_none(), "Unsaved spots should not be returned");
    assert_eq!(created["spot_ids"], json!([]));
    assert!(server.storage.spots_in(TEST_DB).is_empty());

    Ok(())
}
