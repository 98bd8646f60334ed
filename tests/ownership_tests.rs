mod test_utils;

use axum::http::StatusCode;
use serde_json::json;
use test_utils::{TestApp, user_token};

#[tokio::test]
async fn saved_properties_require_a_session() {
    let app = TestApp::new().await.unwrap();
    let property_id = app.create_property(json!({})).await;

    let (status, _) = app.get("/saved-properties", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/saved-properties", None, json!({ "propertyId": property_id }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn saving_twice_conflicts() {
    let app = TestApp::new().await.unwrap();
    let property_id = app.create_property(json!({})).await;
    let token = user_token("user-1");

    let (status, saved) = app
        .post(
            "/saved-properties",
            Some(&token),
            json!({ "propertyId": property_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["userId"], "user-1");

    let (status, error) = app
        .post(
            "/saved-properties",
            Some(&token),
            json!({ "propertyId": property_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CONFLICT");

    // A different user may save the same listing.
    let other = user_token("user-2");
    let (status, _) = app
        .post(
            "/saved-properties",
            Some(&other),
            json!({ "propertyId": property_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn saving_requires_an_existing_listing() {
    let app = TestApp::new().await.unwrap();
    let token = user_token("user-1");

    let (status, error) = app.post("/saved-properties", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["missing"], json!(["propertyId"]));

    let (status, _) = app
        .post(
            "/saved-properties",
            Some(&token),
            json!({ "propertyId": uuid::Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saved_list_is_scoped_and_embeds_listing() {
    let app = TestApp::new().await.unwrap();
    let property_id = app.create_property(json!({})).await;
    let mine = user_token("user-1");
    let theirs = user_token("user-2");

    app.post(
        "/saved-properties",
        Some(&mine),
        json!({ "propertyId": property_id }),
    )
    .await;

    let (status, saved) = app.get("/saved-properties", Some(&mine)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved.as_array().unwrap().len(), 1);
    assert_eq!(saved[0]["property"]["id"], property_id.as_str());
    assert_eq!(saved[0]["property"]["neighborhood"], "The Fan");

    let (_, other) = app.get("/saved-properties", Some(&theirs)).await;
    assert_eq!(other, json!([]));
}

#[tokio::test]
async fn only_the_owner_may_remove_a_saved_property() {
    let app = TestApp::new().await.unwrap();
    let property_id = app.create_property(json!({})).await;
    let owner = user_token("user-1");
    let intruder = user_token("user-2");

    let (_, saved) = app
        .post(
            "/saved-properties",
            Some(&owner),
            json!({ "propertyId": property_id }),
        )
        .await;
    let uri = format!("/saved-properties/{}", saved["id"].as_str().unwrap());

    let (status, error) = app.delete(&uri, Some(&intruder)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["message"], "You do not own this resource");

    let (status, _) = app.delete(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_alerts_are_private_to_their_owner() {
    let app = TestApp::new().await.unwrap();
    let owner = user_token("user-1");
    let intruder = user_token("user-2");

    let (status, alert) = app
        .post(
            "/search-alerts",
            Some(&owner),
            json!({ "name": "Cheap condos", "maxPrice": 250000, "propertyType": "Condo" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/search-alerts/{}", alert["id"].as_str().unwrap());

    let (status, _) = app.get(&uri, Some(&intruder)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .patch(&uri, Some(&intruder), json!({ "name": "Mine now" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, Some(&intruder)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, theirs) = app.get("/search-alerts", Some(&intruder)).await;
    assert_eq!(theirs, json!([]));

    let (status, fetched) = app.get(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Cheap condos");

    let missing = format!("/search-alerts/{}", uuid::Uuid::new_v4());
    let (status, _) = app.delete(&missing, Some(&owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saved_properties_are_listed_newest_first() {
    let app = TestApp::new().await.unwrap();
    let token = user_token("user-1");

    let mut saved_order = Vec::new();
    for _ in 0..3 {
        let property_id = app.create_property(json!({})).await;
        let (status, response, _) = app
            .send(
                "POST",
                "/saved-properties",
                Some(&token),
                Some(json!({ "propertyId": property_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(response.headers().get(axum::http::header::LOCATION).is_none());
        saved_order.push(property_id);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (_, saved) = app.get("/saved-properties", Some(&token)).await;
    let listed: Vec<&str> = saved
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["propertyId"].as_str().unwrap())
        .collect();
    let expected: Vec<&str> = saved_order.iter().rev().map(String::as_str).collect();
    assert_eq!(listed, expected);
}
