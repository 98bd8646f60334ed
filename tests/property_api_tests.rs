mod test_utils;

use axum::http::{StatusCode, header};
use serde_json::json;
use test_utils::{TestApp, admin_token, property_body, user_token};

fn ids(listings: &serde_json::Value) -> Vec<String> {
    let mut ids: Vec<String> = listings
        .as_array()
        .unwrap()
        .iter()
        .map(|listing| listing["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}

#[tokio::test]
async fn create_then_fetch_listing() {
    let app = TestApp::new().await.unwrap();

    let (status, response, created) = app
        .send("POST", "/properties", None, Some(property_body()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap();
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        format!("/properties/{id}").as_str()
    );
    assert_eq!(created["zipCode"], "23220");
    assert_eq!(created["isOffMarket"], false);
    assert_eq!(created["isDistressed"], false);
    assert_eq!(created["features"], json!(["Hardwood Floors", "Fireplace"]));

    let (status, fetched) = app.get(&format!("/properties/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["title"], created["title"]);
    assert_eq!(fetched["bathrooms"], 2.5);
}

#[tokio::test]
async fn create_reports_every_missing_field() {
    let app = TestApp::new().await.unwrap();

    let (status, error) = app
        .post("/properties", None, json!({ "title": "Half a listing", "price": 100000 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_FAILED");
    let missing = error["details"]["missing"].as_array().unwrap();
    assert!(missing.contains(&json!("zipCode")));
    assert!(missing.contains(&json!("squareFeet")));
    assert!(!missing.contains(&json!("title")));

    let (_, listings) = app.get("/properties", None).await;
    assert_eq!(listings, json!([]));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = TestApp::new().await.unwrap();

    let (status, error) = app
        .post("/properties", None, json!({ "title": "x", "price": "cheap" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["traceId"].is_string());
}

#[tokio::test]
async fn filters_combine_with_and() {
    let app = TestApp::new().await.unwrap();

    let cheap_condo = app
        .create_property(json!({
            "price": 180000,
            "propertyType": "Condo",
            "neighborhood": "Church Hill",
            "bedrooms": 1,
            "bathrooms": 1
        }))
        .await;
    let big_house = app
        .create_property(json!({
            "price": 650000,
            "propertyType": "Single-Family Home",
            "neighborhood": "Church Hill",
            "bedrooms": 4,
            "bathrooms": 3.5
        }))
        .await;
    let mid_house = app
        .create_property(json!({
            "price": 320000,
            "propertyType": "Single-Family Home",
            "neighborhood": "Northside",
            "bedrooms": 3,
            "bathrooms": 2
        }))
        .await;

    let (status, all) = app.get("/properties", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&all),
        sorted(vec![cheap_condo.clone(), big_house.clone(), mid_house.clone()])
    );

    let (_, by_price) = app
        .get("/properties?minPrice=200000&maxPrice=700000", None)
        .await;
    assert_eq!(ids(&by_price), sorted(vec![big_house.clone(), mid_house.clone()]));

    let (_, combined) = app
        .get(
            "/properties?neighborhood=Church%20Hill&propertyType=Single-Family%20Home",
            None,
        )
        .await;
    assert_eq!(ids(&combined), vec![big_house.clone()]);

    let (_, roomy) = app.get("/properties?bedrooms=3&bathrooms=2.5", None).await;
    assert_eq!(ids(&roomy), vec![big_house]);

    let (_, none) = app
        .get("/properties?neighborhood=Northside&maxPrice=100000", None)
        .await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn flag_filters_require_exact_true() {
    let app = TestApp::new().await.unwrap();

    let off_market = app
        .create_property(json!({ "isOffMarket": true }))
        .await;
    let distressed = app
        .create_property(json!({
            "isDistressed": true,
            "distressedType": "Foreclosure",
            "discountPercentage": 18.5
        }))
        .await;
    let regular = app.create_property(json!({})).await;

    let (_, only_off_market) = app.get("/properties?isOffMarket=true", None).await;
    assert_eq!(ids(&only_off_market), vec![off_market.clone()]);

    let (_, only_distressed) = app.get("/properties?isDistressed=true", None).await;
    assert_eq!(ids(&only_distressed), vec![distressed.clone()]);
    assert_eq!(only_distressed[0]["distressedType"], "Foreclosure");

    let (_, unfiltered) = app.get("/properties?isOffMarket=false", None).await;
    assert_eq!(ids(&unfiltered), sorted(vec![off_market, distressed, regular]));
}

#[tokio::test]
async fn unknown_listing_is_not_found() {
    let app = TestApp::new().await.unwrap();
    let missing = uuid::Uuid::new_v4();

    let (status, error) = app.get(&format!("/properties/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Property not found");

    let (status, _) = app.delete(&format!("/properties/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/properties/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_updates_only_given_fields() {
    let app = TestApp::new().await.unwrap();
    let id = app
        .create_property(json!({ "isDistressed": true, "distressedType": "Probate" }))
        .await;

    let (status, updated) = app
        .patch(
            &format!("/properties/{id}"),
            None,
            json!({ "price": 425000, "distressedType": null }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 425000.0);
    assert_eq!(updated["distressedType"], serde_json::Value::Null);
    assert_eq!(updated["title"], "Renovated Fan District Rowhouse");
    assert_eq!(updated["isDistressed"], true);
}

#[tokio::test]
async fn delete_removes_listing() {
    let app = TestApp::new().await.unwrap();
    let id = app.create_property(json!({})).await;

    let (status, body) = app.delete(&format!("/properties/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = app.get(&format!("/properties/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_writes_can_be_restricted_to_admins() {
    let app = TestApp::with_config(brokerage::config::AppConfig {
        catalog_writes_require_admin: true,
        ..test_utils::test_config()
    })
    .await
    .unwrap();

    let (status, _) = app.post("/properties", None, property_body()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = user_token("user-1");
    let (status, error) = app.post("/properties", Some(&user), property_body()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["message"], "Admin access required");

    let admin = admin_token();
    let (status, _) = app.post("/properties", Some(&admin), property_body()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listings) = app.get("/properties", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn listings_are_returned_newest_first() {
    let app = TestApp::new().await.unwrap();

    let mut created = Vec::new();
    for price in [200000, 300000, 400000, 500000] {
        created.push(app.create_property(json!({ "price": price })).await);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, listings) = app.get("/properties", None).await;
    assert_eq!(status, StatusCode::OK);

    let returned: Vec<&str> = listings
        .as_array()
        .unwrap()
        .iter()
        .map(|listing| listing["id"].as_str().unwrap())
        .collect();
    let expected: Vec<&str> = created.iter().rev().map(String::as_str).collect();
    assert_eq!(returned, expected);
}

#[tokio::test]
async fn repeated_query_parameters_use_the_first_value() {
    let app = TestApp::new().await.unwrap();
    app.create_property(json!({ "isOffMarket": true, "price": 150000 }))
        .await;
    app.create_property(json!({ "price": 800000 })).await;

    let (status, listings) = app
        .get("/properties?isOffMarket=TRUE&isOffMarket=true", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listings.as_array().unwrap().len(), 2);

    let (status, listings) = app
        .get("/properties?maxPrice=200000&maxPrice=900000", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listings.as_array().unwrap().len(), 1);
    assert_eq!(listings[0]["price"], 150000.0);
}

#[tokio::test]
async fn patch_rejects_blank_required_text() {
    let app = TestApp::new().await.unwrap();
    let id = app.create_property(json!({})).await;
    let uri = format!("/properties/{id}");

    let (status, error) = app
        .patch(&uri, None, json!({ "title": "  ", "city": "", "price": 1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_FAILED");
    assert_eq!(error["details"]["blank"], json!(["title", "city"]));

    let (_, stored) = app.get(&uri, None).await;
    assert_eq!(stored["title"], "Renovated Fan District Rowhouse");
    assert_eq!(stored["price"], 450000.0);
}
