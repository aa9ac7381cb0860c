mod common;

use common::{TestApp, SALES_HEADER};
use reqwest::StatusCode;

#[tokio::test]
async fn upload_sales_data_works() {
    let app = TestApp::spawn().await;

    let response = app
        .upload_csv(
            "sales.csv",
            "Product_Name,Quantity,Price_Per_Unit\nWidget,3,2.50\n",
        )
        .await;

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["fileName"], "sales.csv");
    assert_eq!(body["totalRecords"], 1);
    assert_eq!(body["totalQuantity"], 3);
    assert_eq!(body["totalRevenue"], 7.5);
    assert_eq!(body["details"][0]["product"], "Widget");
    assert_eq!(body["details"][0]["quantity"], 3);
    assert_eq!(body["details"][0]["price"], 2.5);
    assert_eq!(body["details"][0]["revenue"], 7.5);
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body["timestamp"].as_str().is_some());

    assert_eq!(app.store.count().await, 1);
}

#[tokio::test]
async fn totals_cover_every_row_in_file_order() {
    let app = TestApp::spawn().await;

    let csv = "price_per_unit,notes,QUANTITY,product_name\n\
               1.25,promo,4,Bolt\n\
               10,,2,Gear\n\
               0.5,bulk,10,Washer\n";
    let response = app.upload_csv("parts.csv", csv).await;
    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["totalRecords"], 3);
    assert_eq!(body["totalQuantity"], 16);
    let revenue = body["totalRevenue"].as_f64().unwrap();
    assert!((revenue - 30.0).abs() < 1e-9, "revenue was {}", revenue);

    let products: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["product"].as_str().unwrap())
        .collect();
    assert_eq!(products, vec!["Bolt", "Gear", "Washer"]);
}

#[tokio::test]
async fn missing_header_returns_400_and_stores_nothing() {
    let app = TestApp::spawn().await;

    let response = app
        .upload_csv("bad.csv", "product_name,quantity\nWidget,3\n")
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert_eq!(
        response.text().await.unwrap(),
        "Missing required headers: product, quantity, price"
    );
    assert!(app.list_summaries().await.is_empty());
}

#[tokio::test]
async fn non_numeric_quantity_returns_400_and_stores_nothing() {
    let app = TestApp::spawn().await;

    let csv = format!("{}\nWidget,3,2.50\nGadget,many,1.00\n", SALES_HEADER);
    let response = app.upload_csv("bad.csv", &csv).await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    let text = response.text().await.unwrap();
    assert!(
        text.starts_with("CSV parsing failed: line 3: invalid quantity 'many'"),
        "unexpected body: {}",
        text
    );
    assert_eq!(app.store.count().await, 0);
}

#[tokio::test]
async fn non_numeric_price_returns_400_and_stores_nothing() {
    let app = TestApp::spawn().await;

    let csv = format!("{}\nWidget,3,free\n", SALES_HEADER);
    let response = app.upload_csv("bad.csv", &csv).await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert!(response
        .text()
        .await
        .unwrap()
        .starts_with("CSV parsing failed:"));
    assert_eq!(app.store.count().await, 0);
}

#[tokio::test]
async fn failed_upload_leaves_service_usable() {
    let app = TestApp::spawn().await;

    let bad = app.upload_csv("bad.csv", "nonsense\n").await;
    assert_eq!(StatusCode::BAD_REQUEST, bad.status());

    let csv = format!("{}\nWidget,1,1.00\n", SALES_HEADER);
    let good = app.upload_csv("good.csv", &csv).await;
    assert_eq!(StatusCode::OK, good.status());

    assert_eq!(app.list_summaries().await.len(), 1);
}

#[tokio::test]
async fn identical_uploads_get_distinct_ids() {
    let app = TestApp::spawn().await;
    let csv = format!("{}\nWidget,3,2.50\n", SALES_HEADER);

    let first: serde_json::Value = app.upload_csv("same.csv", &csv).await.json().await.unwrap();
    let second: serde_json::Value = app.upload_csv("same.csv", &csv).await.json().await.unwrap();

    assert_ne!(first["id"], second["id"]);
    assert_eq!(first["details"], second["details"]);
}

#[tokio::test]
async fn non_finite_prices_return_400_and_store_nothing() {
    let app = TestApp::spawn().await;

    for price in ["inf", "NaN", "-infinity"] {
        let csv = format!("{}\nWidget,3,{}\n", SALES_HEADER, price);
        let response = app.upload_csv("bad.csv", &csv).await;

        assert_eq!(
            StatusCode::BAD_REQUEST,
            response.status(),
            "price '{}' was accepted",
            price
        );
        let text = response.text().await.unwrap();
        assert!(
            text.starts_with(&format!(
                "CSV parsing failed: line 2: invalid price '{}'",
                price
            )),
            "unexpected body: {}",
            text
        );
    }

    assert_eq!(app.store.count().await, 0);
}

#[tokio::test]
async fn revenue_overflow_returns_400_and_stores_nothing() {
    let app = TestApp::spawn().await;

    let csv = format!("{}\nWidget,3,1e308\n", SALES_HEADER);
    let response = app.upload_csv("huge.csv", &csv).await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert!(response
        .text()
        .await
        .unwrap()
        .starts_with("CSV parsing failed: line 2: revenue out of range"));
    assert_eq!(app.store.count().await, 0);
}

#[tokio::test]
async fn invalid_utf8_product_is_replaced_not_rejected() {
    let app = TestApp::spawn().await;

    let mut csv = format!("{}\n", SALES_HEADER).into_bytes();
    csv.extend_from_slice(b"Caf\xe9,2,1.50\n");
    let response = app.upload_bytes("latin1.csv", csv).await;

    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["details"][0]["product"], "Caf\u{FFFD}");
    assert_eq!(body["totalQuantity"], 2);
    assert_eq!(app.store.count().await, 1);
}

#[tokio::test]
async fn empty_file_returns_missing_headers() {
    let app = TestApp::spawn().await;

    let response = app.upload_bytes("empty.csv", Vec::new()).await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert_eq!(
        response.text().await.unwrap(),
        "Missing required headers: product, quantity, price"
    );
    assert_eq!(app.store.count().await, 0);
}
