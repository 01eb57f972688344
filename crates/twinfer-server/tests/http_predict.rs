//! HTTP contract tests for `POST /predict` using actix-web's test harness.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use twinfer_classifiers::models::gradient_boosting::GradientBoostingClassifier;
use twinfer_classifiers::models::random_forest::RandomForestClassifier;
use twinfer_classifiers::models::tree::{DecisionTree, Node};
use twinfer_classifiers::predictor::{Predictor, SchemaCheck};
use twinfer_server::routes::{self, ErrorBody};

fn stump(feature: usize, threshold: f64, left: Vec<f64>, right: Vec<f64>) -> DecisionTree {
    DecisionTree::new(vec![
        Node::Split {
            feature,
            threshold,
            left: 1,
            right: 2,
        },
        Node::Leaf { value: left },
        Node::Leaf { value: right },
    ])
}

fn predictor() -> Predictor {
    let features = vec!["f1".to_string(), "f2".to_string()];
    let rf = RandomForestClassifier::new(
        features.clone(),
        vec![0, 1],
        vec![
            stump(0, 1.0, vec![8.0, 2.0], vec![1.0, 3.0]),
            stump(1, 0.0, vec![5.0, 5.0], vec![0.0, 6.0]),
        ],
    )
    .unwrap();
    let gb = GradientBoostingClassifier::new(
        features,
        vec![0, 1],
        0.5,
        -1.0,
        vec![stump(0, 1.0, vec![-1.0], vec![3.0])],
    )
    .unwrap();
    Predictor::new(Box::new(rf), Box::new(gb), SchemaCheck::Strict).unwrap()
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(predictor()))
                .configure(routes::configure),
        )
        .await
    };
}

fn post(body: &'static str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/predict")
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
}

// ---------------------------------------------------------------------------
// Success
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn predicts_with_random_forest_case_insensitively() {
    let app = app!();
    let resp = test::call_service(
        &app,
        post(r#"{"model": "RANDOM_FOREST", "f1": 2.0}"#).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"model": "random_forest", "prediction": 1, "probability": 0.625})
    );
}

#[actix_web::test]
async fn empty_object_uses_random_forest_on_zero_vector() {
    let app = app!();
    let resp = test::call_service(&app, post("{}").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"model": "random_forest", "prediction": 0, "probability": 0.35})
    );
}

#[actix_web::test]
async fn predicts_with_gradient_boosting() {
    let app = app!();
    let resp = test::call_service(
        &app,
        post(r#"{"model": "gradient_boosting", "f1": 5}"#).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["model"], json!("gradient_boosting"));
    assert_eq!(body["prediction"], json!(1));
    assert_eq!(body["probability"], json!(0.6225));
}

#[actix_web::test]
async fn body_is_accepted_without_json_content_type() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_payload(r#"{"f2": 1}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn invalid_model_is_bad_request() {
    let app = app!();
    let resp = test::call_service(&app, post(r#"{"model": "svm"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(
        body.error,
        "Invalid model type. Use 'random_forest' or 'gradient_boosting'."
    );
}

#[actix_web::test]
async fn uncoercible_feature_is_internal_error() {
    let app = app!();
    let resp = test::call_service(
        &app,
        post(r#"{"model": "gradient_boosting", "f1": "not-a-number"}"#).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "could not convert string to float: 'not-a-number'");
}

#[actix_web::test]
async fn malformed_json_is_internal_error() {
    let app = app!();
    let resp = test::call_service(&app, post("{\"model\": ").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.starts_with("Failed to decode JSON object"));
}

#[actix_web::test]
async fn non_object_body_is_internal_error() {
    let app = app!();
    let resp = test::call_service(&app, post("[1, 2]").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.contains("JSON object"));
}

#[actix_web::test]
async fn other_methods_are_not_allowed() {
    let app = app!();
    let req = test::TestRequest::get().uri("/predict").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn unknown_path_is_not_found() {
    let app = app!();
    let req = test::TestRequest::post().uri("/score").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
