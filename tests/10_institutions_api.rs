mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{data_str, unused_id, TestApp};

#[tokio::test]
async fn health_reports_ok_on_memory_store() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_and_show_institution() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app
        .post("/educationalInstitutions", json!({ "name": "North High" }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let id = data_str(&body, "id")?;
    assert_eq!(body["data"]["classes"], json!([]));

    let (status, body) = app.get(&format!("/educationalInstitutions/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "North High");

    let (status, body) = app.get("/educationalInstitutions").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn classes_are_listed_in_insertion_order() -> Result<()> {
    let app = TestApp::new();
    let (institution_id, _) = app.seed_class().await?;
    let uri = format!("/educationalInstitutions/{}/classes", institution_id);
    app.post(&uri, json!({ "name": "Biology" })).await?;

    let (status, body) = app.get(&uri).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Algebra", "Biology"]);
    Ok(())
}

#[tokio::test]
async fn unknown_institution_is_404() -> Result<()> {
    let app = TestApp::new();
    let missing = unused_id();
    let (status, body) = app.get(&format!("/educationalInstitutions/{}", missing)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Institution {} not found", missing));

    let (status, _) = app
        .post(
            &format!("/educationalInstitutions/{}/classes", missing),
            json!({ "name": "Algebra" }),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_institution_id_is_400() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get("/educationalInstitutions/not-an-object-id").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["institution_id"].is_string());
    Ok(())
}

#[tokio::test]
async fn client_supplied_institution_id_is_rejected() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/educationalInstitutions",
            json!({ "_id": unused_id(), "name": "North High" }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}
