#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use campus_resources_api::config::AppConfig;
use campus_resources_api::database::{InstitutionStore, MemoryStore};
use campus_resources_api::routes;
use campus_resources_api::state::AppState;

/// Router over a fresh in-memory store, driven in-process with `oneshot`
pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn InstitutionStore> = store.clone();
        let router = routes::app(AppState::new(shared), &AppConfig::from_env());
        Self { router, store }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&value)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("failed to read response body")?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| {
                format!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
            })?
        };
        Ok((status, value))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create an institution with one empty class, returning (institution_id, class_id)
    pub async fn seed_class(&self) -> Result<(String, String)> {
        let (status, body) = self
            .post("/educationalInstitutions", json!({ "name": "North High" }))
            .await?;
        assert_eq!(status, StatusCode::CREATED, "seed institution: {}", body);
        let institution_id = data_str(&body, "id")?;

        let (status, body) = self
            .post(
                &format!("/educationalInstitutions/{}/classes", institution_id),
                json!({ "name": "Algebra" }),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED, "seed class: {}", body);
        let class_id = data_str(&body, "id")?;

        Ok((institution_id, class_id))
    }
}

pub fn resources_uri(institution_id: &str, class_id: &str) -> String {
    format!(
        "/educationalInstitutions/{}/classes/{}/resources",
        institution_id, class_id
    )
}

pub fn resource_uri(institution_id: &str, class_id: &str, resource_id: &str) -> String {
    format!("{}/{}", resources_uri(institution_id, class_id), resource_id)
}

pub fn data_str(body: &Value, field: &str) -> Result<String> {
    body.get("data")
        .and_then(|d| d.get(field))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .with_context(|| format!("missing data.{} in {}", field, body))
}

/// A syntactically valid id that nothing in the store uses
pub fn unused_id() -> String {
    bson::oid::ObjectId::new().to_hex()
}
