use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::logic::{FieldError, FieldService};
use crate::model::{Field, FieldAttributes, FieldUpdate, FieldWithFormName, Id, NewField};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Map a service error to its HTTP status; only the message leaves the process
fn error_response(error: FieldError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &error {
        FieldError::NotFound(_) => StatusCode::NOT_FOUND,
        FieldError::Validation(_) => StatusCode::BAD_REQUEST,
        FieldError::Conflict { .. } => StatusCode::CONFLICT,
        FieldError::Internal { message, source } => {
            log::error!("{}: {:#}", message, source);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::new(&error.to_string())))
}

pub async fn get_fields_by_type<S: Store>(
    State(store): State<AppState<S>>,
    Path(field_type): Path<String>,
) -> ApiResult<Vec<Field>> {
    FieldService::new(&*store)
        .list_by_type(&field_type)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn get_fields_by_form_name<S: Store>(
    State(store): State<AppState<S>>,
    Path(form_name): Path<String>,
) -> ApiResult<Vec<Field>> {
    FieldService::new(&*store)
        .list_by_form_name(&form_name)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn get_fields_by_form_id<S: Store>(
    State(store): State<AppState<S>>,
    Path(form_id): Path<Id>,
) -> ApiResult<Vec<FieldWithFormName>> {
    FieldService::new(&*store)
        .list_by_form_id(&form_id)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn update_field<S: Store>(
    State(store): State<AppState<S>>,
    Path(field_id): Path<Id>,
    RequestJson(update): RequestJson<FieldUpdate>,
) -> ApiResult<Field> {
    FieldService::new(&*store)
        .update_by_id(&field_id, update)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn add_field<S: Store>(
    State(store): State<AppState<S>>,
    Path(form_name): Path<String>,
    RequestJson(new_field): RequestJson<NewField>,
) -> ApiResult<Field> {
    FieldService::new(&*store)
        .add_to_form(&form_name, new_field)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn delete_field<S: Store>(
    State(store): State<AppState<S>>,
    Path(field_id): Path<Id>,
) -> ApiResult<Field> {
    FieldService::new(&*store)
        .delete_by_id(&field_id)
        .await
        .map(Json)
        .map_err(error_response)
}

fn error_responses(codes: &[&str]) -> serde_json::Value {
    let mut responses = serde_json::Map::new();
    for code in codes {
        responses.insert(
            code.to_string(),
            serde_json::json!({
                "description": "Error",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            }),
        );
    }
    serde_json::Value::Object(responses)
}

fn with_ok(mut responses: serde_json::Value, schema: serde_json::Value) -> serde_json::Value {
    responses["200"] = serde_json::json!({
        "description": "Success",
        "content": { "application/json": { "schema": schema } }
    });
    responses
}

pub async fn get_openapi_spec() -> Json<serde_json::Value> {
    let attribute_properties: serde_json::Map<String, serde_json::Value> =
        match serde_json::to_value(FieldAttributes::default()) {
            Ok(serde_json::Value::Object(keys)) => keys
                .into_iter()
                .map(|(key, _)| (key, serde_json::json!({ "nullable": true })))
                .collect(),
            _ => serde_json::Map::new(),
        };

    let mut field_properties = attribute_properties.clone();
    for key in ["id", "formId", "columnId"] {
        field_properties.insert(key.to_string(), serde_json::json!({ "type": "string" }));
    }

    let mut update_properties = attribute_properties;
    for key in ["formId", "columnId"] {
        update_properties.insert(
            key.to_string(),
            serde_json::json!({ "type": "string", "nullable": true }),
        );
    }

    let field_ref = serde_json::json!({ "$ref": "#/components/schemas/Field" });
    let field_list = serde_json::json!({ "type": "array", "items": field_ref.clone() });

    Json(serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "PAS Field API",
            "version": "1.0.0",
            "description": "Lookup and maintenance of form field definitions"
        },
        "paths": {
            "/api/Pas/type/{type}": {
                "get": {
                    "summary": "List fields by type",
                    "responses": with_ok(error_responses(&["404", "500"]), field_list.clone())
                }
            },
            "/api/Pas/FormName/{formName}": {
                "get": {
                    "summary": "List fields of every form with this name",
                    "responses": with_ok(error_responses(&["404", "500"]), field_list)
                }
            },
            "/api/Pas/FormId/{formId}": {
                "get": {
                    "summary": "List fields of a form, each with the form name",
                    "responses": with_ok(
                        error_responses(&["404", "500"]),
                        serde_json::json!({
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/FieldWithFormName" }
                        })
                    )
                }
            },
            "/api/Pas/Id/{fieldId}": {
                "patch": {
                    "summary": "Partially update a field; null or absent attributes are left unchanged",
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/FieldUpdate" }
                            }
                        }
                    },
                    "responses": with_ok(error_responses(&["404", "409", "500"]), field_ref.clone())
                },
                "delete": {
                    "summary": "Delete a field and return the removed record",
                    "responses": with_ok(error_responses(&["404", "500"]), field_ref.clone())
                }
            },
            "/api/Pas/Add/{formName}": {
                "post": {
                    "summary": "Add a field to the first form with this name",
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Field" }
                            }
                        }
                    },
                    "responses": with_ok(error_responses(&["400", "404", "500"]), field_ref.clone())
                }
            },
            "/health": {
                "get": {
                    "summary": "Health check",
                    "responses": { "200": { "description": "Service is up" } }
                }
            }
        },
        "components": {
            "schemas": {
                "Field": { "type": "object", "properties": field_properties },
                "FieldUpdate": { "type": "object", "properties": update_properties },
                "FieldWithFormName": {
                    "type": "object",
                    "properties": {
                        "field": field_ref,
                        "formName": { "type": "string" }
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "required": ["error"],
                    "properties": { "error": { "type": "string" } }
                }
            }
        }
    }))
}
