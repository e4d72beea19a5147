use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    Json,
    response::IntoResponse,
};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};
use crate::error::{AppError, AppResult};
use crate::utils::api_response::{ResponseBuilder, ValidationErrorDetail};

pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // 1. JSON Extraction
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| match err {
                // Well-formed JSON that does not fit the payload type (bad enum tag, wrong type)
                JsonRejection::JsonDataError(e) => AppError::Validation(vec![ValidationErrorDetail {
                    field: "body".to_string(),
                    title: "invalid_value".to_string(),
                    message: e.body_text(),
                }])
                .into_response(),
                other => {
                    let message = format!("Invalid JSON format: {}", other.body_text());
                    ResponseBuilder::error::<()>(
                        StatusCode::BAD_REQUEST,
                        "INVALID_JSON",
                        &message,
                    ).into_response()
                }
            })?;

        // 2. Logic Validation
        validate_payload(&payload).map_err(IntoResponse::into_response)?;

        Ok(ValidatedJson(payload))
    }
}

pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                AppError::Validation(vec![ValidationErrorDetail {
                    field: "query".to_string(),
                    title: "invalid_value".to_string(),
                    message: err.body_text(),
                }])
                .into_response()
            })?;

        validate_payload(&params).map_err(IntoResponse::into_response)?;

        Ok(ValidatedQuery(params))
    }
}

/// Runs the derive-generated checks and converts failures into [`AppError::Validation`].
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(map_validation_errors(&e)))
}

// Flattens nested errors into dotted paths: `resources[1].url`
pub fn map_validation_errors(errors: &ValidationErrors) -> Vec<ValidationErrorDetail> {
    let mut details = Vec::new();
    collect_errors("", errors, &mut details);
    details.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.title.cmp(&b.title)));
    details
}

fn collect_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<ValidationErrorDetail>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push(ValidationErrorDetail {
                        field: path.clone(),
                        title: err.code.to_string(), // Uses "is_required", "url", etc.
                        message: err
                            .message
                            .clone()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Invalid value".to_string()),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}
