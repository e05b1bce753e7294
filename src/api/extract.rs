use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::models::ApiResponse;

/// A car payload read from a JSON or form-encoded body
///
/// Bodies that are empty, or sent with any other content type, yield
/// `T::default()`, the same as sending `{}`.
#[derive(Debug, Clone, Default)]
pub struct CarPayload<T>(pub T);

/// Body that claimed a supported content type but could not be parsed
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct PayloadRejection(String);

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(ApiResponse::<()>::failure(self.0))).into_response()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(content_type: Option<&HeaderValue>) -> BodyKind {
    let essence = content_type
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
    {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

#[async_trait::async_trait]
impl<S, T> FromRequest<S> for CarPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = body_kind(req.headers().get(CONTENT_TYPE));
        let method = req.method().clone();

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| PayloadRejection(rejection.body_text()))?;

        if kind == BodyKind::Other || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(CarPayload(T::default()));
        }

        match kind {
            BodyKind::Json => Json::<T>::from_bytes(&bytes)
                .map(|Json(value)| CarPayload(value))
                .map_err(|rejection| PayloadRejection(rejection.body_text())),
            BodyKind::Form => {
                let mut form_request = Request::new(Body::from(bytes));
                *form_request.method_mut() = method;
                form_request.headers_mut().insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );

                Form::<T>::from_request(form_request, state)
                    .await
                    .map(|Form(value)| CarPayload(value))
                    .map_err(|rejection| PayloadRejection(rejection.body_text()))
            }
            BodyKind::Other => Ok(CarPayload(T::default())),
        }
    }
}
