//! HTTP routes. Every response body is JSON: the prediction or `{"error": ...}`.
use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use twinfer_classifiers::error::PredictError;
use twinfer_classifiers::predictor::Predictor;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// A request failure converted to its HTTP status at the boundary.
#[derive(Debug)]
pub struct ApiError(pub PredictError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.0.to_string(),
        })
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        ApiError(err)
    }
}

/// `POST /predict`. The body is decoded here rather than by an extractor so
/// malformed JSON gets the same error payload as any other failure.
pub async fn predict(
    predictor: web::Data<Predictor>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    match predictor.predict_json(&body) {
        Ok(prediction) => Ok(HttpResponse::Ok().json(prediction)),
        Err(err) => {
            log::debug!("[twinfer::routes] Prediction request failed: {}", err);
            Err(err.into())
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(predict)));
}
