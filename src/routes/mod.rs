//! HTTP route helpers: the centralized error-to-response mapping and
//! extractor error handlers shared by the whole application.

use actix_multipart::MultipartError;
use actix_web::error::{InternalError, JsonPayloadError, PayloadError};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tera::{Context, Tera};

use crate::forms::products::FieldError;
use crate::services::ServiceError;
use crate::services::images::UploadError;

pub mod pages;
pub mod products;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

#[derive(Serialize)]
struct ValidationErrorBody<'a> {
    error: &'a str,
    message: &'a str,
    details: &'a [FieldError],
}

fn error_body(status: actix_web::http::StatusCode, error: &str, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        error,
        message,
        details: None,
    })
}

/// 400 for syntactically invalid `:id` path parameters; storage is never
/// consulted for these.
pub fn invalid_id_response() -> HttpResponse {
    error_body(
        actix_web::http::StatusCode::BAD_REQUEST,
        "Invalid ID",
        "Please provide a valid product ID",
    )
}

pub fn validation_error_response(details: &[FieldError]) -> HttpResponse {
    HttpResponse::BadRequest().json(ValidationErrorBody {
        error: "Validation Error",
        message: "Please check your input data",
        details,
    })
}

pub fn upload_error_response(err: &UploadError) -> HttpResponse {
    use actix_web::http::StatusCode;

    match err {
        UploadError::NotAnImage => {
            error_body(StatusCode::BAD_REQUEST, "Invalid File", &err.to_string())
        }
        UploadError::TooLarge => {
            error_body(StatusCode::BAD_REQUEST, "File too large", &err.to_string())
        }
        UploadError::TooManyFiles => {
            error_body(StatusCode::BAD_REQUEST, "Too many files", &err.to_string())
        }
        UploadError::Image(_) | UploadError::Io(_) => {
            log::error!("Image processing error: {err}");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Image Processing Error",
                "Error processing image",
            )
        }
    }
}

/// Single funnel translating every [`ServiceError`] into the documented JSON
/// shape. `expose_details` gates database detail to development setups.
pub fn service_error_response(err: &ServiceError, expose_details: bool) -> HttpResponse {
    use actix_web::http::StatusCode;

    match err {
        ServiceError::Validation(details) => validation_error_response(details),
        ServiceError::NotFound => {
            error_body(StatusCode::NOT_FOUND, "Not Found", "Product not found")
        }
        ServiceError::Upload(upload) => upload_error_response(upload),
        ServiceError::Unauthorized => error_body(
            StatusCode::UNAUTHORIZED,
            "Invalid Token",
            "Please provide a valid token",
        ),
        ServiceError::Database(detail) => HttpResponse::InternalServerError().json(ErrorBody {
            error: "Database Error",
            message: "A database error occurred",
            details: expose_details.then_some(detail.as_str()),
        }),
        ServiceError::Internal => error_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Something went wrong on the server",
        ),
    }
}

/// Render a Tera template, degrading to an empty body on template errors.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(tera.render(template, context).unwrap_or_else(|e| {
            log::error!("Failed to render template '{template}': {e}");
            String::new()
        }))
}

/// Keep malformed JSON bodies in the same error shape as everything else.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_body(
        actix_web::http::StatusCode::BAD_REQUEST,
        "Validation Error",
        "Request body must be valid JSON",
    );
    InternalError::from_response(err, response).into()
}

/// Translate multipart extractor failures into the documented upload errors.
pub fn multipart_error_handler(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    let response = match &err {
        MultipartError::Payload(PayloadError::Overflow) => {
            upload_error_response(&UploadError::TooLarge)
        }
        // Per-field limit overflows arrive wrapped in the field error.
        MultipartError::Field { source, .. }
            if matches!(source.as_error::<PayloadError>(), Some(PayloadError::Overflow)) =>
        {
            upload_error_response(&UploadError::TooLarge)
        }
        MultipartError::DuplicateField(_) => upload_error_response(&UploadError::TooManyFiles),
        _ => error_body(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Invalid Request",
            "Malformed multipart request",
        ),
    };
    InternalError::from_response(err, response).into()
}
