use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;
use catalog_products::{ProductError, StoreError};

pub fn product_error_to_response(err: ProductError) -> axum::response::Response {
    let status = product_error_status(&err);
    if !err.is_rejection() {
        tracing::error!(error = %err, "product store failure");
    }
    json_error(status, err.code(), err.to_string())
}

pub fn product_error_status(err: &ProductError) -> StatusCode {
    match err {
        ProductError::NotFound(_) => StatusCode::NOT_FOUND,
        ProductError::AlreadyExists(_) => StatusCode::CONFLICT,
        ProductError::StockOutOfRange { .. } => StatusCode::BAD_REQUEST,
        ProductError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        ProductError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ProductId;

    #[test]
    fn rejections_map_to_client_errors() {
        assert_eq!(
            product_error_status(&ProductError::NotFound(ProductId::new(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            product_error_status(&ProductError::AlreadyExists("agua".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            product_error_status(&ProductError::StockOutOfRange { stock: 11, ceiling: 10 }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_failures_map_to_server_errors() {
        assert_eq!(
            product_error_status(&StoreError::Unavailable("down".into()).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            product_error_status(&StoreError::MissingId.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn only_store_failures_are_logged_as_server_errors() {
        let errors = [
            ProductError::NotFound(ProductId::new(1)),
            ProductError::AlreadyExists("agua".into()),
            ProductError::StockOutOfRange { stock: 10, ceiling: 10 },
            StoreError::DuplicateName("agua".into()).into(),
            StoreError::Unavailable("down".into()).into(),
            StoreError::Backend("boom".into()).into(),
            StoreError::MissingId.into(),
        ];
        for err in errors {
            assert_eq!(
                !err.is_rejection(),
                product_error_status(&err).is_server_error(),
                "{err:?}"
            );
        }
    }
}
