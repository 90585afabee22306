use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde::Serialize;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display("{}", _0)]
    NotFound(String),
    #[display("{}", _0)]
    BadRequest(String),
    #[display("{}", _0)]
    Internal(String),
}

#[derive(Serialize)]
struct ErrBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrBody {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepoErr {
    #[error("duplicate orderID: \"{0}\"")]
    DuplicateOrderId(String),
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Request body must be an object with the order data and a property called 'products'. See /api/ for more details.")]
    MissingProducts,
    #[error("The order must contain at least one product.")]
    EmptyProducts,
    #[error("Object id did not match any users in the database: \"{0}\"")]
    UserNotFound(String),
    #[error("Order not found")]
    NotFound,
    #[error("Invalid status")]
    InvalidStatus,
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Repo(#[from] RepoErr),
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        let msg = err.to_string();
        match err {
            OrderError::NotFound | OrderError::UserNotFound(_) => {
                tracing::debug!(err = %msg, "not found");
                Self::NotFound(msg)
            }
            OrderError::Repo(RepoErr::Mongo(_)) | OrderError::Repo(RepoErr::Backend(_)) => {
                tracing::error!(err = %msg, "order store failure");
                Self::Internal(msg)
            }
            OrderError::MissingProducts
            | OrderError::EmptyProducts
            | OrderError::InvalidStatus
            | OrderError::Invalid(_)
            | OrderError::Repo(RepoErr::DuplicateOrderId(_)) => {
                tracing::debug!(err = %msg, "rejected request");
                Self::BadRequest(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn order_errors_map_to_status_codes() {
        let cases = [
            (OrderError::MissingProducts, StatusCode::BAD_REQUEST),
            (OrderError::EmptyProducts, StatusCode::BAD_REQUEST),
            (OrderError::InvalidStatus, StatusCode::BAD_REQUEST),
            (OrderError::Invalid("bad".into()), StatusCode::BAD_REQUEST),
            (
                OrderError::Repo(RepoErr::DuplicateOrderId("ORD1".into())),
                StatusCode::BAD_REQUEST,
            ),
            (OrderError::NotFound, StatusCode::NOT_FOUND),
            (
                OrderError::UserNotFound("abc".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                OrderError::Repo(RepoErr::Backend("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn user_not_found_message_quotes_the_id() {
        let err = OrderError::UserNotFound("65f000000000000000000001".into());
        assert_eq!(
            err.to_string(),
            "Object id did not match any users in the database: \"65f000000000000000000001\""
        );
    }

    #[actix_web::test]
    async fn error_response_is_json_with_error_field() {
        let resp = ApiError::from(OrderError::NotFound).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Order not found"}"#);
    }
}
