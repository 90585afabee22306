use std::future::{ready, Ready};

use actix_web::{dev::Payload, error::ErrorUnauthorized, FromRequest, HttpMessage, HttpRequest};
use bson::oid::ObjectId;

/// Caller identity placed in the request extensions by an upstream
/// authentication middleware. Handlers take `Option<AuthenticatedUser>`;
/// nothing here enforces that one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub ObjectId);

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .copied()
                .ok_or_else(|| ErrorUnauthorized("no authenticated user")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn reads_identity_from_extensions() {
        let id = ObjectId::new();
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthenticatedUser(id));
        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user, AuthenticatedUser(id));
    }

    #[actix_web::test]
    async fn missing_identity_is_an_error_and_optional_is_none() {
        let req = TestRequest::default().to_http_request();
        assert!(AuthenticatedUser::extract(&req).await.is_err());
        let maybe = Option::<AuthenticatedUser>::extract(&req).await.unwrap();
        assert!(maybe.is_none());
    }
}
