use crate::auth::jwt_service::{Claims, JwtError, JwtService};
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use tracing::{debug, error, warn};

/// Authentication middleware for protecting routes
pub struct AuthMiddleware {
    jwt_service: Rc<JwtService>,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self {
            jwt_service: Rc::new(jwt_service),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_service: Rc<JwtService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let jwt_service = self.jwt_service.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok());

            let Some(auth_value) = auth_header else {
                warn!("Missing authorization header");
                return Err(ErrorUnauthorized("Missing authorization header"));
            };

            let Some(token) = auth_value.strip_prefix("Bearer ") else {
                warn!("Invalid authorization header format");
                return Err(ErrorUnauthorized("Invalid authorization header format"));
            };

            let validated = jwt_service.validate_token(token).await;

            match validated {
                Ok(claims) => {
                    debug!(user_id = claims.user_id, "Request authenticated");

                    // Handlers read the claims back through `ClaimsExt`.
                    req.extensions_mut().insert(claims);

                    service.call(req).await
                }
                Err(JwtError::TokenExpired) => {
                    warn!("Token expired");
                    Err(ErrorUnauthorized("Token expired"))
                }
                Err(JwtError::SessionNotFound) => {
                    warn!("Session not found");
                    Err(ErrorUnauthorized("Session expired or invalid"))
                }
                Err(JwtError::SessionLookup(e)) => {
                    error!(error = %e, "Session lookup failed");
                    Err(ErrorInternalServerError("Internal server error"))
                }
                Err(e) => {
                    warn!(error = %e, "Token validation failed");
                    Err(ErrorUnauthorized("Invalid token"))
                }
            }
        })
    }
}

/// Extract claims from request (use in route handlers)
pub trait ClaimsExt {
    fn claims(&self) -> Option<Claims>;
    fn user_id(&self) -> Option<i32>;
}

impl ClaimsExt for actix_web::HttpRequest {
    fn claims(&self) -> Option<Claims> {
        self.extensions().get::<Claims>().cloned()
    }

    fn user_id(&self) -> Option<i32> {
        self.claims().map(|c| c.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt_service::JwtConfig;
    use crate::repository::memory::InMemoryRepository;
    use actix_web::{http::StatusCode, test, web, App, HttpRequest, HttpResponse};
    use std::sync::Arc;

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match req.user_id() {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    fn jwt_service(repo: InMemoryRepository) -> JwtService {
        JwtService::new(JwtConfig::new("middleware_test_secret"), Arc::new(repo))
    }

    fn issue(user_id: i32) -> String {
        jwt_service(InMemoryRepository::new())
            .generate_token(user_id)
            .unwrap()
    }

    macro_rules! protected_app {
        ($repo:expr) => {
            test::init_service(
                App::new().service(
                    web::scope("/protected")
                        .wrap(AuthMiddleware::new(jwt_service($repo)))
                        .route("", web::get().to(whoami)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_header_is_unauthorized() {
        let app = protected_app!(InMemoryRepository::new());

        let req = test::TestRequest::get().uri("/protected").to_request();
        let err = test::try_call_service(&app, req).await.err().unwrap();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let token = issue(3);
        let app = protected_app!(InMemoryRepository::new().with_session(token.clone()));

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Token {}", token)))
            .to_request();
        let err = test::try_call_service(&app, req).await.err().unwrap();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler_with_user_id() {
        let token = issue(3);
        let app = protected_app!(InMemoryRepository::new().with_session(token.clone()));

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, web::Bytes::from_static(b"3"));
    }

    #[actix_web::test]
    async fn test_token_without_session_is_unauthorized() {
        let app = protected_app!(InMemoryRepository::new());

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Bearer {}", issue(3))))
            .to_request();
        let err = test::try_call_service(&app, req).await.err().unwrap();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_session_store_failure_is_internal_error() {
        let app = protected_app!(InMemoryRepository::new().failing());

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Bearer {}", issue(3))))
            .to_request();
        let err = test::try_call_service(&app, req).await.err().unwrap();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
