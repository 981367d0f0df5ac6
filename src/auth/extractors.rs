use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::User;

/// Resolves the authenticated caller from a request.
///
/// Intended for routes protected by [`crate::auth::AuthMiddleware`], which
/// validates the bearer token and stores its claims in request extensions.
/// This extractor completes identity resolution: it looks the token subject
/// up in the credential store and yields the full [`User`] row.
///
/// If the subject no longer exists (deleted between token issuance and use)
/// the request is rejected as unauthenticated, not as a server error. This
/// extractor is the sole gate for every task-scoped operation: handlers take
/// the owner id from it, never from client input.
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let pool = req.app_data::<web::Data<PgPool>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(|| {
                // Not reachable when AuthMiddleware is correctly applied;
                // rejecting as unauthenticated is the safe default.
                AppError::Unauthorized("Missing credentials".to_string())
            })?;

            let pool = pool.ok_or_else(|| {
                AppError::InternalServerError("Database pool not configured".to_string())
            })?;

            let user = sqlx::query_as::<_, User>(
                "SELECT id, email, password_hash, is_active, created_at \
                 FROM users WHERE email = $1",
            )
            .bind(&claims.sub)
            .fetch_optional(pool.get_ref())
            .await
            .map_err(AppError::from)?;

            match user {
                Some(user) => Ok(CurrentUser(user)),
                None => Err(AppError::Unauthorized("Invalid or expired token".to_string()).into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_current_user_rejected_without_claims() {
        // No claims in extensions, as if AuthMiddleware never ran
        let req = test::TestRequest::default().to_http_request();

        let mut payload = Payload::None;
        let result = CurrentUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let err = result.err().unwrap();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
