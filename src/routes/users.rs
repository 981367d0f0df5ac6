use crate::{auth::CurrentUser, error::AppError};
use actix_web::{get, HttpResponse, Responder};

/// Returns the identity of the authenticated caller.
///
/// The full resolution chain runs before this handler: the middleware has
/// verified the bearer token and the `CurrentUser` extractor has re-fetched
/// the subject from the store, so the response reflects the current row,
/// never just the token contents.
#[get("/me")]
pub async fn me(user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(user.0))
}
