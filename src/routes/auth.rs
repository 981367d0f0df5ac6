use crate::{
    auth::{hash_password, verify_password, LoginRequest, SignupRequest, TokenResponse,
        TokenService},
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new account from an email and password and returns the public
/// user record. The password is stored only as a bcrypt hash.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    // Check if email already exists. The unique constraint on users.email
    // double-enforces this; the pre-check just gives a clean error message.
    let existing_user =
        sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE email = $1")
            .bind(&signup_data.email)
            .fetch_optional(&**pool)
            .await?;

    if existing_user.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    // Hash password
    let password_hash = hash_password(&signup_data.password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) \
         RETURNING id, email, password_hash, is_active, created_at",
    )
    .bind(&signup_data.email)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Login user
///
/// Authenticates an email/password pair and returns a bearer access token.
/// An unknown email and a wrong password produce the identical 401 so the
/// response never reveals which field was wrong.
#[post("/token")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, is_active, created_at \
         FROM users WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => {
            if verify_password(&login_data.password, &user.password_hash)? {
                let token = tokens.issue(&user.email)?;
                Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
            } else {
                Err(AppError::Unauthorized("Incorrect email or password".into()))
            }
        }
        None => Err(AppError::Unauthorized("Incorrect email or password".into())),
    }
}
