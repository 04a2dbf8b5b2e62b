use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::models::actor_models::Actor;
use crate::utils::{error::AppError, session::verify_token};

/// Verifies the JWT from the `token` cookie and makes the resulting actor
/// available to the handlers. Token issuance lives in the identity service;
/// this end only checks signatures.
pub async fn jwt_auth(
    cookie_jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::AuthenticationError("No token found".to_string()))?;

    let claims = verify_token(&token)
        .map_err(|_| AppError::AuthenticationError("Invalid or expired token".to_string()))?;
    let actor = Actor::try_from(&claims)?;

    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}
