mod jwt;
mod pwd;

pub use jwt::*;
pub use pwd::*;

use crate::{service::NewUser, AppState, Error, Result};
use actix_web::{get, post, web, HttpResponse, Responder, Scope};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("{0}")]
    Hash(String),
    #[error("{0}")]
    Invalid(&'static str),
}

pub fn scope() -> Scope {
    web::scope("/auth")
        .service(register)
        .service(login)
        .service(logout)
        .service(me)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegisterReq {
    name: String,
    last_name: String,
    email: String,
    phone: String,
    password: String,
}

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    data: web::Json<RegisterReq>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();
    if data.name.is_empty()
        || data.last_name.is_empty()
        || data.email.is_empty()
        || data.password.is_empty()
    {
        return Err(Error::Validation(
            "Name, last name, email, and password are required.".to_owned(),
        ));
    }

    let password = hash_password(data.password.as_bytes())?;
    let user = state
        .service
        .create_user(
            NewUser {
                name: data.name,
                last_name: data.last_name,
                email: data.email,
                phone: data.phone,
                password,
                role: None,
                profile_photo: None,
            },
            &state.setting.media.default_profile_photo,
        )
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "user": user
    })))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoginReq {
    email: String,
    password: String,
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    data: web::Json<LoginReq>,
) -> Result<impl Responder, Error> {
    let user = state
        .service
        .user_by_email(&data.email)
        .await?
        .ok_or(AuthError::Invalid("Invalid email or password."))?;

    if !verify_password(data.password.as_bytes(), &user.password)? {
        return Err(AuthError::Invalid("Invalid email or password.").into());
    }

    let token = JwtToken::generate(
        user.id,
        state.setting.auth.access_token_expiry,
        state.setting.auth.secret.as_bytes(),
    )?;
    let role = user.role;

    Ok(web::Json(json!({
        "message": "Login successful",
        "token": token,
        "user": user,
        "role": role
    })))
}

/// tokens are stateless; logout is an acknowledgement for the client
#[post("/logout")]
pub async fn logout() -> Result<impl Responder, Error> {
    Ok(web::Json(json!({ "message": "Logout successful" })))
}

#[get("/me")]
pub async fn me(user: AuthedUser) -> Result<impl Responder, Error> {
    Ok(web::Json(json!({ "user": user.user })))
}
