//! message and chat http api

use crate::{service::NewMessage, AppState, Error, Result};
use actix_web::{delete, get, post, web, HttpResponse, Responder, Scope};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn scope() -> Scope {
    web::scope("/messages")
        .service(create_message)
        .service(messages_for_user)
        .service(get_message)
        .service(delete_message)
}

pub fn chat_scope() -> Scope {
    web::scope("/chats")
        .service(create_chat)
        .service(chats_for_user)
}

#[post("")]
pub async fn create_message(
    state: web::Data<AppState>,
    data: web::Json<NewMessage>,
) -> Result<impl Responder, Error> {
    let message = state.service.create_message(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Message created successfully",
        "data": message
    })))
}

#[get("/user/{id}")]
pub async fn messages_for_user(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state.service.messages_for_user(id.into_inner()).await?,
    ))
}

#[get("/{id}")]
pub async fn get_message(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.get_message(id.into_inner()).await?))
}

#[delete("/{id}")]
pub async fn delete_message(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    state.service.delete_message(id.into_inner()).await?;
    Ok(web::Json(
        json!({ "message": "Message deleted successfully" }),
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChatReq {
    members: Vec<i32>,
}

#[post("")]
pub async fn create_chat(
    state: web::Data<AppState>,
    data: web::Json<NewChatReq>,
) -> Result<impl Responder, Error> {
    let chat = state
        .service
        .create_chat(data.into_inner().members)
        .await?;
    Ok(HttpResponse::Created().json(chat))
}

#[get("/user/{id}")]
pub async fn chats_for_user(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state.service.chats_for_user(id.into_inner()).await?,
    ))
}
