#![allow(unused)]

use actix_http::{body::MessageBody, header::AUTHORIZATION, Method, Request};
use actix_web::{
    dev::{Service, ServiceResponse},
    test::{call_service, read_body_json, TestRequest},
};
use anyhow::Result;
use givehub::{setting::Setting, AppState};
use migration::{Migrator, MigratorTrait};
use serde_json::Value;

pub async fn create_test_state() -> Result<AppState> {
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_filename_override(".env.test");
    let mut setting = Setting::default();
    setting.db_url =
        std::env::var("GIVEHUB_TEST_DB").unwrap_or_else(|_| "sqlite::memory:".to_owned());
    let state = AppState::from_setting(setting).await?;
    Migrator::fresh(state.service.db()).await?;
    Ok(state)
}

pub fn get_req(path: &str) -> TestRequest {
    TestRequest::with_uri(path)
}

pub fn post_req(path: &str, data: Value) -> TestRequest {
    TestRequest::with_uri(path).method(Method::POST).set_json(data)
}

pub fn put_req(path: &str, data: Value) -> TestRequest {
    TestRequest::with_uri(path).method(Method::PUT).set_json(data)
}

pub fn delete_req(path: &str) -> TestRequest {
    TestRequest::with_uri(path).method(Method::DELETE)
}

pub fn auth_get(path: &str, token: &String) -> TestRequest {
    TestRequest::with_uri(path).insert_header((AUTHORIZATION, format!("Bearer {}", token)))
}

/// run a request and return its json body with the status code
pub async fn call<S, B>(req: TestRequest, app: &S) -> Result<(Value, u16)>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = call_service(app, req.to_request()).await;
    let status = res.status().as_u16();
    let val = read_body_json::<Value, _>(res).await;
    Ok((val, status))
}

pub async fn get<S, B>(app: &S, path: &str) -> Result<(Value, u16)>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    call(get_req(path), app).await
}

pub async fn post<S, B>(app: &S, path: &str, data: Value) -> Result<(Value, u16)>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    call(post_req(path, data), app).await
}

pub async fn put<S, B>(app: &S, path: &str, data: Value) -> Result<(Value, u16)>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    call(put_req(path, data), app).await
}

pub async fn delete<S, B>(app: &S, path: &str) -> Result<(Value, u16)>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    call(delete_req(path), app).await
}
