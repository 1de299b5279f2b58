use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test::init_service,
    web,
};
use anyhow::Result;
use givehub::create_web_app;
use serde_json::json;
use util::create_test_state;

mod util;

async fn register<S, B>(app: &S, email: &str) -> Result<i64>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (val, status) = util::post(
        app,
        "/auth/register",
        json!({
            "name": "Test",
            "last_name": "User",
            "email": email,
            "phone": email,
            "password": "secret123"
        }),
    )
    .await?;
    assert_eq!(status, 201);
    Ok(val["user"]["id"].as_i64().unwrap())
}

#[actix_rt::test]
async fn auth() -> Result<()> {
    let state = create_test_state().await?;
    let app = init_service(create_web_app(web::Data::new(state))).await;

    let user_id = register(&app, "alice@test.local").await?;
    assert!(user_id > 0);

    // duplicate email
    let (val, status) = util::post(
        &app,
        "/auth/register",
        json!({
            "name": "Test",
            "last_name": "User",
            "email": "alice@test.local",
            "phone": "123456",
            "password": "secret123"
        }),
    )
    .await?;
    assert_eq!(status, 400);
    assert_eq!(val["error"], json!(true));

    // wrong password
    let (_val, status) = util::post(
        &app,
        "/auth/login",
        json!({ "email": "alice@test.local", "password": "nope" }),
    )
    .await?;
    assert_eq!(status, 401);

    let (val, status) = util::post(
        &app,
        "/auth/login",
        json!({ "email": "alice@test.local", "password": "secret123" }),
    )
    .await?;
    assert_eq!(status, 200);
    let token = val["token"].as_str().unwrap().to_owned();
    // the hash never leaves the service
    assert!(val["user"].get("password").is_none());

    let (_val, status) = util::get(&app, "/auth/me").await?;
    assert_eq!(status, 401);

    let (val, status) = util::call(util::auth_get("/auth/me", &token), &app).await?;
    assert_eq!(status, 200);
    assert_eq!(val["user"]["email"], json!("alice@test.local"));

    let (val, status) = util::post(&app, "/auth/logout", json!({})).await?;
    assert_eq!(status, 200);
    assert_eq!(val["message"], json!("Logout successful"));
    Ok(())
}

#[actix_rt::test]
async fn donation_lifecycle() -> Result<()> {
    let state = create_test_state().await?;
    let app = init_service(create_web_app(web::Data::new(state))).await;

    let donor = register(&app, "donor@test.local").await?;
    let alice = register(&app, "alice@test.local").await?;
    let bob = register(&app, "bob@test.local").await?;

    let (_val, status) = util::get(&app, "/donations/999").await?;
    assert_eq!(status, 404);

    let (val, status) = util::post(
        &app,
        "/donations",
        json!({
            "donor_id": donor,
            "item": "winter coat",
            "description": "barely used",
            "category": "Clothing"
        }),
    )
    .await?;
    assert_eq!(status, 201);
    let donation = val["donation"]["id"].as_i64().unwrap();
    assert_eq!(val["donation"]["status"], json!("pending"));

    // two requests, the second from the same user conflicts
    let (val, status) = util::post(
        &app,
        &format!("/donations/{}/request", donation),
        json!({ "user_id": alice }),
    )
    .await?;
    assert_eq!(status, 200);
    let request_a = val["request"]["id"].as_i64().unwrap();

    let (_val, status) = util::post(
        &app,
        &format!("/donations/{}/request", donation),
        json!({ "user_id": alice }),
    )
    .await?;
    assert_eq!(status, 400);

    let (_val, status) = util::post(
        &app,
        &format!("/donations/{}/request", donation),
        json!({ "user_id": bob }),
    )
    .await?;
    assert_eq!(status, 200);

    // accept cascades
    let (val, status) = util::put(
        &app,
        &format!("/donations/{}/requests/{}/status", donation, request_a),
        json!({ "status": "accepted" }),
    )
    .await?;
    assert_eq!(status, 200);
    assert_eq!(val["donation"]["status"], json!("completed"));

    let (val, status) = util::get(&app, &format!("/donations/{}/requests", donation)).await?;
    assert_eq!(status, 200);
    let requests = val.as_array().unwrap();
    assert_eq!(requests.len(), 2);
    for r in requests {
        if r["id"].as_i64().unwrap() == request_a {
            assert_eq!(r["status"], json!("accepted"));
        } else {
            assert_eq!(r["status"], json!("rejected"));
        }
    }

    // the alternate cascade entry point loses against a completed donation
    let (val, status) = util::post(
        &app,
        &format!("/donations/{}/approve", donation),
        json!({ "request_id": request_a }),
    )
    .await?;
    assert_eq!(status, 400);
    assert_eq!(val["error"], json!(true));

    Ok(())
}

#[actix_rt::test]
async fn likes_and_media() -> Result<()> {
    let state = create_test_state().await?;
    let app = init_service(create_web_app(web::Data::new(state))).await;

    let donor = register(&app, "donor@test.local").await?;
    let (val, _) = util::post(
        &app,
        "/donations",
        json!({
            "donor_id": donor,
            "item": "bookshelf",
            "description": "oak",
            "category": "Furniture"
        }),
    )
    .await?;
    let donation = val["donation"]["id"].as_i64().unwrap();

    // toggle pair returns to the original like set
    let (val, status) = util::post(
        &app,
        &format!("/donations/{}/likes", donation),
        json!({ "user_id": donor }),
    )
    .await?;
    assert_eq!(status, 200);
    assert_eq!(val["likes"].as_array().unwrap().len(), 1);
    let (val, _) = util::post(
        &app,
        &format!("/donations/{}/likes", donation),
        json!({ "user_id": donor }),
    )
    .await?;
    assert_eq!(val["likes"].as_array().unwrap().len(), 0);

    let (val, status) = util::post(
        &app,
        &format!("/donations/{}/media", donation),
        json!({ "urls": ["https://m.test/a.jpg", "https://m.test/b.jpg"] }),
    )
    .await?;
    assert_eq!(status, 200);
    assert_eq!(
        val["media"],
        json!(["https://m.test/a.jpg", "https://m.test/b.jpg"])
    );

    let (val, status) =
        util::delete(&app, &format!("/donations/{}/media/0", donation)).await?;
    assert_eq!(status, 200);
    assert_eq!(val["media"], json!(["https://m.test/b.jpg"]));

    let (val, status) = util::get(&app, &format!("/donations/{}/media", donation)).await?;
    assert_eq!(status, 200);
    assert_eq!(val, json!(["https://m.test/b.jpg"]));

    let (_val, status) =
        util::delete(&app, &format!("/donations/{}/media/7", donation)).await?;
    assert_eq!(status, 400);
    Ok(())
}

#[actix_rt::test]
async fn dashboard() -> Result<()> {
    let state = create_test_state().await?;
    let app = init_service(create_web_app(web::Data::new(state))).await;

    let donor = register(&app, "donor@test.local").await?;
    register(&app, "reader@test.local").await?;
    let (_val, status) = util::put(
        &app,
        &format!("/users/{}", donor),
        json!({ "role": "donor" }),
    )
    .await?;
    assert_eq!(status, 200);

    util::post(
        &app,
        "/donations",
        json!({
            "donor_id": donor,
            "item": "lamp",
            "description": "works",
            "category": "Household Items"
        }),
    )
    .await?;
    util::post(
        &app,
        "/posts",
        json!({
            "author_id": donor,
            "title": "thanks",
            "content": "gave away a lamp today",
            "category": "successstories"
        }),
    )
    .await?;

    let (val, status) = util::get(&app, "/dashboard/stats").await?;
    assert_eq!(status, 200);
    assert_eq!(val, json!([2, 1, 1, 1]));
    Ok(())
}

#[actix_rt::test]
async fn post_moderation() -> Result<()> {
    let state = create_test_state().await?;
    let app = init_service(create_web_app(web::Data::new(state))).await;

    let author = register(&app, "author@test.local").await?;
    let reporter = register(&app, "reporter@test.local").await?;

    let (val, status) = util::post(
        &app,
        "/posts",
        json!({
            "author_id": author,
            "title": "tips for donating",
            "content": "label the boxes",
            "category": "tips",
            "status": "published"
        }),
    )
    .await?;
    assert_eq!(status, 201);
    let post = val["blog_post"]["id"].as_i64().unwrap();

    let (val, status) = util::post(
        &app,
        &format!("/posts/{}/reports", post),
        json!({ "user_id": reporter, "reason": "off topic" }),
    )
    .await?;
    assert_eq!(status, 201);
    let report = val["report"]["id"].as_i64().unwrap();

    let (val, status) = util::get(&app, "/posts/reports/pending").await?;
    assert_eq!(status, 200);
    assert_eq!(val.as_array().unwrap().len(), 1);

    let (val, status) = util::put(
        &app,
        &format!("/posts/{}/reports/{}/resolve", post, report),
        json!({}),
    )
    .await?;
    assert_eq!(status, 200);
    assert_eq!(val["report"]["status"], json!("resolved"));

    let (val, _) = util::get(&app, "/posts/reports/pending").await?;
    assert_eq!(val.as_array().unwrap().len(), 0);
    Ok(())
}
