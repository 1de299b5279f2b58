//! blog post http api
//!
//! reports, comments and reactions mirror the donation routes

use crate::{
    service::{NewPost, PostPatch},
    AppState, Error, Result,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder, Scope};
use entity::{post, reaction, report, Subject};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn scope() -> Scope {
    web::scope("/posts")
        .service(create_post)
        .service(list_posts)
        .service(pending_reports)
        .service(by_status)
        .service(by_category)
        .service(by_author)
        .service(get_post)
        .service(update_post)
        .service(update_status)
        .service(delete_post)
        .service(toggle_like)
        .service(toggle_save)
        .service(add_comment)
        .service(list_comments)
        .service(update_comment)
        .service(delete_comment)
        .service(create_report)
        .service(delete_report)
        .service(review_report)
        .service(resolve_report)
        .service(attach_media)
        .service(list_media)
        .service(remove_media)
}

#[post("")]
pub async fn create_post(
    state: web::Data<AppState>,
    data: web::Json<NewPost>,
) -> Result<impl Responder, Error> {
    let post = state.service.create_post(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Blog post created successfully",
        "blog_post": post
    })))
}

#[get("")]
pub async fn list_posts(state: web::Data<AppState>) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.list_posts().await?))
}

#[get("/{id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.get_post(id.into_inner()).await?))
}

#[put("/{id}")]
pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<PostPatch>,
) -> Result<impl Responder, Error> {
    let post = state
        .service
        .update_post(id.into_inner(), data.into_inner())
        .await?;
    Ok(web::Json(json!({
        "message": "Blog post updated successfully",
        "blog_post": post
    })))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReq {
    status: post::Status,
}

#[put("/{id}/status")]
pub async fn update_status(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<StatusReq>,
) -> Result<impl Responder, Error> {
    let post = state
        .service
        .update_post(
            id.into_inner(),
            PostPatch {
                status: Some(data.status),
                ..Default::default()
            },
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Blog post status updated successfully",
        "blog_post": post
    })))
}

#[delete("/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    state.service.delete_post(id.into_inner()).await?;
    Ok(web::Json(
        json!({ "message": "Blog post deleted successfully" }),
    ))
}

#[get("/status/{status}")]
pub async fn by_status(
    state: web::Data<AppState>,
    status: web::Path<String>,
) -> Result<impl Responder, Error> {
    let status = post::Status::try_from_value(&status.into_inner())
        .map_err(|e| Error::Validation(e.to_string()))?;
    Ok(web::Json(state.service.posts_by_status(status).await?))
}

#[get("/category/{category}")]
pub async fn by_category(
    state: web::Data<AppState>,
    category: web::Path<String>,
) -> Result<impl Responder, Error> {
    let category = post::Category::try_from_value(&category.into_inner())
        .map_err(|e| Error::Validation(e.to_string()))?;
    Ok(web::Json(state.service.posts_by_category(category).await?))
}

#[get("/author/{id}")]
pub async fn by_author(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state.service.posts_by_author(id.into_inner()).await?,
    ))
}

#[get("/reports/pending")]
pub async fn pending_reports(state: web::Data<AppState>) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.posts_with_pending_reports().await?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdReq {
    user_id: i32,
}

#[post("/{id}/likes")]
pub async fn toggle_like(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<UserIdReq>,
) -> Result<impl Responder, Error> {
    let likes = state
        .service
        .toggle_reaction(
            reaction::Kind::Like,
            Subject::Post,
            id.into_inner(),
            data.user_id,
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Blog post like toggled",
        "likes": likes
    })))
}

#[post("/{id}/saves")]
pub async fn toggle_save(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<UserIdReq>,
) -> Result<impl Responder, Error> {
    let saves = state
        .service
        .toggle_reaction(
            reaction::Kind::Save,
            Subject::Post,
            id.into_inner(),
            data.user_id,
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Blog post save toggled",
        "saves": saves
    })))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentReq {
    user_id: i32,
    content: String,
}

#[post("/{id}/comments")]
pub async fn add_comment(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<CommentReq>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();
    let comment = state
        .service
        .add_comment(Subject::Post, id.into_inner(), data.user_id, data.content)
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Comment added successfully",
        "comment": comment
    })))
}

#[get("/{id}/comments")]
pub async fn list_comments(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state
            .service
            .comments_for(Subject::Post, id.into_inner())
            .await?,
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdateReq {
    content: String,
}

#[put("/{post_id}/comments/{comment_id}")]
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    data: web::Json<CommentUpdateReq>,
) -> Result<impl Responder, Error> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .service
        .update_comment(
            Subject::Post,
            post_id,
            comment_id,
            data.into_inner().content,
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Comment updated successfully",
        "comment": comment
    })))
}

#[delete("/{post_id}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let (post_id, comment_id) = path.into_inner();
    state
        .service
        .delete_comment(Subject::Post, post_id, comment_id)
        .await?;
    Ok(web::Json(
        json!({ "message": "Comment deleted successfully" }),
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportReq {
    user_id: i32,
    reason: String,
}

#[post("/{id}/reports")]
pub async fn create_report(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<ReportReq>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();
    let report = state
        .service
        .create_report(Subject::Post, id.into_inner(), data.user_id, data.reason)
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Report created successfully",
        "report": report
    })))
}

#[delete("/{post_id}/reports/{report_id}")]
pub async fn delete_report(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let (post_id, report_id) = path.into_inner();
    state
        .service
        .delete_report(Subject::Post, post_id, report_id)
        .await?;
    Ok(web::Json(
        json!({ "message": "Report deleted successfully" }),
    ))
}

#[put("/{post_id}/reports/{report_id}/review")]
pub async fn review_report(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let (post_id, report_id) = path.into_inner();
    let report = state
        .service
        .set_report_status(Subject::Post, post_id, report_id, report::Status::Reviewed)
        .await?;
    Ok(web::Json(json!({
        "message": "Report status changed to reviewed",
        "report": report
    })))
}

#[put("/{post_id}/reports/{report_id}/resolve")]
pub async fn resolve_report(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let (post_id, report_id) = path.into_inner();
    let report = state
        .service
        .set_report_status(Subject::Post, post_id, report_id, report::Status::Resolved)
        .await?;
    Ok(web::Json(json!({
        "message": "Report status changed to resolved",
        "report": report
    })))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MediaReq {
    urls: Vec<String>,
}

#[post("/{id}/media")]
pub async fn attach_media(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<MediaReq>,
) -> Result<impl Responder, Error> {
    let urls = data.into_inner().urls;
    if urls.is_empty() || urls.len() > state.setting.media.max_attachments {
        return Err(Error::Validation(format!(
            "Between 1 and {} media urls per upload",
            state.setting.media.max_attachments
        )));
    }
    let media = state
        .service
        .attach_post_media(id.into_inner(), urls)
        .await?;
    Ok(web::Json(json!({
        "message": "Media uploaded successfully",
        "media": media
    })))
}

#[get("/{id}/media")]
pub async fn list_media(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.post_media(id.into_inner()).await?))
}

#[delete("/{id}/media/{index}")]
pub async fn remove_media(
    state: web::Data<AppState>,
    path: web::Path<(i32, usize)>,
) -> Result<impl Responder, Error> {
    let (post_id, index) = path.into_inner();
    let media = state.service.remove_post_media(post_id, index).await?;
    Ok(web::Json(json!({
        "message": "Media deleted successfully",
        "media": media
    })))
}
