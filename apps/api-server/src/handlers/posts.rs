//! Post handlers.

use actix_web::{HttpResponse, web};

use scribe_core::domain::PostInput;
use scribe_shared::dto::{ListPostsQuery, PostRequest};

use crate::middleware::AppResult;
use crate::state::AppState;

fn into_input(req: PostRequest) -> PostInput {
    PostInput {
        title: req.title,
        content: req.content,
        category: req.category,
        tags: req.tags,
    }
}

/// POST /api/v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(into_input(body.into_inner())).await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/v1/posts?term=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(query.into_inner().term).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(&path).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/v1/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(&path, into_input(body.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}
