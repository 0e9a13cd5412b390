//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{Route, guard, web};

use crate::middleware::error::not_found;

/// GET route that also answers HEAD.
fn get_or_head() -> Route {
    web::route().guard(guard::Any(guard::Get()).or(guard::Head()))
}

/// Configure all application routes.
///
/// A known path with an unsupported method falls through to [`not_found`],
/// same as an unknown path.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(get_or_head().to(health::welcome))
            .default_service(web::to(not_found)),
    )
    .service(
        web::scope("/api/v1/posts")
            .service(
                web::resource("")
                    .route(get_or_head().to(posts::list_posts))
                    .route(web::post().to(posts::create_post))
                    .default_service(web::to(not_found)),
            )
            .service(
                web::resource("/{id}")
                    .route(get_or_head().to(posts::get_post))
                    .route(web::put().to(posts::update_post))
                    .route(web::delete().to(posts::delete_post))
                    .default_service(web::to(not_found)),
            ),
    );
}
