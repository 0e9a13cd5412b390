//! Liveness endpoint.

use actix_web::HttpResponse;
use scribe_shared::WelcomeResponse;

/// Liveness check - confirms the API is running.
///
/// GET /
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(WelcomeResponse::default())
}
