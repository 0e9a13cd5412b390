//! Application assembly - middleware stack, routes and fallbacks.

use actix_cors::Cors;
use actix_web::{
    App, Error, HttpMessage,
    body::MessageBody,
    dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::NormalizePath,
    web,
};
use tracing_actix_web::TracingLogger;

use crate::handlers;
use crate::middleware::{
    ErrorFormatter,
    error::{RequestedUri, not_found},
};
use crate::state::AppState;

/// Build the application.
///
/// Middleware, outermost first: capture of the requested URI, trailing-slash
/// normalization, CORS, error formatting, request logging. Request logging sits inside the formatter so
/// it still sees the original error.
pub fn create_app(
    state: AppState,
    expose_stack: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(TracingLogger::default())
        .wrap(ErrorFormatter::new(expose_stack))
        .wrap(Cors::permissive())
        .wrap(NormalizePath::trim())
        .wrap_fn(|req, srv| {
            req.extensions_mut()
                .insert(RequestedUri(req.uri().clone()));
            srv.call(req)
        })
        .configure(handlers::configure_routes)
        .default_service(web::to(not_found))
}
