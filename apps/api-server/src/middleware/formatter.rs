//! Error formatter middleware - the one place error bodies are decided.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::StatusCode,
};
use scribe_shared::ErrorResponse;
use std::future::{Future, Ready, ready};
use std::pin::Pin;

/// Middleware that rewrites every error response into `{ message, stack }`.
///
/// Covers handler errors, extractor errors (bad JSON, bad query string) and
/// the unmatched-route fallback alike. `stack` is only filled in when
/// `expose_stack` is set.
#[derive(Debug, Clone, Copy)]
pub struct ErrorFormatter {
    expose_stack: bool,
}

impl ErrorFormatter {
    pub fn new(expose_stack: bool) -> Self {
        Self { expose_stack }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorFormatter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ErrorFormatterService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorFormatterService {
            service,
            expose_stack: self.expose_stack,
        }))
    }
}

pub struct ErrorFormatterService<S> {
    service: S,
    expose_stack: bool,
}

impl<S, B> Service<ServiceRequest> for ErrorFormatterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let expose_stack = self.expose_stack;
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            let Some(err) = res.response().error() else {
                return Ok(res.map_into_left_body());
            };

            let status = response_status(err.as_response_error().status_code());
            let mut body = ErrorResponse::new(err.to_string());
            if expose_stack {
                body = body.with_stack(format!("{err:?}"));
            }

            if status.is_server_error() {
                tracing::error!(status = status.as_u16(), error = %err, "Request failed");
            } else {
                tracing::debug!(status = status.as_u16(), error = %err, "Request rejected");
            }

            let (req, _) = res.into_parts();
            let response = HttpResponse::build(status).json(body);
            Ok(ServiceResponse::new(req, response).map_into_right_body())
        })
    }
}

/// An error that claims a success status is reported as 500.
fn response_status(status: StatusCode) -> StatusCode {
    if status.is_success() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status_becomes_500() {
        assert_eq!(
            response_status(StatusCode::OK),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(response_status(StatusCode::NOT_FOUND), StatusCode::NOT_FOUND);
        assert_eq!(
            response_status(StatusCode::BAD_REQUEST),
            StatusCode::BAD_REQUEST
        );
    }
}
