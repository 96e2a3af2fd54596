//! Middleware attaching a request-scoped correlation identifier.
//!
//! An inbound `X-Request-ID` header is reused when it is a valid identifier;
//! otherwise a UUID is generated. The identifier is stored in task-local
//! storage for the rest of the request, added to request extensions, and
//! echoed on every response, including error responses.
//!
//! Failures that are not domain errors are rendered as a generic
//! `INTERNAL_SERVER_ERROR` envelope so their text never reaches the client.

use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::{Error as DomainError, REQUEST_ID_HEADER, RequestId};

/// Request-id middleware.
///
/// Handlers can read the identifier via [`RequestId::current`] or from
/// request extensions.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::RequestIdLayer;
///
/// let app = App::new().wrap(RequestIdLayer);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S, B> Transform<S, ServiceRequest> for RequestIdLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequestIdLayer`].
///
/// Applications should not use this type directly.
pub struct RequestIdMiddleware<S> {
    service: S,
}

fn inbound_request_id(req: &ServiceRequest) -> RequestId {
    let Some(raw) = req.headers().get(REQUEST_ID_HEADER) else {
        return RequestId::generate();
    };
    match raw.to_str().map(RequestId::parse) {
        Ok(Ok(request_id)) => request_id,
        Ok(Err(reason)) => {
            debug!(%reason, "ignoring inbound request id");
            RequestId::generate()
        }
        Err(_) => {
            debug!("ignoring non-ASCII inbound request id");
            RequestId::generate()
        }
    }
}

fn stamp<B>(res: &mut ServiceResponse<B>, request_id: &RequestId) {
    match HeaderValue::from_str(request_id.as_str()) {
        Ok(value) => {
            res.response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        Err(error) => {
            error!(
                %error,
                request_id = %request_id,
                "failed to encode request identifier header"
            );
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = inbound_request_id(&req);
        req.extensions_mut().insert(request_id.clone());
        let fut = self.service.call(req);

        Box::pin(RequestId::scope(request_id.clone(), async move {
            let res = match fut.await {
                Ok(res) => res,
                Err(err) => return Err(Error::from(as_domain_error(&err, &request_id))),
            };
            let mut res = replace_foreign_error(res, &request_id);
            stamp(&mut res, &request_id);
            Ok(res)
        }))
    }
}

/// Domain error carried by `err`, or a redacted internal error in its place.
fn as_domain_error(err: &Error, request_id: &RequestId) -> DomainError {
    let error = err
        .as_error::<DomainError>()
        .cloned()
        .unwrap_or_else(|| DomainError::unexpected(err));
    match error.request_id() {
        Some(_) => error,
        None => error.with_request_id(request_id.clone()),
    }
}

fn replace_foreign_error<B>(
    res: ServiceResponse<B>,
    request_id: &RequestId,
) -> ServiceResponse<EitherBody<B>> {
    let foreign = res
        .response()
        .error()
        .filter(|err| err.as_error::<DomainError>().is_none())
        .map(|err| as_domain_error(err, request_id));
    match foreign {
        Some(error) => res.into_response(error.error_response()).map_into_right_body(),
        None => res.map_into_left_body(),
    }
}
