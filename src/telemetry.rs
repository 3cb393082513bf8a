use actix::Message;
use actix_service::{Service, Transform, forward_ready};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures::future::{LocalBoxFuture, Ready, ready};
use tracing::Instrument;
use tracing_batteries::prelude::*;

/// An actor message which carries the span it was sent from.
pub struct TraceMessage<M> {
    pub message: M,
    pub span: tracing::Span,
}

impl<M: Message> Message for TraceMessage<M> {
    type Result = M::Result;
}

pub trait TraceMessageExt: Message + Sized {
    fn trace(self) -> TraceMessage<Self> {
        TraceMessage {
            message: self,
            span: tracing::Span::current(),
        }
    }
}

impl<M: Message> TraceMessageExt for M {}

/// Wraps every request in a server span which records its outcome.
pub struct TracingLogger;

impl<S, B> Transform<S, ServiceRequest> for TracingLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = TracingLoggerMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TracingLoggerMiddleware { service }))
    }
}

pub struct TracingLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TracingLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = tracing::info_span!(
            "http.request",
            otel.kind = "server",
            otel.name = %format!("{} {}", req.method(), req.path()),
            http.method = %req.method(),
            http.target = %req.path(),
            http.host = %req.connection_info().host(),
            http.status_code = tracing::field::Empty,
        );

        let fut = {
            let _guard = span.enter();
            self.service.call(req)
        };

        Box::pin(async move {
            let result = fut.instrument(span.clone()).await;

            match &result {
                Ok(response) => {
                    span.record("http.status_code", response.status().as_u16());
                }
                Err(err) => {
                    span.record(
                        "http.status_code",
                        err.as_response_error().status_code().as_u16(),
                    );
                }
            }

            result
        })
    }
}
