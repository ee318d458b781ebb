use async_trait::async_trait;
use dns_pin_domain::{DomainError, HttpRequest, HttpResponse, RequestOptions};
use std::sync::Arc;

/// One link of an outbound HTTP pipeline. The last link talks to the network.
#[async_trait]
pub trait HttpHandler: Send + Sync {
    async fn handle(
        &self,
        request: HttpRequest,
        options: RequestOptions,
    ) -> Result<HttpResponse, DomainError>;
}

/// Wraps a handler into a new handler that runs before it.
pub trait HttpMiddleware: Send + Sync {
    fn wrap(&self, next: Arc<dyn HttpHandler>) -> Arc<dyn HttpHandler>;
}

/// Stacks `middlewares` on top of `terminal`; the first middleware in the
/// slice is the outermost one and sees the request first.
pub fn build_chain(
    terminal: Arc<dyn HttpHandler>,
    middlewares: &[Arc<dyn HttpMiddleware>],
) -> Arc<dyn HttpHandler> {
    middlewares
        .iter()
        .rev()
        .fold(terminal, |next, middleware| middleware.wrap(next))
}
