use std::time::Instant;

use tracing::{info, info_span, Instrument};

use super::{Middleware, Next};
use crate::handler::ResponseFuture;
use crate::request::Request;

/// Opens one `request` span per request and logs status and latency when
/// the response is ready.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn handle(&self, req: Request, next: Next) -> ResponseFuture {
        let span = info_span!("request", method = %req.method(), path = %req.path());
        Box::pin(
            async move {
                let started = Instant::now();
                let res = next.run(req).await;
                info!(
                    status = res.status_code(),
                    latency_us = started.elapsed().as_micros() as u64,
                    "handled",
                );
                res
            }
            .instrument(span),
        )
    }
}
