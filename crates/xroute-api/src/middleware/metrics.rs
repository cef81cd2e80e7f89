//! # Prometheus Metrics
//!
//! Request count, latency, error count and in-flight requests, recorded by
//! middleware and exposed at `/metrics` in the Prometheus text format.
//!
//! Requests are labelled with the matched route template (`/v1/route-policies/:id`).
//! A request that matched no route falls back to its path with UUID segments
//! collapsed to `{id}`, so label cardinality stays bounded either way.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::core::Collector;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Collectors>,
}

struct Collectors {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    errors: IntCounterVec,
    in_flight: IntGauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .field("in_flight", &self.inner.in_flight.get())
            .finish()
    }
}

/// Register `collector` and hand back a clone for recording.
///
/// Names are static and the registry is fresh, so failure is a programming error.
fn registered<C>(registry: &Registry, collector: C) -> C
where
    C: Collector + Clone + 'static,
{
    registry
        .register(Box::new(collector.clone()))
        .expect("static metric registers on a fresh registry");
    collector
}

impl ApiMetrics {
    /// Create a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();
        let route_labels = &["method", "route", "status"];

        let requests = registered(
            &registry,
            IntCounterVec::new(
                Opts::new("xroute_http_requests_total", "HTTP requests by route and status"),
                route_labels,
            )
            .expect("valid counter options"),
        );
        let latency = registered(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "xroute_http_request_duration_seconds",
                    "HTTP request latency in seconds",
                )
                .buckets(LATENCY_BUCKETS.to_vec()),
                &["method", "route"],
            )
            .expect("valid histogram options"),
        );
        let errors = registered(
            &registry,
            IntCounterVec::new(
                Opts::new("xroute_http_errors_total", "HTTP responses with a 4xx or 5xx status"),
                route_labels,
            )
            .expect("valid counter options"),
        );
        let in_flight = registered(
            &registry,
            IntGauge::new("xroute_http_requests_in_flight", "HTTP requests being served")
                .expect("valid gauge options"),
        );

        Self {
            inner: Arc::new(Collectors {
                registry,
                requests,
                latency,
                errors,
                in_flight,
            }),
        }
    }

    fn total(counter: &IntCounterVec) -> u64 {
        counter
            .collect()
            .iter()
            .flat_map(|family| family.get_metric())
            .map(|m| m.get_counter().get_value() as u64)
            .sum()
    }

    /// Requests served, across every label.
    pub fn requests(&self) -> u64 {
        Self::total(&self.inner.requests)
    }

    /// 4xx/5xx responses, across every label.
    pub fn errors(&self) -> u64 {
        Self::total(&self.inner.errors)
    }

    fn observe(&self, method: &str, route: &str, status: u16, elapsed_secs: f64) {
        let status = status.to_string();
        let labels = [method, route, status.as_str()];
        self.inner.requests.with_label_values(&labels).inc();
        self.inner
            .latency
            .with_label_values(&[method, route])
            .observe(elapsed_secs);
        if status.starts_with('4') || status.starts_with('5') {
            self.inner.errors.with_label_values(&labels).inc();
        }
    }

    /// Encode every registered collector in the Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.inner.registry.gather(), &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer).map_err(|e| format!("metrics are not valid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse UUID path segments to `{id}`.
fn collapse_ids(path: &str) -> String {
    path.split('/')
        .map(|segment| match uuid::Uuid::parse_str(segment) {
            Ok(_) => "{id}",
            Err(_) => segment,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn route_label(request: &Request) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => collapse_ids(request.uri().path()),
    }
}

/// Record request metrics. Expects [`ApiMetrics`] as a request extension and
/// passes requests through untouched when it is absent.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let Some(metrics) = request.extensions().get::<ApiMetrics>().cloned() else {
        return next.run(request).await;
    };
    let method = request.method().to_string();
    let route = route_label(&request);

    metrics.inner.in_flight.inc();
    let started = Instant::now();
    let response = next.run(request).await;
    metrics.inner.in_flight.dec();

    metrics.observe(
        &method,
        &route,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_metrics_are_zero() {
        let m = ApiMetrics::new();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
    }

    #[test]
    fn only_4xx_and_5xx_count_as_errors() {
        let m = ApiMetrics::new();
        m.observe("POST", "/v1/route-policies", 201, 0.01);
        m.observe("POST", "/v1/route-policies", 400, 0.01);
        m.observe("POST", "/v1/onchain/adapters", 503, 0.01);
        m.observe("GET", "/v1/chains", 304, 0.01);
        assert_eq!(m.requests(), 4);
        assert_eq!(m.errors(), 2);
    }

    #[test]
    fn collapse_ids_only_touches_uuids() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(
            collapse_ids(&format!("/v1/layerzero-configs/{id}")),
            "/v1/layerzero-configs/{id}"
        );
        assert_eq!(
            collapse_ids("/v1/chains/resolve/eip155:8453"),
            "/v1/chains/resolve/eip155:8453"
        );
    }

    #[test]
    fn encoded_text_names_every_family() {
        let m = ApiMetrics::new();
        m.observe("GET", "/v1/chains", 200, 0.002);
        let text = m.gather_and_encode().unwrap();
        assert!(text.contains("xroute_http_requests_total"));
        assert!(text.contains("xroute_http_request_duration_seconds"));
        assert!(text.contains("xroute_http_requests_in_flight"));
    }
}
