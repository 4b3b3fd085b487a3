// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interception and enrichment fan-out
//!
//! `CaptureClient` wraps the HTTP client so the wrapped call settles for the
//! caller exactly as the unwrapped one would, value and rejection alike.
//! Request-side metadata and the body duplicate are taken synchronously
//! around settlement; everything else runs in a spawned continuation the
//! caller never observes. Rejected calls still fan out a record, because
//! failed requests are diagnostically significant.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use reqwest::header::HeaderMap;
use tokio::sync::Notify;

use super::metadata::{epoch_secs, NetworkRequestMetadata};
use super::warning::Warning;
use super::{headers, size, url};
use crate::config::CaptureConfig;
use crate::emit::{
    BreadcrumbEmitter, NetworkEmitter, ReplayBuffer, ReplaySpanRecorder, Scope,
};
use crate::error::Result;
use crate::http::{BodyReader, HttpClient, Request, Response};

/// Fields captured around settlement, before the enrichment continuation
struct PendingCapture {
    method: String,
    url: String,
    start_timestamp: f64,
    end_timestamp: f64,
    status: Option<u16>,
    request_headers: HeaderMap,
    response_headers: Option<HeaderMap>,
    request_body_size: Option<u64>,
    reader: Option<BodyReader>,
}

/// Shared capture state: configuration, consumers, and in-flight bookkeeping
pub struct Capture {
    config: CaptureConfig,
    scope: Arc<Scope>,
    replay: Arc<ReplayBuffer>,
    breadcrumbs: BreadcrumbEmitter,
    spans: ReplaySpanRecorder,
    extra_emitters: RwLock<Vec<Box<dyn NetworkEmitter>>>,
    pending: AtomicUsize,
    idle: Notify,
}

impl Capture {
    /// Create capture state from configuration
    pub fn new(config: CaptureConfig) -> Self {
        let scope = Arc::new(Scope::new(config.max_breadcrumbs));
        let replay = Arc::new(ReplayBuffer::new());
        Self {
            breadcrumbs: BreadcrumbEmitter::new(Arc::clone(&scope)),
            spans: ReplaySpanRecorder::new(Arc::clone(&replay)),
            config,
            scope,
            replay,
            extra_emitters: RwLock::new(Vec::new()),
            pending: AtomicUsize::new(0),
            idle: Notify::new(),
        }
    }

    /// The error-reporting scope owning the breadcrumb trail
    pub fn scope(&self) -> &Arc<Scope> {
        &self.scope
    }

    /// The session-recording buffer owning the span stream
    pub fn replay(&self) -> &Arc<ReplayBuffer> {
        &self.replay
    }

    /// Capture configuration
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Register an additional consumer of finished records
    pub fn add_emitter(&self, emitter: Box<dyn NetworkEmitter>) {
        self.extra_emitters.write().push(emitter);
    }

    /// Number of enrichment continuations still in flight
    pub fn in_flight(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Wait until all in-flight enrichment continuations have finished.
    /// Returns false if the timeout elapsed first.
    pub async fn flush(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let idle = self.idle.notified();
                if self.pending.load(Ordering::Acquire) == 0 {
                    return;
                }
                idle.await;
            }
        })
        .await
        .is_ok()
    }

    fn spawn_record(self: &Arc<Self>, pending: PendingCapture) {
        self.pending.fetch_add(1, Ordering::AcqRel);
        let capture = Arc::clone(self);
        tokio::spawn(async move {
            capture.record(pending).await;
            capture.pending.fetch_sub(1, Ordering::AcqRel);
            capture.idle.notify_waiters();
        });
    }

    /// Build and emit the breadcrumb and span for one settled call.
    ///
    /// Breadcrumbs go out before the body drain and only ever carry a
    /// synchronously resolved size; spans wait for the full strategy chain.
    /// That asymmetry keeps error capture prompt and is intentional.
    async fn record(&self, mut pending: PendingCapture) {
        let reader = pending.reader.take();

        let base = match catch_unwind(AssertUnwindSafe(|| self.build_metadata(&pending))) {
            Ok(meta) => meta,
            Err(_) => {
                tracing::debug!(url = %pending.url, "capture enrichment fault, emitting degraded record");
                self.degraded_metadata(&pending)
            }
        };

        let mut crumb_meta = base.clone();
        crumb_meta.response_body_size = pending
            .response_headers
            .as_ref()
            .and_then(size::header_size);
        emit_guarded(&self.breadcrumbs, &crumb_meta);

        let mut span_meta = base;
        if let Some(ref response_headers) = pending.response_headers {
            let resolved = size::resolve(
                response_headers,
                reader,
                self.config.capture_body_sizes,
                self.config.body_drain_timeout,
            )
            .await;
            span_meta.response_body_size = resolved.size;
            span_meta.response_warnings.extend(resolved.warnings);
        }
        emit_guarded(&self.spans, &span_meta);

        for emitter in self.extra_emitters.read().iter() {
            emit_guarded(emitter.as_ref(), &span_meta);
        }
    }

    fn build_metadata(&self, pending: &PendingCapture) -> NetworkRequestMetadata {
        let decision = url::normalize(&pending.url, &self.config.allow_urls);

        let mut meta = NetworkRequestMetadata::new(
            &pending.method,
            decision.url.clone(),
            pending.start_timestamp,
            pending.end_timestamp,
        );
        meta.status_code = pending.status;
        meta.request_body_size = pending.request_body_size;

        if decision.allowed {
            let (request_headers, request_warnings) = headers::sanitize(
                Some(&pending.request_headers),
                &self.config.request_headers_allow,
            );
            meta.request_headers = request_headers;
            meta.request_warnings = request_warnings;

            if let Some(ref response_headers) = pending.response_headers {
                let (response_headers, response_warnings) = headers::sanitize(
                    Some(response_headers),
                    &self.config.response_headers_allow,
                );
                meta.response_headers = response_headers;
                meta.response_warnings = response_warnings;
            }
        } else {
            // destination not allow-listed: headers forced down the empty
            // path, URL itself still recorded verbatim
            meta.request_warnings = decision.warnings.clone();
            meta.response_warnings = decision.warnings;
        }

        if pending.status.is_none() {
            meta.response_warnings.push(Warning::NoResponse);
        }

        meta
    }

    fn degraded_metadata(&self, pending: &PendingCapture) -> NetworkRequestMetadata {
        let mut meta = NetworkRequestMetadata::new(
            &pending.method,
            &pending.url,
            pending.start_timestamp,
            pending.end_timestamp,
        );
        meta.status_code = pending.status;
        meta.request_body_size = pending.request_body_size;
        meta
    }
}

impl std::fmt::Debug for Capture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capture")
            .field("config", &self.config)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

fn emit_guarded(emitter: &dyn NetworkEmitter, meta: &NetworkRequestMetadata) {
    if catch_unwind(AssertUnwindSafe(|| emitter.emit(meta))).is_err() {
        tracing::debug!(url = %meta.url, "emitter panicked, record dropped for this consumer");
    }
}

/// Client wrapper that intercepts every executed request
#[derive(Debug, Clone)]
pub struct CaptureClient {
    client: HttpClient,
    capture: Arc<Capture>,
}

impl CaptureClient {
    /// Wrap a client with the given capture handle
    pub fn new(client: HttpClient, capture: Arc<Capture>) -> Self {
        Self { client, capture }
    }

    /// Wrap a client with the process-wide installed capture handle
    pub fn from_installed(client: HttpClient) -> Option<Self> {
        installed().map(|capture| Self::new(client, capture))
    }

    /// The capture handle feeding this client's records
    pub fn capture(&self) -> &Arc<Capture> {
        &self.capture
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// Execute a POST request
    pub async fn post(&self, url: impl AsRef<str>, body: impl Into<bytes::Bytes>) -> Result<Response> {
        self.execute(Request::post(url)?.body(body)).await
    }

    /// Execute a request with a buffered response body
    pub async fn execute(&self, request: Request) -> Result<Response> {
        self.run(request, false).await
    }

    /// Execute a request leaving the response body streaming
    pub async fn execute_streaming(&self, request: Request) -> Result<Response> {
        self.run(request, true).await
    }

    async fn run(&self, request: Request, streaming: bool) -> Result<Response> {
        let method = request.method.as_str().to_uppercase();
        let url = request.url.to_string();
        let request_headers = request.headers.clone();
        let request_body_size = request.body_size();
        let start_timestamp = epoch_secs();
        let started = Instant::now();

        let result = if streaming {
            self.client.execute_streaming(request).await
        } else {
            self.client.execute(request).await
        };

        let end_timestamp = start_timestamp + started.elapsed().as_secs_f64();

        match result {
            Ok(mut response) => {
                self.capture.spawn_record(PendingCapture {
                    method,
                    url,
                    start_timestamp,
                    end_timestamp,
                    status: Some(response.status_code()),
                    request_headers,
                    response_headers: Some(response.headers.clone()),
                    request_body_size,
                    reader: response.body_mut().tee(),
                });
                Ok(response)
            }
            Err(e) => {
                self.capture.spawn_record(PendingCapture {
                    method,
                    url,
                    start_timestamp,
                    end_timestamp,
                    status: None,
                    request_headers,
                    response_headers: None,
                    request_body_size,
                    reader: None,
                });
                Err(e)
            }
        }
    }
}

lazy_static! {
    static ref INSTALLED: RwLock<Option<Arc<Capture>>> = RwLock::new(None);
}

/// Install a process-wide capture handle.
///
/// Idempotent: if a handle is already installed it is returned unchanged and
/// the new one is discarded. Use [`uninstall`] first to replace it.
pub fn install(capture: Capture) -> Arc<Capture> {
    let mut slot = INSTALLED.write();
    if let Some(existing) = slot.as_ref() {
        tracing::debug!("capture already installed, keeping existing handle");
        return Arc::clone(existing);
    }
    let handle = Arc::new(capture);
    *slot = Some(Arc::clone(&handle));
    handle
}

/// Tear down the process-wide capture handle, returning it if one was set
pub fn uninstall() -> Option<Arc<Capture>> {
    INSTALLED.write().take()
}

/// The currently installed process-wide capture handle
pub fn installed() -> Option<Arc<Capture>> {
    INSTALLED.read().clone()
}
