//! Request executor
//!
//! Every API call funnels through [`RequestExecutor::execute`]: it attaches
//! the bearer token and optional content type, hands the request to the
//! transport and classifies the response. Only status 200 is success; any
//! other status is read fully and turned into [`Error::UnexpectedStatus`].

use super::codec::{self, JSON_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use crate::session::Session;
use http::{HeaderValue, Method, StatusCode, header};
use serde::{Serialize, de::DeserializeOwned};
use sirv_transport::{Body, Transport, TransportRequest, TransportResponse};
use std::{future::Future, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Shared call path for JSON and binary endpoints.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl RequestExecutor {
    /// Create an executor over a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            timeout: None,
            cancel: None,
        }
    }

    /// Bound every call, body transfer included, by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Abort calls when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Configured per-call timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Send one request and classify the response.
    ///
    /// On success the body is returned unread and the caller owns it. On
    /// failure the body has already been consumed and dropped.
    pub async fn execute(
        &self,
        session: &Session,
        method: Method,
        url: Url,
        body: Body,
        content_type: Option<&str>,
    ) -> Result<TransportResponse> {
        let bearer = HeaderValue::from_str(&session.bearer())
            .map_err(|_| Error::InvalidHeaderValue("Authorization".to_string()))?;

        let mut request = TransportRequest::new(method, url).with_header(header::AUTHORIZATION, bearer);

        if let Some(content_type) = content_type {
            let value = HeaderValue::from_str(content_type)
                .map_err(|_| Error::InvalidHeaderValue(content_type.to_string()))?;
            request = request.with_header(header::CONTENT_TYPE, value);
        }

        let mut metadata = RequestMetadata::new(request.method.as_str(), request.url.path());
        if let Some(size) = body.len_hint() {
            metadata = metadata.with_body_size(size);
        }
        metadata.log_request();

        let timer = RequestTimer::start();
        let response = match self.transport.send(request.with_body(body)).await {
            Ok(response) => response,
            Err(e) => {
                metadata.log_transport_error(&e.to_string(), timer.elapsed());
                return Err(e.into());
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            ResponseMetadata::new(status.as_u16(), timer.elapsed()).log_success(&metadata);
            return Ok(response);
        }

        // Best effort: an unreadable error body is treated as empty.
        let body = response.bytes().await.unwrap_or_default();
        let error = Error::from_response(status.as_u16(), &body);

        ResponseMetadata::new(status.as_u16(), timer.elapsed())
            .with_body_size(body.len())
            .log_error(&metadata, &error.to_string());

        Err(error)
    }

    /// JSON call: encode `payload`, send it, decode the response into `R`.
    ///
    /// Encoding happens before anything touches the network.
    pub async fn execute_json<P, R>(
        &self,
        session: &Session,
        method: Method,
        url: Url,
        payload: Option<&P>,
    ) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned + Send + 'static,
    {
        let body = match payload {
            Some(payload) => Body::Bytes(codec::encode(payload)?),
            None => Body::Empty,
        };

        self.guard(async {
            let response = self
                .execute(session, method, url, body, Some(JSON_CONTENT_TYPE))
                .await?;
            codec::decode(response).await
        })
        .await
    }

    /// Call whose success body carries nothing of interest.
    pub async fn execute_discard(
        &self,
        session: &Session,
        method: Method,
        url: Url,
        body: Body,
        content_type: Option<&str>,
    ) -> Result<()> {
        self.guard(async {
            let response = self
                .execute(session, method, url, body, content_type)
                .await?;
            response.drain().await?;
            Ok(())
        })
        .await
    }

    /// Race `call` against the cancellation token and the timeout.
    ///
    /// Whichever fires first wins; the losing future is dropped, which
    /// closes any response body it held.
    pub async fn guard<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let bounded = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::Timeout(limit)),
                },
                None => call.await,
            }
        };

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(Error::Cancelled),
                    result = bounded => result,
                }
            }
            None => bounded.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::codec::tests::StalledBody;
    use crate::session::PlanLimit;
    use async_trait::async_trait;
    use futures::StreamExt;
    use secrecy::SecretString;
    use sirv_transport::{HeaderMap, TransportError};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Records requests and replies with a canned response.
    #[derive(Debug)]
    struct RecordingTransport {
        status: StatusCode,
        body: &'static str,
        seen: Mutex<Vec<(Method, String, HeaderMap)>>,
    }

    impl RecordingTransport {
        fn new(status: StatusCode, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn last_headers(&self) -> HeaderMap {
            self.seen.lock().unwrap().last().unwrap().2.clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> sirv_transport::Result<TransportResponse> {
            self.seen.lock().unwrap().push((
                request.method.clone(),
                request.url.to_string(),
                request.headers.clone(),
            ));
            Ok(TransportResponse::from_bytes(
                self.status,
                HeaderMap::new(),
                self.body,
            ))
        }
    }

    #[derive(Debug)]
    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(&self, _: TransportRequest) -> sirv_transport::Result<TransportResponse> {
            Err(TransportError::Connection("connection refused".to_string()))
        }
    }

    /// Answers 200 with a body that never finishes.
    #[derive(Debug)]
    struct StallingTransport {
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Transport for StallingTransport {
        async fn send(&self, _: TransportRequest) -> sirv_transport::Result<TransportResponse> {
            Ok(TransportResponse::new(
                StatusCode::OK,
                HeaderMap::new(),
                StalledBody::new(self.closed.clone()).boxed(),
            ))
        }
    }

    async fn wait_until_set(flag: &AtomicBool) -> bool {
        for _ in 0..100 {
            if flag.load(Ordering::SeqCst) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        flag.load(Ordering::SeqCst)
    }

    fn session() -> Session {
        Session::new("https://api.sirv.com/v2", PlanLimit::FREE)
    }

    fn url(session: &Session, path: &str) -> Url {
        session.endpoint(path, &[]).unwrap()
    }

    #[tokio::test]
    async fn test_bearer_header_sent_even_without_token() {
        let transport = RecordingTransport::new(StatusCode::OK, "");
        let executor = RequestExecutor::new(transport.clone());
        let session = session();

        executor
            .execute(&session, Method::GET, url(&session, "/account"), Body::Empty, None)
            .await
            .unwrap();

        let headers = transport.last_headers();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer ");
        assert!(headers.get(header::CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_bearer_header_carries_token() {
        let transport = RecordingTransport::new(StatusCode::OK, "");
        let executor = RequestExecutor::new(transport.clone());
        let mut session = session();
        session.set_token(SecretString::new("tok-1".into()));

        executor
            .execute(
                &session,
                Method::POST,
                url(&session, "/files/mkdir"),
                Body::Empty,
                Some(JSON_CONTENT_TYPE),
            )
            .await
            .unwrap();

        let headers = transport.last_headers();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer tok-1");
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
    }

    #[tokio::test]
    async fn test_non_200_success_class_is_still_rejected() {
        let transport = RecordingTransport::new(StatusCode::CREATED, "");
        let executor = RequestExecutor::new(transport);
        let session = session();

        let err = executor
            .execute(&session, Method::GET, url(&session, "/account"), Body::Empty, None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "unexpected status code: 201");
    }

    #[tokio::test]
    async fn test_json_call_decodes_result() {
        let transport = RecordingTransport::new(
            StatusCode::OK,
            r#"{"plan":1000,"burstable":0,"extra":0,"used":42,"files":3,"quotaExceededDate":null}"#,
        );
        let executor = RequestExecutor::new(transport);
        let session = session();

        let storage: crate::types::StorageInfo = executor
            .execute_json::<(), _>(&session, Method::GET, url(&session, "/account/storage"), None)
            .await
            .unwrap();

        assert_eq!(storage.used, 42);
        assert_eq!(storage.files, 3);
    }

    #[tokio::test]
    async fn test_serialization_failure_never_reaches_transport() {
        let transport = RecordingTransport::new(StatusCode::OK, "{}");
        let executor = RequestExecutor::new(transport.clone());
        let session = session();

        let mut payload = HashMap::new();
        payload.insert((1, 2), "not encodable");

        let result: Result<serde_json::Value> = executor
            .execute_json(&session, Method::POST, url(&session, "/files/search"), Some(&payload))
            .await;

        assert!(matches!(result, Err(Error::Serialization(_))));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let executor = RequestExecutor::new(Arc::new(FailingTransport));
        let session = session();

        let err = executor
            .execute(&session, Method::GET, url(&session, "/account"), Body::Empty, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Connection(_))));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let transport = RecordingTransport::new(StatusCode::OK, "{}");
        let token = CancellationToken::new();
        token.cancel();
        let executor = RequestExecutor::new(transport).with_cancellation(token);
        let session = session();

        let result: Result<serde_json::Value> = executor
            .execute_json::<(), _>(&session, Method::GET, url(&session, "/account"), None)
            .await;

        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guard_times_out() {
        let executor = RequestExecutor::new(Arc::new(FailingTransport))
            .with_timeout(Some(Duration::from_millis(50)));

        let result: Result<()> = executor
            .guard(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(Error::Timeout(d)) if d == Duration::from_millis(50)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancel_closes_stalled_body() {
        let closed = Arc::new(AtomicBool::new(false));
        let token = CancellationToken::new();
        let executor = RequestExecutor::new(Arc::new(StallingTransport {
            closed: closed.clone(),
        }))
        .with_cancellation(token.clone());
        let session = session();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            token.cancel();
        });

        let result: Result<crate::types::StorageInfo> = executor
            .execute_json::<(), _>(&session, Method::GET, url(&session, "/account/storage"), None)
            .await;

        assert!(matches!(result, Err(Error::Cancelled)), "unexpected: {result:?}");
        assert!(wait_until_set(&closed).await, "body left open after cancellation");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timeout_closes_stalled_body() {
        let closed = Arc::new(AtomicBool::new(false));
        let executor = RequestExecutor::new(Arc::new(StallingTransport {
            closed: closed.clone(),
        }))
        .with_timeout(Some(Duration::from_millis(100)));
        let session = session();

        let result: Result<crate::types::StorageInfo> = executor
            .execute_json::<(), _>(&session, Method::GET, url(&session, "/account/storage"), None)
            .await;

        assert!(matches!(result, Err(Error::Timeout(_))), "unexpected: {result:?}");
        assert!(wait_until_set(&closed).await, "body left open after timeout");
    }
}
