//! JSON payload codec
//!
//! Request payloads are small and encoded up front. Response bodies can be
//! arbitrarily large (folder listings, search pages), so they are decoded
//! straight off the body stream without buffering the whole body first.

use crate::error::{Error, Result};
use bytes::Bytes;
use futures::{StreamExt, stream::AbortHandle};
use serde::{Serialize, de::DeserializeOwned, de::Error as _};
use sirv_transport::{TransportResponse, body};
use std::io::BufReader;
use tokio_util::io::SyncIoBridge;

/// Media type of every JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Encode a request payload.
pub(crate) fn encode<P>(payload: &P) -> Result<Bytes>
where
    P: Serialize + ?Sized,
{
    serde_json::to_vec(payload)
        .map(Bytes::from)
        .map_err(Error::Serialization)
}

/// Decode a response body into `R` while it streams in.
///
/// `serde_json` only offers a blocking reader interface, so the async body is
/// bridged onto a blocking thread and parsed there chunk by chunk. Only the
/// first JSON value is read; anything after it is ignored.
///
/// Dropping the returned future ends the body stream, so the blocking reader
/// stops and closes the body instead of waiting for the server.
pub(crate) async fn decode<R>(response: TransportResponse) -> Result<R>
where
    R: DeserializeOwned + Send + 'static,
{
    let (stream, abort) = futures::stream::abortable(response.into_body());
    let _abort_on_drop = AbortOnDrop(abort);
    let reader = SyncIoBridge::new(body::into_async_read(stream.boxed()));

    let parsed = tokio::task::spawn_blocking(move || {
        serde_json::Deserializer::from_reader(BufReader::new(reader))
            .into_iter::<R>()
            .next()
            .unwrap_or_else(|| Err(serde_json::Error::custom("empty response body")))
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::other(e)))?;

    parsed.map_err(|e| {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::Decode(e)
        }
    })
}

struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use futures::{Stream, stream};
    use sirv_transport::{HeaderMap, StatusCode, TransportError};
    use std::collections::HashMap;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::task::{Context, Poll};
    use std::time::Duration;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Storage {
        used: i64,
        files: i64,
    }

    fn chunked_response(parts: &[&'static str]) -> TransportResponse {
        let chunks: Vec<sirv_transport::Result<Bytes>> = parts
            .iter()
            .map(|p| Ok(Bytes::from_static(p.as_bytes())))
            .collect();
        TransportResponse::new(StatusCode::OK, HeaderMap::new(), stream::iter(chunks).boxed())
    }

    #[test]
    fn test_encode() {
        let bytes = encode(&serde_json::json!({"query": "logo"})).unwrap();
        assert_eq!(&bytes[..], br#"{"query":"logo"}"#);
    }

    #[test]
    fn test_encode_failure() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys are not JSON object keys");
        assert!(matches!(encode(&bad), Err(Error::Serialization(_))));
    }

    #[tokio::test]
    async fn test_decode_across_chunk_boundaries() {
        let response = chunked_response(&["{\"us", "ed\":4", "2,\"files\"", ":3}"]);
        let storage: Storage = decode(response).await.unwrap();
        assert_eq!(storage, Storage { used: 42, files: 3 });
    }

    #[tokio::test]
    async fn test_decode_shape_mismatch() {
        let response = chunked_response(&["{\"used\":\"lots\"}"]);
        let err = decode::<Storage>(response).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "unexpected: {err:?}");
    }

    #[tokio::test]
    async fn test_decode_empty_body() {
        let err = decode::<Storage>(chunked_response(&[])).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_decode_stream_failure_is_io() {
        let chunks: Vec<sirv_transport::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"{\"used\":")),
            Err(TransportError::Body("connection reset".to_string())),
        ];
        let response =
            TransportResponse::new(StatusCode::OK, HeaderMap::new(), stream::iter(chunks).boxed());

        let err = decode::<Storage>(response).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)), "unexpected: {err:?}");
    }

    #[tokio::test]
    async fn test_decode_ignores_trailing_data() {
        let response = chunked_response(&["{\"used\":42,\"files\":3}", "\n<!-- served by edge -->"]);
        let storage: Storage = decode(response).await.unwrap();
        assert_eq!(storage, Storage { used: 42, files: 3 });
    }

    /// Sends half a JSON value, then stalls forever. Flags when dropped.
    pub(crate) struct StalledBody {
        sent: bool,
        closed: Arc<AtomicBool>,
    }

    impl StalledBody {
        pub(crate) fn new(closed: Arc<AtomicBool>) -> Self {
            Self { sent: false, closed }
        }
    }

    impl Stream for StalledBody {
        type Item = sirv_transport::Result<Bytes>;

        fn poll_next(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            if self.sent {
                return Poll::Pending;
            }
            self.sent = true;
            Poll::Ready(Some(Ok(Bytes::from_static(b"{\"used\":"))))
        }
    }

    impl Drop for StalledBody {
        fn drop(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_dropping_decode_closes_stalled_body() {
        let closed = Arc::new(AtomicBool::new(false));
        let body = StalledBody::new(closed.clone()).boxed();
        let response = TransportResponse::new(StatusCode::OK, HeaderMap::new(), body);

        let outcome = tokio::time::timeout(Duration::from_millis(100), decode::<Storage>(response)).await;
        assert!(outcome.is_err(), "decode should still be waiting on the body");

        for _ in 0..100 {
            if closed.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(closed.load(Ordering::SeqCst), "body left open after decode was dropped");
    }
}
