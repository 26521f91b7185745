//! Request and response bodies
//!
//! Bodies are modelled as byte streams. JSON payloads are small and travel as
//! a single [`Bytes`] chunk, while file uploads and downloads stay streamed
//! end to end.

use crate::error::{Result, TransportError};
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt, stream::BoxStream};
use std::fmt;
use tokio::io::AsyncRead;
use tokio_util::io::{ReaderStream, StreamReader};

/// A boxed stream of body chunks.
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// Outbound request body.
#[derive(Default)]
pub enum Body {
    /// No body at all
    #[default]
    Empty,
    /// A fully buffered body
    Bytes(Bytes),
    /// A body produced incrementally, e.g. from a local file
    Stream(BodyStream),
}

impl Body {
    /// Stream a body out of any async reader.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Body::Stream(ReaderStream::new(reader).map_err(TransportError::Io).boxed())
    }

    /// Whether this body carries no bytes.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Bytes(bytes) => bytes.is_empty(),
            Body::Stream(_) => false,
        }
    }

    /// Size of the body when it is known up front.
    pub fn len_hint(&self) -> Option<usize> {
        match self {
            Body::Empty => Some(0),
            Body::Bytes(bytes) => Some(bytes.len()),
            Body::Stream(_) => None,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Body::Empty"),
            Body::Bytes(bytes) => write!(f, "Body::Bytes({} bytes)", bytes.len()),
            Body::Stream(_) => f.write_str("Body::Stream(..)"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Body::Bytes(Bytes::from_static(text.as_bytes()))
    }
}

/// Wrap a body stream as an [`AsyncRead`].
pub fn into_async_read(stream: BodyStream) -> StreamReader<BodyStream, Bytes> {
    StreamReader::new(stream)
}

/// Collect a body stream into one buffer.
pub async fn collect(mut stream: BodyStream) -> Result<Bytes> {
    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(Bytes::from(buffer))
}
