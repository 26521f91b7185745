//! Files API endpoints
//!
//! JSON endpoints (search, listings, stat) go through the codec. Uploads and
//! downloads bypass it and stream file bytes straight through the transport.

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    http::{JSON_CONTENT_TYPE, Method},
    observability::log_transfer,
    types::{
        File, FileHit, FileInfo, FileSearchPayload, FileSearchResponse, FileSearchScrollPayload,
        FileSearchScrollResponse, FolderContents,
    },
};
use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use sirv_transport::{Body, TransportResponse};
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Files API resource.
#[derive(Debug, Clone, Copy)]
pub struct Files<'a> {
    client: &'a Client,
}

impl<'a> Files<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Search files.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use sirv::{Client, FileSearchPayload};
    /// # async fn example(client: Client) -> sirv::Result<()> {
    /// let page = client
    ///     .files()
    ///     .search(&FileSearchPayload::new("extension:.jpg").size(50))
    ///     .await?;
    /// for hit in &page.hits {
    ///     println!("{}", hit.source.filename);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, payload: &FileSearchPayload) -> Result<FileSearchResponse> {
        self.post_json("/files/search", payload).await
    }

    /// Fetch the next page of a scrolled search.
    pub async fn scroll(&self, payload: &FileSearchScrollPayload) -> Result<FileSearchScrollResponse> {
        self.post_json("/files/search/scroll", payload).await
    }

    /// Run a scrolled search and collect every hit.
    ///
    /// Scrolling is switched on regardless of `payload.scroll`. Pages are
    /// fetched until one comes back empty or without a cursor.
    pub async fn search_all(&self, payload: &FileSearchPayload) -> Result<Vec<FileHit>> {
        let payload = payload.clone().scroll(true);

        let mut page = self.search(&payload).await?;
        let mut hits = Vec::with_capacity(page.hits.len());

        loop {
            let cursor = page.next_scroll().map(str::to_owned);
            let exhausted = page.hits.is_empty();
            hits.append(&mut page.hits);

            match cursor {
                Some(scroll_id) if !exhausted => {
                    page = self.scroll(&FileSearchScrollPayload::new(scroll_id)).await?;
                }
                _ => break,
            }
        }

        Ok(hits)
    }

    /// List one page of a folder.
    ///
    /// Pass the `continuation` of the previous page to get the next one.
    pub async fn read_dir(&self, dirname: &str, continuation: Option<&str>) -> Result<FolderContents> {
        let mut query = vec![("dirname", dirname)];
        if let Some(continuation) = continuation {
            query.push(("continuation", continuation));
        }

        self.client()
            .execute_json::<(), _>(Method::GET, "/files/readdir", &query, None)
            .await
    }

    /// List a whole folder, following continuation cursors.
    pub async fn read_dir_all(&self, dirname: &str) -> Result<Vec<File>> {
        let mut page = self.read_dir(dirname, None).await?;
        let mut entries = Vec::with_capacity(page.contents.len());

        loop {
            entries.append(&mut page.contents);
            let Some(cursor) = page.next_page().map(str::to_owned) else {
                break;
            };
            page = self.read_dir(dirname, Some(&cursor)).await?;
        }

        Ok(entries)
    }

    /// File or folder attributes.
    pub async fn stat(&self, filename: &str) -> Result<FileInfo> {
        self.client()
            .execute_json::<(), _>(Method::GET, "/files/stat", &[("filename", filename)], None)
            .await
    }

    /// Download `filename` into a local file, returning the bytes written.
    ///
    /// The local file is created only once the API has answered 200. A
    /// failure mid-transfer leaves the partial file in place.
    pub async fn download(&self, filename: &str, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();

        let written = self
            .client()
            .executor()
            .guard(async {
                let response = self.open_download(filename).await?;
                let mut file = tokio::fs::File::create(path).await?;
                let written = copy_body(response, &mut file).await?;
                file.sync_all().await?;
                Ok(written)
            })
            .await?;

        log_transfer("download", filename, written);
        Ok(written)
    }

    /// Download `filename` into any async writer, returning the bytes written.
    pub async fn download_to<W>(&self, filename: &str, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let written = self
            .client()
            .executor()
            .guard(async {
                let response = self.open_download(filename).await?;
                copy_body(response, writer).await
            })
            .await?;

        log_transfer("download", filename, written);
        Ok(written)
    }

    /// Upload a local file to `filename`.
    ///
    /// The file is streamed, not buffered, and no `Content-Type` is sent.
    pub async fn upload(&self, filename: &str, path: impl AsRef<Path>) -> Result<()> {
        self.upload_file(filename, path.as_ref(), None).await
    }

    /// Upload a local file with an explicit `Content-Type`.
    pub async fn upload_with_content_type(
        &self,
        filename: &str,
        path: impl AsRef<Path>,
        content_type: &str,
    ) -> Result<()> {
        self.upload_file(filename, path.as_ref(), Some(content_type))
            .await
    }

    /// Upload an in-memory buffer to `filename`.
    pub async fn upload_bytes(&self, filename: &str, data: impl Into<Bytes>) -> Result<()> {
        let data = data.into();
        let size = data.len() as u64;

        self.send_void("/files/upload", &[("filename", filename)], Body::Bytes(data), None)
            .await?;

        log_transfer("upload", filename, size);
        Ok(())
    }

    /// Delete a file or an empty folder.
    pub async fn delete(&self, filename: &str) -> Result<()> {
        self.send_void(
            "/files/delete",
            &[("filename", filename)],
            Body::Empty,
            Some(JSON_CONTENT_TYPE),
        )
        .await
    }

    /// Create a folder.
    pub async fn mkdir(&self, dirname: &str) -> Result<()> {
        self.send_void(
            "/files/mkdir",
            &[("dirname", dirname)],
            Body::Empty,
            Some(JSON_CONTENT_TYPE),
        )
        .await
    }

    /// Rename or move a file or folder.
    pub async fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.send_void(
            "/files/rename",
            &[("from", from), ("to", to)],
            Body::Empty,
            Some(JSON_CONTENT_TYPE),
        )
        .await
    }

    async fn upload_file(&self, filename: &str, path: &Path, content_type: Option<&str>) -> Result<()> {
        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();

        self.send_void(
            "/files/upload",
            &[("filename", filename)],
            Body::from_reader(file),
            content_type,
        )
        .await?;

        log_transfer("upload", filename, size);
        Ok(())
    }

    async fn open_download(&self, filename: &str) -> Result<TransportResponse> {
        let url = self.client().endpoint("/files/download", &[("filename", filename)])?;
        self.client()
            .executor()
            .execute(
                self.client().session(),
                Method::GET,
                url,
                Body::Empty,
                Some(JSON_CONTENT_TYPE),
            )
            .await
    }

    async fn send_void(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: Body,
        content_type: Option<&str>,
    ) -> Result<()> {
        let url = self.client().endpoint(path, query)?;
        self.client()
            .executor()
            .execute_discard(self.client().session(), Method::POST, url, body, content_type)
            .await
    }

    async fn post_json<P, R>(&self, path: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned + Send + 'static,
    {
        self.client()
            .execute_json(Method::POST, path, &[], Some(payload))
            .await
    }
}

impl Resource for Files<'_> {
    fn client(&self) -> &Client {
        self.client
    }
}

async fn copy_body<W>(response: TransportResponse, writer: &mut W) -> Result<u64>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut reader = response.into_async_read();
    let written = tokio::io::copy(&mut reader, &mut *writer).await?;
    writer.flush().await?;
    Ok(written)
}
