//! Gallery server client
//!
//! The views only talk to the server through [`GalleryApi`], so tests can
//! swap in a scripted implementation.

#[cfg(test)]
pub mod mock;

use crate::constants::{LIST_IMAGES_PATH, UPLOAD_IMAGE_PATH};
use crate::error::{GalleryError, Result};
use crate::types::{ImageListResponse, ImageRecord, ImageUpload};
use crate::utils::guess_mime;
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait GalleryApi: Send + Sync {
    /// Fetch the full collection in server order
    async fn list_images(&self) -> Result<Vec<ImageRecord>>;

    /// Submit a new image as a multipart form
    async fn upload_image(&self, upload: ImageUpload) -> Result<()>;

    /// Download the raw bytes of one image asset
    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>>;
}

/// Read and write endpoints derived from the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base: String,
    pub list: String,
    pub upload: String,
}

impl Endpoints {
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim().trim_end_matches('/');
        Self {
            base: base.to_string(),
            list: format!("{base}{LIST_IMAGES_PATH}"),
            upload: format!("{base}{UPLOAD_IMAGE_PATH}"),
        }
    }

    /// Absolute URL for an asset. The server may send paths like `/media/...`
    /// when it builds URLs without request context.
    pub fn resolve_asset(&self, url: &str) -> String {
        reqwest::Url::parse(&self.base)
            .and_then(|base| base.join(url))
            .map(String::from)
            .unwrap_or_else(|_| url.to_string())
    }
}

pub struct HttpGalleryApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpGalleryApi {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }
}

/// Turn a non-2xx response into a status error, keeping the body for diagnostics
async fn error_for_status(response: reqwest::Response) -> GalleryError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    GalleryError::status(status.as_u16(), status.canonical_reason(), body)
}

#[async_trait]
impl GalleryApi for HttpGalleryApi {
    async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        debug!(url = %self.endpoints.list, "Fetching image list");
        let response = self.client.get(&self.endpoints.list).send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }
        let bytes = response.bytes().await?;
        let body: ImageListResponse = serde_json::from_slice(&bytes)?;
        Ok(body.results)
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<()> {
        debug!(
            url = %self.endpoints.upload,
            title = %upload.title,
            file = %upload.file_name,
            size = upload.bytes.len(),
            "Uploading image"
        );
        let mime = guess_mime(&upload.file_name);
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new()
            .text("title", upload.title)
            .part("image_file", part);

        let response = self
            .client
            .post(&self.endpoints.upload)
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            let err = error_for_status(response).await;
            if let GalleryError::Status { status, body, .. } = &err {
                warn!(status, body = %body, "Upload rejected by server");
            }
            return Err(err);
        }
        Ok(())
    }

    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>> {
        let url = self.endpoints.resolve_asset(url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// One-connection-per-request HTTP server that replays canned replies
    /// and keeps every raw request it saw.
    struct StubServer {
        base: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl StubServer {
        async fn start(replies: Vec<(u16, &'static str, &'static str)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let requests = Arc::new(Mutex::new(Vec::new()));
            let recorded = Arc::clone(&requests);
            tokio::spawn(async move {
                for (status, reason, body) in replies {
                    let Ok((mut socket, _)) = listener.accept().await else {
                        return;
                    };
                    let raw = read_request(&mut socket).await;
                    recorded
                        .lock()
                        .unwrap()
                        .push(String::from_utf8_lossy(&raw).into_owned());
                    let reply = format!(
                        "HTTP/1.1 {status} {reason}\r\n\
                         Content-Type: application/json\r\n\
                         Content-Length: {}\r\n\
                         Connection: close\r\n\r\n{body}",
                        body.len()
                    );
                    socket.write_all(reply.as_bytes()).await.ok();
                    socket.shutdown().await.ok();
                }
            });
            Self {
                base: format!("http://{addr}"),
                requests,
            }
        }

        fn api(&self) -> HttpGalleryApi {
            // Loopback must not be routed through an ambient HTTP_PROXY
            HttpGalleryApi {
                client: reqwest::Client::builder().no_proxy().build().unwrap(),
                endpoints: Endpoints::from_base(&self.base),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }
        buf
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let body_len = buf.len() - end - 4;
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok());
        match content_length {
            Some(len) => body_len >= len,
            None if head.contains("transfer-encoding: chunked") => buf.ends_with(b"0\r\n\r\n"),
            None => true,
        }
    }

    #[test]
    fn endpoints_join_base_without_double_slash() {
        let endpoints = Endpoints::from_base("http://127.0.0.1:8000/");
        assert_eq!(endpoints.list, "http://127.0.0.1:8000/api/images/");
        assert_eq!(endpoints.upload, "http://127.0.0.1:8000/upload/");

        let endpoints = Endpoints::from_base(" https://gallery.example.com ");
        assert_eq!(endpoints.list, "https://gallery.example.com/api/images/");
    }

    #[test]
    fn relative_asset_urls_resolve_against_base() {
        let endpoints = Endpoints::from_base("http://127.0.0.1:8000/");
        assert_eq!(
            endpoints.resolve_asset("/media/images/a.png"),
            "http://127.0.0.1:8000/media/images/a.png"
        );
        assert_eq!(
            endpoints.resolve_asset("https://i.ibb.co/x/a.png"),
            "https://i.ibb.co/x/a.png"
        );
    }

    #[tokio::test]
    async fn list_reads_results_and_defaults_missing_field_to_empty() {
        let server = StubServer::start(vec![
            (
                200,
                "OK",
                r#"{"count":2,"results":[
                    {"id":7,"title":"Second","image_url":null,"created_at":"2024-05-02T10:00:00Z","source":"Local"},
                    {"id":3,"title":"First","image_url":"/media/a.png","created_at":"2024-05-01T10:00:00Z","source":"ImgBB"}
                ]}"#,
            ),
            (200, "OK", r#"{"count":0}"#),
        ])
        .await;
        let api = server.api();

        let records = api.list_images().await.unwrap();
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![7, 3]);
        assert_eq!(records[1].image_url.as_deref(), Some("/media/a.png"));

        assert!(api.list_images().await.unwrap().is_empty());

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("GET /api/images/ HTTP/1.1"), "{}", requests[0]);
    }

    #[tokio::test]
    async fn list_maps_error_status_and_bad_body() {
        let server = StubServer::start(vec![
            (503, "Service Unavailable", "down"),
            (200, "OK", "[1, 2]"),
        ])
        .await;
        let api = server.api();

        match api.list_images().await {
            Err(GalleryError::Status { status, body, .. }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "down");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(matches!(api.list_images().await, Err(GalleryError::Decode(_))));
    }

    #[tokio::test]
    async fn upload_sends_one_multipart_post_with_title_and_image_file() {
        let server = StubServer::start(vec![(201, "Created", "{}")]).await;
        let api = server.api();

        api.upload_image(ImageUpload {
            title: "Sunset".into(),
            file_name: "a.png".into(),
            bytes: b"not really a png".to_vec(),
        })
        .await
        .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.starts_with("POST /upload/ HTTP/1.1"), "{request}");

        let lower = request.to_ascii_lowercase();
        assert!(lower.contains("content-type: multipart/form-data; boundary="), "{request}");
        assert!(
            lower.contains("content-disposition: form-data; name=\"title\"\r\n\r\nsunset\r\n"),
            "{request}"
        );
        let file_part = "content-disposition: form-data; name=\"image_file\"; filename=\"a.png\"";
        assert!(lower.contains(file_part), "{request}");
        assert!(lower.contains("content-type: image/png"), "{request}");
        assert!(request.contains("not really a png"));
    }

    #[tokio::test]
    async fn rejected_upload_keeps_status_and_body() {
        let server =
            StubServer::start(vec![(400, "Bad Request", r#"{"title":["required"]}"#)]).await;
        let api = server.api();

        let err = api
            .upload_image(ImageUpload {
                title: "Sunset".into(),
                file_name: "a.jpg".into(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap_err();
        match &err {
            GalleryError::Status { status, body, .. } => {
                assert_eq!(*status, 400);
                assert_eq!(body, r#"{"title":["required"]}"#);
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn relative_asset_is_fetched_from_the_server() {
        let server =
            StubServer::start(vec![(200, "OK", "PNGDATA"), (404, "Not Found", "")]).await;
        let api = server.api();

        let bytes = api.fetch_asset("/media/images/a.png").await.unwrap();
        assert_eq!(bytes, b"PNGDATA");
        let missing = api.fetch_asset("/media/images/gone.png").await.unwrap_err();
        assert_eq!(missing.status_code(), Some(404));

        let requests = server.requests();
        assert!(
            requests[0].starts_with("GET /media/images/a.png HTTP/1.1"),
            "{}",
            requests[0]
        );
    }
}
