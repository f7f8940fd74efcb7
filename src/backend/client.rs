use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use http_body_util::{BodyExt, Full};
use hyper::header::{CONTENT_TYPE, HOST};
use hyper::{Method, Request, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tracing::{debug, error, info, warn};

use super::Backend;
use super::error::BackendError;
use super::reply::BackendReply;
use crate::model::SubmissionRecord;

/// Path appended to the configured origin.
const SUBMIT_PATH: &str = "/submit";

/// Posts submissions as JSON to `<origin>/submit` over HTTP/1.1.
///
/// One connection per submission; no retry, no timeout beyond what the
/// transport imposes.
#[derive(Clone)]
pub struct HttpBackend {
    origin: String,
    endpoint: Uri,
    authority: String,
    /// Bare host for connecting and SNI; IPv6 literals lose their brackets.
    host: String,
    port: u16,
    /// Present for `https` origins.
    tls: Option<TlsConnector>,
}

#[mutants::skip]
impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("endpoint", &self.endpoint)
            .field("tls", &self.tls.is_some())
            .finish()
    }
}

fn tls_connector() -> TlsConnector {
    let roots = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}

impl HttpBackend {
    /// Creates a client for the given origin, e.g. `https://example.onrender.com`.
    ///
    /// A trailing `/` on the origin is ignored.
    pub fn new(origin: &str) -> Result<Self, BackendError> {
        let invalid = || BackendError::InvalidOrigin(origin.to_string());
        let base = origin.trim().trim_end_matches('/');
        let endpoint: Uri = format!("{base}{SUBMIT_PATH}")
            .parse()
            .map_err(|_| invalid())?;

        let default_port = match endpoint.scheme_str() {
            Some("http") => 80,
            Some("https") => 443,
            _ => return Err(invalid()),
        };
        let host = endpoint.host().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
        let authority = endpoint
            .authority()
            .map(|a| a.as_str().to_string())
            .ok_or_else(invalid)?;

        Ok(Self {
            origin: base.to_string(),
            host: host.trim_start_matches('[').trim_end_matches(']').to_string(),
            port: endpoint.port_u16().unwrap_or(default_port),
            tls: (default_port == 443).then(tls_connector),
            authority,
            endpoint,
        })
    }

    /// The origin this client posts to, without trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The full submit URL.
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Stamps and posts `record`, returning the reply only if the backend
    /// answered with a success status and `success: true`.
    pub async fn send(&self, record: SubmissionRecord) -> Result<BackendReply, BackendError> {
        let body = serde_json::to_vec(&record.stamp(Utc::now()))?;
        let path = self
            .endpoint
            .path_and_query()
            .map_or(SUBMIT_PATH, |p| p.as_str());
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(HOST, self.authority.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;

        let stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        let (status, body) = match &self.tls {
            Some(connector) => {
                let name = ServerName::try_from(self.host.clone())
                    .map_err(|_| BackendError::ServerName(self.host.clone()))?;
                let stream = connector.connect(name, stream).await?;
                exchange(stream, request).await?
            }
            None => exchange(stream, request).await?,
        };

        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        let reply: BackendReply = serde_json::from_slice(&body)?;
        if !reply.success {
            return Err(BackendError::Rejected(reply.error));
        }
        Ok(reply)
    }
}

/// Runs one request/response over an established stream.
async fn exchange<S>(
    stream: S,
    request: Request<Full<Bytes>>,
) -> Result<(StatusCode, Bytes), BackendError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream)).await?;
    tokio::spawn(async move {
        if let Err(err) = conn.await {
            debug!(%err, "backend connection closed with error");
        }
    });

    let response = sender.send_request(request).await?;
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    Ok((status, body))
}

impl Backend for HttpBackend {
    async fn submit(&self, record: SubmissionRecord) -> bool {
        match self.send(record).await {
            Ok(reply) => {
                info!(
                    sheets_saved = ?reply.sheets_saved,
                    email_sent = ?reply.email_sent,
                    "backend accepted submission"
                );
                if reply.sheets_saved == Some(false) {
                    warn!("backend could not save the row to the spreadsheet");
                }
                if reply.email_sent == Some(false) {
                    warn!("backend could not send the confirmation email");
                }
                true
            }
            Err(err) => {
                error!(origin = %self.origin, %err, "submission failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hyper::Response;
    use hyper::body::Incoming;
    use hyper::server::conn::http1 as server_http1;
    use hyper::service::service_fn;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::model::{DesiredPosition, DesiredYear, Gender, Interest};

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            full_name: "Somchai Srisuk".into(),
            gender: Gender::Male,
            faculty: "Law".into(),
            desired_position: DesiredPosition::FieldEngineer,
            desired_year: DesiredYear::Y2027,
            age: "22".into(),
            email: "somchai@example.com".into(),
            interests: vec![Interest::InternshipInJapan],
            comments: String::new(),
        }
    }

    /// Answers exactly one request on `listener` and yields it with its body collected.
    async fn serve_on(
        listener: TcpListener,
        status: StatusCode,
        body: &'static str,
    ) -> Request<Bytes> {
        let (socket, _) = listener.accept().await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let service = service_fn(move |request: Request<Incoming>| {
            let tx = tx.clone();
            async move {
                let (parts, incoming) = request.into_parts();
                let collected = incoming.collect().await?.to_bytes();
                let _ = tx.send(Request::from_parts(parts, collected));
                let response = Response::builder()
                    .status(status)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Full::new(Bytes::from_static(body.as_bytes())))
                    .unwrap();
                Ok::<_, hyper::Error>(response)
            }
        });
        let _ = server_http1::Builder::new()
            .serve_connection(TokioIo::new(socket), service)
            .await;
        rx.recv().await.unwrap()
    }

    /// Serves a single canned response on loopback.
    async fn serve_once(
        status: StatusCode,
        body: &'static str,
    ) -> (String, JoinHandle<Request<Bytes>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(serve_on(listener, status, body));
        (format!("http://{addr}"), handle)
    }

    fn request_json(request: &Request<Bytes>) -> serde_json::Value {
        serde_json::from_slice(request.body()).unwrap()
    }

    mod origin {
        use super::*;

        #[test]
        fn http_origin_defaults_to_port_80() {
            let backend = HttpBackend::new("http://booth.local").unwrap();
            assert_eq!(backend.port, 80);
            assert!(backend.tls.is_none());
            assert_eq!(backend.endpoint().to_string(), "http://booth.local/submit");
        }

        #[test]
        fn https_origin_uses_tls() {
            let backend = HttpBackend::new("https://form-backend.example.com").unwrap();
            assert_eq!(backend.port, 443);
            assert!(backend.tls.is_some());
        }

        #[test]
        fn trailing_slash_ignored() {
            let backend = HttpBackend::new("http://127.0.0.1:5001/").unwrap();
            assert_eq!(backend.origin(), "http://127.0.0.1:5001");
            assert_eq!(backend.endpoint().path(), "/submit");
            assert_eq!(backend.port, 5001);
        }

        #[test]
        fn ipv6_literal_host_is_unbracketed() {
            let backend = HttpBackend::new("http://[::1]:5001").unwrap();
            assert_eq!(backend.host, "::1");
            assert_eq!(backend.port, 5001);
            assert_eq!(backend.authority, "[::1]:5001");
        }

        #[test]
        fn rejects_unsupported_scheme() {
            assert!(matches!(
                HttpBackend::new("ftp://example.com"),
                Err(BackendError::InvalidOrigin(_))
            ));
        }

        #[test]
        fn rejects_relative_origin() {
            assert!(matches!(
                HttpBackend::new("/api"),
                Err(BackendError::InvalidOrigin(_))
            ));
        }

        #[test]
        fn rejects_garbage() {
            assert!(matches!(
                HttpBackend::new("not a url"),
                Err(BackendError::InvalidOrigin(_))
            ));
        }
    }

    mod delivery {
        use super::*;

        #[tokio::test]
        async fn posts_json_to_submit_path() {
            let (origin, server) = serve_once(
                StatusCode::OK,
                r#"{"success":true,"sheets_saved":true,"email_sent":true}"#,
            )
            .await;
            let backend = HttpBackend::new(&origin).unwrap();
            assert!(backend.submit(record()).await);

            let request = server.await.unwrap();
            assert_eq!(request.method(), Method::POST);
            assert_eq!(request.uri().path(), "/submit");
            assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
            assert_eq!(
                request.headers()[HOST],
                origin.trim_start_matches("http://")
            );

            let body = request_json(&request);
            assert_eq!(body["fullName"], "Somchai Srisuk");
            assert_eq!(body["gender"], "male");
            assert_eq!(body["faculty"], "Law");
            assert_eq!(body["desiredPosition"], "Field Engineer");
            assert_eq!(body["desiredYear"], "2027");
            assert_eq!(body["age"], "22");
            assert_eq!(
                body["interests"],
                serde_json::json!(["Internship in Japan / 日本でのインターンシップ"])
            );
            let timestamp = body["timestamp"].as_str().unwrap();
            assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        }

        #[tokio::test]
        async fn send_returns_reply_details() {
            let (origin, _server) = serve_once(
                StatusCode::OK,
                r#"{"success":true,"sheets_saved":true,"email_sent":false}"#,
            )
            .await;
            let backend = HttpBackend::new(&origin).unwrap();
            let reply = backend.send(record()).await.unwrap();
            assert_eq!(reply.sheets_saved, Some(true));
            assert_eq!(reply.email_sent, Some(false));
        }

        #[tokio::test]
        async fn success_false_is_failure() {
            let (origin, _server) =
                serve_once(StatusCode::OK, r#"{"success":false,"error":"sheet locked"}"#).await;
            let backend = HttpBackend::new(&origin).unwrap();
            match backend.send(record()).await {
                Err(BackendError::Rejected(reason)) => {
                    assert_eq!(reason.as_deref(), Some("sheet locked"));
                }
                other => panic!("expected Rejected, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn success_false_submits_false() {
            let (origin, _server) = serve_once(StatusCode::OK, r#"{"success":false}"#).await;
            let backend = HttpBackend::new(&origin).unwrap();
            assert!(!backend.submit(record()).await);
        }

        #[tokio::test]
        async fn error_status_is_failure() {
            let (origin, _server) =
                serve_once(StatusCode::INTERNAL_SERVER_ERROR, r#"{"success":true}"#).await;
            let backend = HttpBackend::new(&origin).unwrap();
            match backend.send(record()).await {
                Err(BackendError::Status(status)) => {
                    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                }
                other => panic!("expected Status, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn malformed_body_is_failure() {
            let (origin, _server) = serve_once(StatusCode::OK, "<html>oops</html>").await;
            let backend = HttpBackend::new(&origin).unwrap();
            assert!(matches!(
                backend.send(record()).await,
                Err(BackendError::Json(_))
            ));
        }

        #[tokio::test]
        async fn delivers_to_ipv6_literal_origin() {
            // Hosts without an IPv6 loopback cannot run this.
            let Ok(listener) = TcpListener::bind("[::1]:0").await else {
                return;
            };
            let addr = listener.local_addr().unwrap();
            let server = tokio::spawn(serve_on(listener, StatusCode::OK, r#"{"success":true}"#));

            let backend = HttpBackend::new(&format!("http://{addr}")).unwrap();
            assert!(backend.submit(record()).await);

            let request = server.await.unwrap();
            assert_eq!(request.uri().path(), "/submit");
            assert_eq!(request.headers()[HOST], addr.to_string());
            assert_eq!(request_json(&request)["fullName"], "Somchai Srisuk");
        }

        #[tokio::test]
        async fn unreachable_backend_is_failure() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let backend = HttpBackend::new(&format!("http://{addr}")).unwrap();
            assert!(matches!(
                backend.send(record()).await,
                Err(BackendError::Io(_))
            ));
            assert!(!backend.submit(record()).await);
        }
    }
}
