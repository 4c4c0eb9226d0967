use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use std::io::Read;
use std::time::Duration;
use tracing::debug;

/// Blocking HTTP transport backed by a shared `ureq` agent.
pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTransport {
    /// `timeout` of `None` keeps the agent's own defaults.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let base_url = base_url.into();
        Self {
            agent: builder.build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request.path);
        debug!(%url, bytes = request.body.len(), "sending POST");

        let response = match self
            .agent
            .post(&url)
            .set("Content-Type", &request.content_type)
            .send_bytes(&request.body)
        {
            Ok(response) => response,
            // Non-2xx statuses are still responses; the caller classifies them.
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(err)) => return Err(map_transport_error(&url, err)),
        };

        let status = response.status();
        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;

        Ok(HttpResponse { status, body })
    }
}

fn map_transport_error(url: &str, err: ureq::Transport) -> TransportError {
    match err.kind() {
        ureq::ErrorKind::InvalidUrl | ureq::ErrorKind::UnknownScheme => TransportError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        },
        _ => TransportError::Network(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::HttpTransport;
    use crate::transport::{HttpRequest, Transport, TransportError};
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    /// Answers exactly one request with `status` and `body`, returning the
    /// request line and body it received.
    fn serve_once(status: u16, body: &'static str) -> (u16, JoinHandle<(String, Vec<u8>)>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let port = listener.local_addr().expect("local addr").port();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut content_length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).expect("header");
                if header == "\r\n" || header.is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().expect("content length");
                    }
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).expect("request body");

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {status} Reply\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .expect("write response");
            (request_line.trim_end().to_string(), request_body)
        });
        (port, handle)
    }

    fn workout_request() -> HttpRequest {
        HttpRequest {
            path: "/workouts/".to_string(),
            content_type: "multipart/form-data; boundary=x".to_string(),
            body: b"--x\r\nContent-Disposition: form-data; name=\"duration\"\r\n\r\n45\r\n--x--\r\n".to_vec(),
        }
    }

    #[test]
    fn joins_base_url_and_path() {
        let transport = HttpTransport::new("http://127.0.0.1:8000/", None);
        assert_eq!(transport.base_url(), "http://127.0.0.1:8000");
        assert_eq!(transport.url_for("/workouts/"), "http://127.0.0.1:8000/workouts/");
        assert_eq!(transport.url_for("workouts/"), "http://127.0.0.1:8000/workouts/");
    }

    #[test]
    fn refused_connection_is_a_network_error() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
            listener.local_addr().expect("local addr").port()
        };
        let transport = HttpTransport::new(format!("http://127.0.0.1:{port}"), Some(Duration::from_secs(2)));
        let request = HttpRequest {
            path: "/workouts/".to_string(),
            content_type: "multipart/form-data; boundary=x".to_string(),
            body: b"--x--\r\n".to_vec(),
        };

        let err = transport.post(&request).expect_err("nothing is listening");
        assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
    }

    #[test]
    fn success_reply_is_returned_with_its_body() {
        let (port, server) = serve_once(200, r#"{"id": 7}"#);
        let transport = HttpTransport::new(format!("http://127.0.0.1:{port}"), Some(Duration::from_secs(5)));

        let response = transport.post(&workout_request()).expect("200 is a response");
        assert_eq!(response.status, 200);
        assert!(response.is_success());
        let decoded: serde_json::Value = serde_json::from_slice(&response.body).expect("json body");
        assert_eq!(decoded, json!({"id": 7}));

        let (request_line, body) = server.join().expect("server thread");
        assert_eq!(request_line, "POST /workouts/ HTTP/1.1");
        assert_eq!(body, workout_request().body);
    }

    #[test]
    fn error_statuses_are_responses_not_transport_errors() {
        for status in [404u16, 500] {
            let (port, server) = serve_once(status, r#"{"detail": "nope"}"#);
            let transport = HttpTransport::new(format!("http://127.0.0.1:{port}"), Some(Duration::from_secs(5)));

            let response = transport
                .post(&workout_request())
                .unwrap_or_else(|err| panic!("status {status} surfaced as {err:?}"));
            assert_eq!(response.status, status);
            assert!(!response.is_success());
            assert_eq!(response.body, br#"{"detail": "nope"}"#.to_vec());
            server.join().expect("server thread");
        }
    }
}
