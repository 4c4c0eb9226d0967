use crate::form::multipart;
use crate::form::payload::FormPayload;
use crate::submission::error::SubmitError;
use crate::task::id::SubmissionId;
use crate::transport::{HttpRequest, Transport};
use serde_json::Value;

/// Everything a worker needs to perform one submission. The payload is an
/// owned snapshot taken on the event loop at activation time.
#[derive(Debug, Clone)]
pub struct SubmitInvocation {
    pub id: SubmissionId,
    pub endpoint: String,
    pub payload: FormPayload,
}

#[derive(Debug)]
pub struct SubmitCompletion {
    pub id: SubmissionId,
    pub result: Result<Value, SubmitError>,
}

pub fn execute_invocation(invocation: SubmitInvocation, transport: &dyn Transport) -> SubmitCompletion {
    let result = send(&invocation, transport);
    SubmitCompletion {
        id: invocation.id,
        result,
    }
}

fn send(invocation: &SubmitInvocation, transport: &dyn Transport) -> Result<Value, SubmitError> {
    let encoded = multipart::encode(&invocation.payload).map_err(SubmitError::Encode)?;
    let request = HttpRequest {
        path: invocation.endpoint.clone(),
        content_type: encoded.content_type,
        body: encoded.bytes,
    };

    let response = transport.post(&request)?;
    if !response.is_success() {
        return Err(SubmitError::Status {
            status: response.status,
        });
    }

    Ok(serde_json::from_slice(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::{SubmitInvocation, execute_invocation};
    use crate::form::payload::FormPayload;
    use crate::submission::error::SubmitError;
    use crate::task::id::SubmissionId;
    use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
    use serde_json::json;
    use std::sync::Mutex;

    struct OneShot {
        response: Mutex<Option<Result<HttpResponse, TransportError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl OneShot {
        fn new(response: Result<HttpResponse, TransportError>) -> Self {
            Self {
                response: Mutex::new(Some(response)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for OneShot {
        fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().expect("lock").push(request.clone());
            self.response
                .lock()
                .expect("lock")
                .take()
                .expect("only one request expected")
        }
    }

    fn invocation() -> SubmitInvocation {
        SubmitInvocation {
            id: SubmissionId::new(1),
            endpoint: "/workouts/".to_string(),
            payload: [("name", "Leg Day")].into_iter().collect::<FormPayload>(),
        }
    }

    #[test]
    fn success_decodes_json() {
        let transport = OneShot::new(Ok(HttpResponse::new(200, r#"{"id": 7}"#)));
        let completion = execute_invocation(invocation(), &transport);

        assert_eq!(completion.id, SubmissionId::new(1));
        assert_eq!(completion.result.expect("success"), json!({"id": 7}));

        let seen = transport.seen.lock().expect("lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/workouts/");
        assert!(seen[0].content_type.starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn failure_status_keeps_the_code() {
        let transport = OneShot::new(Ok(HttpResponse::new(422, r#"{"detail": "bad"}"#)));
        let err = execute_invocation(invocation(), &transport)
            .result
            .expect_err("422 is a failure");

        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "HTTP error! status: 422");
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let transport = OneShot::new(Ok(HttpResponse::new(200, "<html>ok</html>")));
        let err = execute_invocation(invocation(), &transport)
            .result
            .expect_err("body is not json");
        assert!(matches!(err, SubmitError::Decode(_)));
    }

    #[test]
    fn transport_errors_pass_through() {
        let transport = OneShot::new(Err(TransportError::Network("connection refused".to_string())));
        let err = execute_invocation(invocation(), &transport)
            .result
            .expect_err("network failure");
        assert!(matches!(err, SubmitError::Transport(TransportError::Network(_))));
    }
}
