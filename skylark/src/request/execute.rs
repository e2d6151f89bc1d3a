//! Request execution with tracing instrumentation.

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, Span};

use super::Request;
use crate::error::{ClientError, ConfigError, SkylarkError, ValidationError};

impl Request {
    /// Executes the request and decodes the JSON response into `T`.
    ///
    /// Exactly one GET is issued. The send and the body read are both raced
    /// against the request's [`RequestContext`](crate::RequestContext); no
    /// timeout is added beyond what the transport was configured with.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The URL cannot be rendered ([`ConfigError::InvalidUrl`])
    /// - The transport fails ([`ClientError::Request`], verbatim)
    /// - The context is cancelled or its deadline passes
    /// - The server answers outside `200..300` ([`ClientError::HttpStatus`],
    ///   displayed as the raw response body)
    /// - The response body cannot be read ([`ClientError::BodyRead`])
    /// - The body is not JSON for `T` ([`ValidationError::JsonParse`])
    #[instrument(
        name = "skylark_request",
        skip(self),
        fields(
            collection = %self.collection,
            http.method = "GET",
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<T>(&self) -> Result<T, SkylarkError>
    where
        T: DeserializeOwned,
    {
        let url = self.render_url()?;
        Span::current().record("http.url", url.as_str());

        let http = self.transport()?;
        let response = self
            .context
            .run(http.get(url).send())
            .await?
            .map_err(ClientError::Request)?;

        let status = response.status();
        let status_code = status.as_u16();
        Span::current().record("http.status_code", status_code);
        debug!(status = status_code, "Response received");

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);

            let message = self
                .context
                .run(response.text())
                .await?
                .map_err(|source| ClientError::BodyRead {
                    status: status_code,
                    source,
                })?;

            return Err(ClientError::HttpStatus {
                status: status_code,
                message,
            }
            .into());
        }

        let body = self
            .context
            .run(response.bytes())
            .await?
            .map_err(|source| ClientError::BodyRead {
                status: status_code,
                source,
            })?;

        let value = serde_json::from_slice(&body).map_err(ValidationError::JsonParse)?;
        Span::current().record("otel.status_code", "OK");
        debug!(bytes = body.len(), "Query completed");

        Ok(value)
    }

    /// Executes the request and writes the decoded response into
    /// `destination`.
    ///
    /// `destination` is left untouched when an error is returned.
    ///
    /// ## Errors
    ///
    /// Same as [`Request::execute`].
    pub async fn execute_into<T>(&self, destination: &mut T) -> Result<(), SkylarkError>
    where
        T: DeserializeOwned,
    {
        *destination = self.execute().await?;
        Ok(())
    }

    /// Returns the injected transport or a freshly built default one.
    fn transport(&self) -> Result<reqwest::Client, ConfigError> {
        match &self.http {
            Some(http) => Ok(http.clone()),
            None => reqwest::Client::builder()
                .build()
                .map_err(ConfigError::Transport),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{method, path, query_param};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::context::RequestContext;
    use crate::error::{ClientError, ConfigError, SkylarkError, ValidationError};
    use crate::field::Field;
    use crate::filter::Filter;
    use crate::request::Request;

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Point {
        x: i64,
    }

    fn endpoint(server: &MockServer) -> String {
        format!("{}/", server.uri())
    }

    /// Serves one connection with a hand-written response, keeping the
    /// socket open for `hold` before closing it.
    async fn serve_raw(response: &'static [u8], hold: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(hold).await;
        });

        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_execute_decodes_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"x":1}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let point: Point = Request::new(endpoint(&mock_server), "points", "")
            .execute()
            .await
            .unwrap();
        assert_eq!(point, Point { x: 1 });
    }

    #[tokio::test]
    async fn test_execute_sends_merged_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/7/"))
            .and(query_param("fields", "id,name"))
            .and(query_param("expand", "team"))
            .and(query_param("age__gte", "18"))
            .and(query_param("order", "name"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"x":7}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let point: Point = Request::new(endpoint(&mock_server), "users", "7")
            .add_field(Field::new("id"))
            .add_field(Field::new("name"))
            .expand(Field::new("team"))
            .with_filter("age", Filter::gte(18))
            .order_by(Field::new("name"))
            .execute()
            .await
            .unwrap();
        assert_eq!(point.x, 7);
    }

    #[tokio::test]
    async fn test_error_status_uses_body_as_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&mock_server)
            .await;

        let mut destination = Point { x: 99 };
        let err = Request::new(endpoint(&mock_server), "points", "")
            .execute_into(&mut destination)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(destination, Point { x: 99 });
    }

    #[tokio::test]
    async fn test_server_error_body_is_not_parsed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string(r#"{"detail":"boom"}"#),
            )
            .mount(&mock_server)
            .await;

        let result = Request::new(endpoint(&mock_server), "points", "")
            .execute::<Point>()
            .await;

        match result {
            Err(SkylarkError::Client(ClientError::HttpStatus { status, message })) => {
                assert_eq!(status, 500);
                assert_eq!(message, r#"{"detail":"boom"}"#);
            }
            other => panic!("Expected HttpStatus error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_validation_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let result = Request::new(endpoint(&mock_server), "points", "")
            .execute::<Point>()
            .await;
        assert!(matches!(
            result,
            Err(SkylarkError::Validation(ValidationError::JsonParse(_)))
        ));
    }

    #[tokio::test]
    async fn test_render_error_skips_network() {
        let result = Request::new("", "points", "").execute::<Point>().await;
        assert!(matches!(
            result,
            Err(SkylarkError::Config(ConfigError::InvalidUrl(_)))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Nothing listens on port 1.
        let result = Request::new("http://127.0.0.1:1/", "points", "")
            .execute::<Point>()
            .await;
        assert!(matches!(
            result,
            Err(SkylarkError::Client(ClientError::Request(_)))
        ));
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"x":1}"#)
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&mock_server)
            .await;

        let context = RequestContext::background();
        let request = Request::new(endpoint(&mock_server), "points", "")
            .with_context(context.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            context.cancel();
        });

        let result = tokio::time::timeout(Duration::from_secs(5), request.execute::<Point>())
            .await
            .expect("execute should return promptly after cancellation");
        canceller.await.unwrap();

        let err = result.unwrap_err();
        assert!(err.is_cancellation());
        assert_eq!(err.to_string(), "context canceled");
    }

    #[tokio::test]
    async fn test_deadline_aborts_pending_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"x":1}"#)
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&mock_server)
            .await;

        let request = Request::new(endpoint(&mock_server), "points", "")
            .with_context(RequestContext::background().with_timeout(Duration::from_millis(50)));

        let result = tokio::time::timeout(Duration::from_secs(5), request.execute::<Point>())
            .await
            .expect("execute should return promptly after the deadline");
        assert!(matches!(
            result,
            Err(SkylarkError::Client(ClientError::DeadlineExceeded))
        ));
    }

    #[tokio::test]
    async fn test_injected_transport_is_used() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(wiremock::matchers::header("user-agent", "skylark-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"x":3}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let http = reqwest::Client::builder()
            .user_agent("skylark-test")
            .build()
            .unwrap();
        let point: Point = Request::new(endpoint(&mock_server), "points", "")
            .with_http_client(http)
            .execute()
            .await
            .unwrap();
        assert_eq!(point.x, 3);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_execute_emits_tracing_events() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"x":1}"#))
            .mount(&mock_server)
            .await;

        let _: Point = Request::new(endpoint(&mock_server), "points", "")
            .execute()
            .await
            .unwrap();

        assert!(logs_contain("skylark_request"));
        assert!(logs_contain("Query completed"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_rejected_query_is_returned_not_swallowed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&mock_server)
            .await;

        let result = Request::new(endpoint(&mock_server), "points", "")
            .execute::<Point>()
            .await;

        assert_eq!(result.unwrap_err().to_string(), "forbidden");
        assert!(logs_contain("Response received"));
    }

    #[tokio::test]
    async fn test_truncated_error_body_is_body_read_error() {
        let uri = serve_raw(
            b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nshort",
            Duration::ZERO,
        )
        .await;

        let result = Request::new(uri, "points", "").execute::<Point>().await;

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            SkylarkError::Client(ClientError::BodyRead { status: 500, .. })
        ));
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_truncated_success_body_is_body_read_error() {
        let uri = serve_raw(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"x\":",
            Duration::ZERO,
        )
        .await;

        let err = Request::new(uri, "points", "")
            .execute::<Point>()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SkylarkError::Client(ClientError::BodyRead { status: 200, .. })
        ));
        assert!(err
            .to_string()
            .starts_with("Unable to read response body from server"));
    }

    #[tokio::test]
    async fn test_cancel_aborts_stalled_body_read() {
        let uri = serve_raw(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"x\":",
            Duration::from_secs(30),
        )
        .await;

        let context = RequestContext::background();
        let request = Request::new(uri, "points", "").with_context(context.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            context.cancel();
        });

        let result = tokio::time::timeout(Duration::from_secs(5), request.execute::<Point>())
            .await
            .expect("execute should return promptly after cancellation");
        canceller.await.unwrap();

        assert!(matches!(
            result,
            Err(SkylarkError::Client(ClientError::Cancelled))
        ));
    }
}
