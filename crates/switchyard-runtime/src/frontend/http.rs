//! HTTP front end.
//!
//! Framework-agnostic: a host server hands over the method, the logical path
//! (after any mount prefix is stripped) and the decoded query pairs, and gets
//! back an [`HttpResponse`] to translate into its own response type.

use serde_json::json;
use switchyard_core::{FailureKind, InvocationMode, InvocationRequest, InvocationResult, Payload};
use switchyard_framework::Dispatcher;

use super::{FrontendError, FrontendResult};

const TEXT: &str = "text/plain; charset=utf-8";
const JSON: &str = "application/json";
const OCTET_STREAM: &str = "application/octet-stream";

/// Builds a request from an HTTP method, logical path and query pairs.
///
/// The whole path becomes the action name; trailing segments past an
/// action's literal prefix are captured positionally during resolution, so
/// `GET /users/42` reaches `users(id)`. Query keys become named attributes
/// without any prefix. A repeated key keeps its last value.
///
/// ```rust
/// use switchyard_core::InvocationMode;
/// use switchyard_runtime::frontend::http::request_from_query;
///
/// let request = request_from_query("get", "/users/42", [("verbose", "1")]).unwrap();
/// assert_eq!(request.mode(), InvocationMode::Get);
/// assert_eq!(request.path(), vec!["users", "42"]);
/// assert_eq!(request.attr("verbose"), Some("1"));
/// ```
pub fn request_from_query<I, K, V>(
    method: &str,
    logical_path: &str,
    pairs: I,
) -> FrontendResult<InvocationRequest>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mode = InvocationMode::from_http_method(method)
        .ok_or_else(|| FrontendError::UnsupportedMethod(method.to_string()))?;

    let builder = pairs
        .into_iter()
        .fold(InvocationRequest::builder(logical_path, mode), |b, (k, v)| {
            b.attr(k, v)
        });
    Ok(builder.build()?)
}

/// HTTP status for a failure kind.
pub fn status_code(kind: FailureKind) -> u16 {
    match kind {
        FailureKind::NotFound => 404,
        FailureKind::ModeRejected => 405,
        FailureKind::MissingParameter | FailureKind::BindingTypeMismatch => 400,
        FailureKind::HandlerThrew | FailureKind::AmbiguousMatch => 500,
    }
}

/// `Content-Type` for a success payload.
pub fn content_type(payload: &Payload) -> &'static str {
    match payload {
        Payload::Empty | Payload::Text(_) => TEXT,
        Payload::Json(_) => JSON,
        Payload::Bytes(_) => OCTET_STREAM,
    }
}

/// A rendered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl HttpResponse {
    fn error(status: u16, kind: &str, detail: impl Into<String>) -> Self {
        let body = json!({ "error": kind, "detail": detail.into() });
        Self {
            status,
            content_type: JSON,
            body: body.to_string().into_bytes(),
        }
    }
}

impl From<InvocationResult> for HttpResponse {
    /// Success maps to 200 (204 for an empty payload). Failures map through
    /// [`status_code`] with a JSON body naming the kind and detail.
    fn from(result: InvocationResult) -> Self {
        match result {
            InvocationResult::Success(payload) => {
                let content_type = content_type(&payload);
                let (status, body) = match payload {
                    Payload::Empty => (204, Vec::new()),
                    Payload::Text(text) => (200, text.into_bytes()),
                    Payload::Json(value) => (200, value.to_string().into_bytes()),
                    Payload::Bytes(bytes) => (200, bytes),
                };
                Self {
                    status,
                    content_type,
                    body,
                }
            }
            InvocationResult::Failure(failure) => Self::error(
                status_code(failure.kind()),
                failure.kind().as_str(),
                failure.detail(),
            ),
        }
    }
}

/// Builds the request, dispatches it and renders the response.
///
/// Unsupported methods answer 405 and an empty path answers 404 without
/// reaching the dispatcher.
pub async fn handle<I, K, V>(
    dispatcher: &Dispatcher,
    method: &str,
    logical_path: &str,
    pairs: I,
) -> HttpResponse
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    match request_from_query(method, logical_path, pairs) {
        Ok(request) => dispatcher.dispatch(request).await.into(),
        Err(err @ FrontendError::UnsupportedMethod(_)) => {
            HttpResponse::error(405, "unsupported_method", err.to_string())
        }
        Err(err) => HttpResponse::error(404, FailureKind::NotFound.as_str(), err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;
    use switchyard_core::ActionResult;
    use switchyard_framework::{ActionRegistry, Context, Json, RegistryBuilder, action};

    use super::*;

    async fn list_users(ctx: Context) -> ActionResult<Json<Value>> {
        let limit: usize = ctx.attr_parsed("limit")?.unwrap_or(2);
        let users: Vec<_> = ["ada", "bob", "cy"].into_iter().take(limit).collect();
        Ok(Json(json!(users)))
    }

    async fn get_user(id: i64) -> String {
        format!("user {id}")
    }

    async fn delete_user(_id: i64) {}

    fn dispatcher() -> Dispatcher {
        let mut builder = RegistryBuilder::new();
        builder
            .register_all([
                action("users").get().handler(list_users),
                action("users").get().params(["id"]).handler(get_user),
                action("users").delete().params(["id"]).handler(delete_user),
            ])
            .unwrap();
        Dispatcher::new(Arc::new(ActionRegistry::with_snapshot(builder.build())))
    }

    #[test]
    fn unknown_methods_are_rejected() {
        assert_eq!(
            request_from_query("TRACE", "/users", Vec::<(String, String)>::new()),
            Err(FrontendError::UnsupportedMethod("TRACE".into()))
        );
    }

    #[test]
    fn failure_kinds_map_to_status_codes() {
        assert_eq!(status_code(FailureKind::NotFound), 404);
        assert_eq!(status_code(FailureKind::ModeRejected), 405);
        assert_eq!(status_code(FailureKind::MissingParameter), 400);
        assert_eq!(status_code(FailureKind::BindingTypeMismatch), 400);
        assert_eq!(status_code(FailureKind::HandlerThrew), 500);
        assert_eq!(status_code(FailureKind::AmbiguousMatch), 500);
    }

    #[test]
    fn payloads_pick_content_types() {
        assert_eq!(content_type(&Payload::Text("x".into())), TEXT);
        assert_eq!(content_type(&Payload::Json(Value::Null)), JSON);
        assert_eq!(content_type(&Payload::Bytes(vec![1])), OCTET_STREAM);
    }

    #[tokio::test]
    async fn trailing_path_segments_bind_as_arguments() {
        let dispatcher = dispatcher();
        let response = handle(&dispatcher, "GET", "/users/42", [("a", "b")]).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"user 42");
        assert_eq!(response.content_type, TEXT);
    }

    #[tokio::test]
    async fn query_keys_are_bare_attributes() {
        let dispatcher = dispatcher();
        let response = handle(&dispatcher, "GET", "/users", [("limit", "3")]).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, JSON);
        assert_eq!(response.body, br#"["ada","bob","cy"]"#);
    }

    #[tokio::test]
    async fn failures_render_as_json() {
        let dispatcher = dispatcher();

        let response = handle(&dispatcher, "POST", "/users", Vec::<(&str, &str)>::new()).await;
        assert_eq!(response.status, 405);
        let body: Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["error"], "mode_rejected");

        let response = handle(&dispatcher, "GET", "/users/abc", Vec::<(&str, &str)>::new()).await;
        assert_eq!(response.status, 400);

        let response = handle(&dispatcher, "GET", "/posts", Vec::<(&str, &str)>::new()).await;
        assert_eq!(response.status, 404);

        let response = handle(&dispatcher, "DELETE", "/users/7", Vec::<(&str, &str)>::new()).await;
        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());

        let response = handle(&dispatcher, "BREW", "/coffee", Vec::<(&str, &str)>::new()).await;
        assert_eq!(response.status, 405);
    }
}
