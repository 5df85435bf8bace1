//! Recording transport for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use super::api::ApiClient;
use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};

pub(crate) const BASE_URL: &str = "http://api.test";

/// Canned responses keyed by method and path; unknown routes answer 404.
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: HashMap<String, Result<ApiResponse, ApiError>>,
    log: RefCell<Vec<ApiRequest>>,
}

fn route_key(method: Method, path: &str) -> String {
    format!("{method:?} {path}")
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, method: Method, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.routes
            .insert(route_key(method, path), Ok(ApiResponse { status, body: body.to_string() }));
        self
    }

    pub(crate) fn fail(mut self, method: Method, path: &str, err: ApiError) -> Self {
        self.routes.insert(route_key(method, path), Err(err));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.log.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request.url.strip_prefix(BASE_URL).unwrap_or(&request.url).to_owned();
        let key = route_key(request.method, &path);
        self.log.borrow_mut().push(request);
        self.routes.get(&key).cloned().unwrap_or_else(|| {
            Ok(ApiResponse { status: 404, body: r#"{"message":"not found"}"#.to_owned() })
        })
    }
}

pub(crate) fn mock_client(transport: MockTransport) -> ApiClient<MockTransport> {
    ApiClient::new(BASE_URL, transport)
}
