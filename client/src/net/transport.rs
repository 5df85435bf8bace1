//! HTTP transport seam under the REST client.
//!
//! Client-side (hydrate): `FetchTransport` sends through `gloo-net` with a
//! timeout race. Server-side (SSR): it refuses with `ApiError::Unavailable`,
//! since the API is only called from the browser. Tests plug in their own
//! `Transport`.

#![allow(clippy::unused_async)]

use std::future::Future;

use super::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully resolved API request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    pub body: RequestBody,
}

#[derive(Clone, Debug)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// One field of a multipart form.
#[derive(Clone, Debug)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self { name: name.to_owned(), value: FormValue::Text(value.into()) }
    }
}

#[derive(Clone, Debug)]
pub enum FormValue {
    Text(String),
    File(Attachment),
}

/// A user-selected document to upload.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub name: String,
    #[cfg(feature = "hydrate")]
    pub file: web_sys::File,
}

#[cfg(feature = "hydrate")]
impl From<web_sys::File> for Attachment {
    fn from(file: web_sys::File) -> Self {
        Self { name: file.name(), file }
    }
}

/// Status and raw body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    /// Send `request` and return whatever status came back.
    ///
    /// Only failures to obtain a response are errors; status handling belongs
    /// to the caller.
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// Browser `fetch` transport.
#[derive(Clone, Copy, Debug)]
pub struct FetchTransport {
    pub timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let fetch = fetch(request);
            let timeout = gloo_timers::future::TimeoutFuture::new(self.timeout_ms);
            futures::pin_mut!(fetch);
            futures::pin_mut!(timeout);
            match select(fetch, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(ApiError::Timeout(self.timeout_ms)),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(request: ApiRequest) -> Result<ApiResponse, ApiError> {
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
    };
    if let Some(token) = &request.bearer {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }
    let built = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let resp = built.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    log::debug!("{:?} {} -> {status}", request.method, request.url);
    Ok(ApiResponse { status, body })
}

#[cfg(feature = "hydrate")]
fn form_data(parts: Vec<FormPart>) -> Result<web_sys::FormData, ApiError> {
    let form = web_sys::FormData::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
    for part in parts {
        match part.value {
            FormValue::Text(text) => form.append_with_str(&part.name, &text),
            FormValue::File(attachment) => {
                form.append_with_blob_and_filename(&part.name, &attachment.file, &attachment.name)
            }
        }
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    }
    Ok(form)
}
