use rquest::{Client, RequestBuilder, Response};
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

pub struct HttpClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(settings: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        for (key, value) in settings.headers.iter() {
            if let (Ok(header_name), Ok(header_value)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value)
            ) {
                headers.insert(header_name, header_value);
                debug!(header_key = key, "Adding default header");
            } else {
                error!(header_key = key, "Invalid header, skipping");
            }
        }

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        debug!(base_url = %settings.base_url, "Created API client");

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);

        for (key, value) in self.headers.iter() {
            request = request.header(key, value);
        }

        debug!(method = %method, url = url, "Creating request");

        request
    }

    /// Sends the request and turns every non-2xx status into an error.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        debug!(
            status = status.as_u16(),
            url = %response.url(),
            "Response received"
        );

        match status {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::FORBIDDEN => Err(Error::Forbidden),
            StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimit),
            status => {
                let body = response.bytes().await?;
                let body = String::from_utf8_lossy(&body).trim().to_string();
                error!(status = status.as_u16(), body = %body, "Request rejected");
                Err(Error::Status {
                    status: status.as_u16(),
                    body: if body.is_empty() {
                        status.canonical_reason().unwrap_or_default().to_string()
                    } else {
                        body
                    },
                })
            }
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            let body_str = String::from_utf8_lossy(&body);
            error!(
                error = %e,
                path = path,
                body = %body_str,
                "Failed to parse response"
            );
            Error::from(e)
        })
    }

    /// Like [`get_json`](Self::get_json) but an empty body, a JSON `null` or a 404 mean "none".
    pub async fn get_optional_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = match self.send(self.request(Method::GET, path)).await {
            Ok(response) => response,
            Err(Error::Status { status: 404, .. }) => {
                debug!(path = path, "Resource not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<T>>(&body).map_err(|e| {
            let body_str = String::from_utf8_lossy(&body);
            error!(
                error = %e,
                path = path,
                body = %body_str,
                "Failed to parse response"
            );
            Error::from(e)
        })
    }

    /// Fire a mutation. The response body is not interpreted.
    pub async fn send_json<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        self.send(request).await?;
        Ok(())
    }
}
