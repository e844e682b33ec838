//! HTTP helpers for Lambda functions.

use lambda_http::http::response::Builder;
use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Headers attached to every response so the static page can call the API from any origin.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("content-type", "application/json"),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-headers", "Content-Type"),
    ("access-control-allow-methods", "POST, OPTIONS"),
];

fn with_cors(mut builder: Builder) -> Builder {
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    builder
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let response = with_cors(Response::builder().status(status))
        .body(Body::from(serde_json::to_string(data)?))
        .map_err(Box::new)?;
    Ok(response)
}

/// Answer a CORS preflight: 200, no body.
pub fn preflight_response() -> Result<Response<Body>, lambda_http::Error> {
    let response = with_cors(Response::builder().status(200))
        .body(Body::Empty)
        .map_err(Box::new)?;
    Ok(response)
}

/// Parse request body as JSON.
///
/// An empty body is a parse failure, the same as malformed JSON.
pub fn parse_json_body<T: DeserializeOwned>(body: &Body) -> crate::Result<T> {
    Ok(serde_json::from_slice(body.as_ref())?)
}
