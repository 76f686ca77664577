//! HTTP helpers for Lambda functions.

use lambda_http::http::header::{ACCEPT, CONTENT_TYPE};
use lambda_http::{Body, Request, Response};
use serde::Serialize;

use crate::models::SubmitError;
use crate::Error;

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Create the `{"errorCode": ...}` response for a failed submission.
pub fn error_response(error: &Error) -> Result<Response<Body>, lambda_http::Error> {
    json_response(
        error.status_code(),
        &SubmitError {
            error_code: error.error_code().to_string(),
        },
    )
}

pub fn html_response(status: u16, html: String) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(html))?)
}

pub fn text_response(status: u16, text: &str) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(text))?)
}

pub fn empty_response(status: u16) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder().status(status).body(Body::Empty)?)
}

/// Whether the caller asked for JSON rather than a page.
pub fn wants_json(event: &Request) -> bool {
    event
        .headers()
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

/// Minimal HTML escaping for text display.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
pub(crate) fn body_text(response: &Response<Body>) -> &str {
    std::str::from_utf8(response.body().as_ref()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let response = error_response(&Error::InvalidAction("NAP".into())).unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(body_text(&response), r#"{"errorCode":"invalid-action"}"#);
    }

    #[test]
    fn test_wants_json() {
        let event = lambda_http::http::Request::builder()
            .header("accept", "application/json, text/plain, */*")
            .body(Body::Empty)
            .unwrap();
        assert!(wants_json(&event));

        let event = lambda_http::http::Request::builder()
            .header("accept", "text/html,application/xhtml+xml")
            .body(Body::Empty)
            .unwrap();
        assert!(!wants_json(&event));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>\"a&b\"</b>"), "&lt;b&gt;&quot;a&amp;b&quot;&lt;/b&gt;");
    }
}
