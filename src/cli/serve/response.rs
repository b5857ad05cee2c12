//! HTTP response handlers.

use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
}

/// Respond with a rendered page.
pub fn respond_html(request: Request, status: u16, body: String) -> Result<()> {
    send_body(request, status, types::HTML, body.into_bytes())
}

/// Respond with an embedded asset.
pub fn respond_asset(request: Request, content_type: &'static str, body: &str) -> Result<()> {
    send_body(request, 200, content_type, body.as_bytes().to_vec())
}

/// Respond with 302 Found.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let response = Response::empty(StatusCode(302)).with_header(header("Location", location)?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, types::PLAIN, b"503 Service Unavailable".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, content_type);
    }
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header {key}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_requires_ascii() {
        assert!(header("Location", "/blogs").is_ok());
        assert!(header("Location", "/blögs").is_err());
    }
}
