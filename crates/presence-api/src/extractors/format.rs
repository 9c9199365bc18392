//! Response flavour negotiated from the `Accept` header

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    /// Browser navigation; denials become a redirect to the sign-in page
    Html,
    /// Partial page update script
    Script,
}

impl ResponseFormat {
    /// First recognised media type in `Accept` wins; anything else is JSON
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(accept) = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
        else {
            return Self::Json;
        };

        for media in accept.split(',') {
            let media = media.split(';').next().unwrap_or_default().trim();
            match media.to_ascii_lowercase().as_str() {
                "text/javascript" | "application/javascript" => return Self::Script,
                "text/html" | "application/xhtml+xml" => return Self::Html,
                "application/json" => return Self::Json,
                _ => {}
            }
        }
        Self::Json
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
