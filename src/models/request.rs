//! Inbound HTTP request as seen by the handler.

/// Platform-neutral view of an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    /// HTTP method, upper case
    pub method: String,

    /// Request path or full URL
    pub path: String,

    /// Raw body text
    pub body: String,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: impl Into<String>) -> Self {
        let method: String = method.into();
        Self {
            method: method.to_ascii_uppercase(),
            path: path.into(),
            body: body.into(),
        }
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new("POST", path, body)
    }

    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("POST")
    }
}
