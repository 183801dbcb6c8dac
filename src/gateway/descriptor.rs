use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;
use tracing::warn;

/// Everything needed to dispatch one outbound backend call: method, path,
/// optional query pairs, optional JSON body and per-call header overrides.
///
/// Header overrides always win over gateway-injected context: the gateway
/// only fills in headers the caller left unset.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        RequestDescriptor {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header override. Invalid header names/values are dropped with a
    /// warning rather than failing the whole call.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                warn!("Dropping invalid header override '{}'", name);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test the builder surface end to end.
    #[test]
    fn test_builder_collects_parts() {
        let descriptor = RequestDescriptor::post("/customers")
            .with_query("page", "2")
            .with_body(serde_json::json!({ "name": "Acme" }))
            .with_header("x-project-id", "override-proj");

        assert_eq!(descriptor.method, Method::POST);
        assert_eq!(descriptor.path, "/customers");
        assert_eq!(descriptor.query, vec![("page".to_string(), "2".to_string())]);
        assert!(descriptor.body.is_some());
        assert_eq!(
            descriptor.headers.get("x-project-id").unwrap(),
            "override-proj"
        );
    }

    /// Test that an invalid header override is dropped instead of panicking.
    #[test]
    fn test_invalid_header_override_is_dropped() {
        let descriptor = RequestDescriptor::get("/x").with_header("bad header name", "v");
        assert!(descriptor.headers.is_empty());
    }
}
