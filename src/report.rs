// src/report.rs
// =============================================================================
// The outcome of scanning one URL, and the two ways we print it.
//
// Text format (one block per URL):
//
//   https://example.com
//   	count: 3
//   	error: <nil>
//
// JSON format (one object per line, so results can stream as they finish):
//
//   {"link":"https://example.com","count":3,"error":null}
// =============================================================================

use std::fmt;

use serde::{Serialize, Serializer};

use crate::scan::FetchError;

// Result for a single URL
//
// count is 0 whenever the page couldn't be fetched. The one case where count
// and error are both meaningful is a body that broke off mid-scan.
#[derive(Debug, Serialize)]
pub struct PageResult {
    /// The URL that was requested
    pub link: String,
    /// Number of exact-match tokens found
    pub count: u64,
    /// What went wrong, if anything
    #[serde(serialize_with = "error_as_string")]
    pub error: Option<FetchError>,
}

impl PageResult {
    pub fn new(link: String, count: u64, error: Option<FetchError>) -> Self {
        Self { link, count, error }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// One-line JSON rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for PageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\tcount: {}\n\terror: ", self.link, self.count)?;
        match &self.error {
            Some(e) => write!(f, "{}", e),
            None => write!(f, "<nil>"),
        }
    }
}

fn error_as_string<S: Serializer>(error: &Option<FetchError>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_str(&e.to_string()),
        None => s.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_display_success() {
        let result = PageResult::new("http://a.test/".to_string(), 2, None);
        assert_eq!(result.to_string(), "http://a.test/\n\tcount: 2\n\terror: <nil>");
        assert!(result.is_ok());
    }

    #[test]
    fn test_display_error() {
        let error = FetchError::NotOk { status: StatusCode::NOT_FOUND };
        let result = PageResult::new("http://a.test/".to_string(), 0, Some(error));
        assert_eq!(
            result.to_string(),
            "http://a.test/\n\tcount: 0\n\terror: did not receive 200 OK"
        );
        assert!(!result.is_ok());
    }

    #[test]
    fn test_json() {
        let result = PageResult::new("http://a.test/".to_string(), 5, None);
        assert_eq!(
            result.to_json().unwrap(),
            r#"{"link":"http://a.test/","count":5,"error":null}"#
        );

        let error = FetchError::NotOk { status: StatusCode::BAD_GATEWAY };
        let result = PageResult::new("http://b.test/".to_string(), 0, Some(error));
        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["error"], "did not receive 200 OK");
        assert_eq!(value["count"], 0);
    }
}
