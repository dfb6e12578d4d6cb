use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

/// HTTP method type, re-exported for use with error inspection.
pub use reqwest::Method;
/// HTTP status code type, re-exported for use with error inspection.
pub use reqwest::StatusCode;
use reqwest::header;
use serde_json::Value;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Error related to non-successful HTTP call
    Status,
    /// Error related to a value the API sent or the caller supplied that cannot be accepted
    Validation,
    /// Internal error from dependencies
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    /// Returns the classified HTTP failure, if this error is one.
    #[must_use]
    pub fn status_kind(&self) -> Option<StatusKind> {
        self.downcast_ref::<Status>().map(|status| status.kind)
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Validation {
            reason: message.into(),
        }
        .into()
    }

    pub fn status<S: Into<String>>(
        kind: StatusKind,
        status_code: StatusCode,
        method: Method,
        url: String,
        message: S,
    ) -> Self {
        Status {
            kind,
            status_code,
            method,
            url,
            message: message.into(),
        }
        .into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// The typed failure kinds the API is known to return.
///
/// [`StatusKind::Other`] covers any non-success status outside the fixed table
/// of [`StatusKind::from_status`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum StatusKind {
    BadRequest,
    NotFound,
    TooManyRequests,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    Other,
}

impl StatusKind {
    /// Maps a status code to its kind. Any status outside the seven known
    /// failure codes, including every 2xx, yields `None`.
    #[must_use]
    pub fn from_status(status_code: StatusCode) -> Option<Self> {
        let kind = match status_code.as_u16() {
            400 => Self::BadRequest,
            404 => Self::NotFound,
            429 => Self::TooManyRequests,
            500 => Self::InternalServerError,
            502 => Self::BadGateway,
            503 => Self::ServiceUnavailable,
            504 => Self::GatewayTimeout,
            _ => return None,
        };
        Some(kind)
    }

    /// The fixed human description attached to server-side failures.
    #[must_use]
    pub fn description(self) -> Option<&'static str> {
        match self {
            Self::InternalServerError => Some("Something is technically wrong."),
            Self::BadGateway => Some("The server returned an invalid or incomplete response."),
            Self::ServiceUnavailable => Some("Your requests are rate limited."),
            Self::GatewayTimeout => Some("504 Gateway Time-out"),
            Self::BadRequest | Self::NotFound | Self::TooManyRequests | Self::Other => None,
        }
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub struct Status {
    pub kind: StatusKind,
    pub status_code: StatusCode,
    pub method: Method,
    pub url: String,
    pub message: String,
}

impl Status {
    /// Classifies a response into a typed failure.
    ///
    /// Returns `None` for any status outside the table of
    /// [`StatusKind::from_status`]. Client errors append whatever detail the
    /// body's `meta.error_message` or `error_message` fields carry; a body that
    /// is not JSON simply contributes no detail. Server errors carry the fixed
    /// description of their kind instead.
    #[must_use]
    pub fn classify(
        method: &Method,
        url: &str,
        status_code: StatusCode,
        body: Option<&str>,
    ) -> Option<Self> {
        let kind = StatusKind::from_status(status_code)?;
        Some(Self::with_kind(kind, method, url, status_code, body))
    }

    pub(crate) fn with_kind(
        kind: StatusKind,
        method: &Method,
        url: &str,
        status_code: StatusCode,
        body: Option<&str>,
    ) -> Self {
        let base = format!("{} {url}: {}", method.as_str(), status_code.as_u16());
        let message = match kind.description() {
            Some(description) => format!("{base}: {description}"),
            None => format!("{base}{}", error_detail(body).unwrap_or_default()),
        };

        Self {
            kind,
            status_code,
            method: method.clone(),
            url: url.to_owned(),
            message,
        }
    }
}

/// Extracts `": <detail>"` from an error body, if one can be found.
fn error_detail(body: Option<&str>) -> Option<String> {
    let body = body.filter(|b| !b.trim().is_empty())?;
    let json: Value = serde_json::from_str(body).ok()?;

    fn non_empty(value: Option<&Value>) -> Option<&str> {
        value.and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    if let Some(message) = non_empty(json.get("meta").and_then(|meta| meta.get("error_message")))
    {
        return Some(format!(": {message}"));
    }

    let message = non_empty(json.get("error_message"))?;
    match non_empty(json.get("error_type")) {
        Some(error_type) => Some(format!(": {error_type}: {message}")),
        None => Some(format!(": {message}")),
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Status {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<header::InvalidHeaderValue> for Error {
    fn from(e: header::InvalidHeaderValue) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<Status> for Error {
    fn from(err: Status) -> Self {
        Error::with_source(Kind::Status, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://api.collegefootballdata.com/games?year=2018";

    fn classify(status: u16, body: Option<&str>) -> Option<Status> {
        let status_code = StatusCode::from_u16(status).expect("valid status");
        Status::classify(&Method::GET, URL, status_code, body)
    }

    #[test]
    fn not_found_without_body_should_end_in_status() {
        let status = classify(404, None).expect("404 is classified");
        assert_eq!(status.kind, StatusKind::NotFound);
        assert_eq!(status.message, format!("GET {URL}: 404"));
    }

    #[test]
    fn bad_request_should_append_error_type_and_message() {
        let status = classify(400, Some(r#"{"error_message":"bad","error_type":"Invalid"}"#))
            .expect("400 is classified");
        assert_eq!(status.kind, StatusKind::BadRequest);
        assert!(status.message.ends_with(": 400: Invalid: bad"), "{}", status.message);
    }

    #[test]
    fn error_message_without_type_should_append_message_only() {
        let status = classify(429, Some(r#"{"error_message":"slow down"}"#)).expect("classified");
        assert_eq!(status.kind, StatusKind::TooManyRequests);
        assert_eq!(status.message, format!("GET {URL}: 429: slow down"));
    }

    #[test]
    fn meta_error_message_should_take_precedence() {
        let body = r#"{"meta":{"error_message":"from meta"},"error_message":"top","error_type":"T"}"#;
        let status = classify(404, Some(body)).expect("classified");
        assert_eq!(status.message, format!("GET {URL}: 404: from meta"));
    }

    #[test]
    fn empty_error_message_should_be_ignored() {
        let status = classify(400, Some(r#"{"error_message":""}"#)).expect("classified");
        assert_eq!(status.message, format!("GET {URL}: 400"));
    }

    #[test]
    fn non_json_body_should_fall_back_to_base_message() {
        let status = classify(400, Some("<html>Bad Request</html>")).expect("classified");
        assert_eq!(status.kind, StatusKind::BadRequest);
        assert_eq!(status.message, format!("GET {URL}: 400"));
    }

    #[test]
    fn server_errors_should_use_fixed_descriptions() {
        let cases = [
            (500, StatusKind::InternalServerError, "Something is technically wrong."),
            (502, StatusKind::BadGateway, "The server returned an invalid or incomplete response."),
            (503, StatusKind::ServiceUnavailable, "Your requests are rate limited."),
            (504, StatusKind::GatewayTimeout, "504 Gateway Time-out"),
        ];

        for (code, kind, description) in cases {
            let status = classify(code, Some(r#"{"error_message":"ignored"}"#)).expect("classified");
            assert_eq!(status.kind, kind);
            assert_eq!(status.message, format!("GET {URL}: {code}: {description}"));
        }
    }

    #[test]
    fn success_and_unlisted_codes_should_not_be_classified() {
        for code in [200, 201, 204, 301, 401, 403, 422] {
            assert!(classify(code, None).is_none(), "{code} should not classify");
        }
    }

    #[test]
    fn status_into_error_should_expose_kind() {
        let error: Error = classify(503, None).expect("classified").into();

        assert_eq!(error.kind(), Kind::Status);
        assert_eq!(error.status_kind(), Some(StatusKind::ServiceUnavailable));
        assert!(error.to_string().contains("Your requests are rate limited."));
    }

    #[test]
    fn validation_error_should_have_no_status_kind() {
        let error = Error::validation("not a date");
        assert_eq!(error.kind(), Kind::Validation);
        assert_eq!(error.status_kind(), None);
        assert_eq!(error.to_string(), "Validation: invalid: not a date");
    }
}
