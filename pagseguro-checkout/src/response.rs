//! Checkout response decoding.
//!
//! The service answers HTTP 200 for both outcomes, with a body whose shape
//! alone tells them apart: either an `<errors>` list or a `<code>`/`<data>`
//! pair. The body is decoded once into a superset document and classified by
//! the presence of errors, which take precedence.
//!
//! Bodies may be declared in a non-UTF-8 charset (the live service answers in
//! ISO-8859-1); they are transcoded before parsing.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::{Reader, de::from_str, events::Event};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::{
    error::{CheckoutError, Result},
    xml::ROOT_ELEMENT,
};

/// Root element of a bare error-list document.
const ERRORS_ROOT: &str = "errors";

/// Successful checkout: the code the buyer is redirected with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutResponse {
    /// Checkout code, used to build the payment page URL.
    pub code: String,
    /// Data token returned alongside the code, empty if absent.
    pub data: String,
    /// Creation timestamp as sent by the service, if present.
    pub date: Option<String>,
}

/// One error reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteError {
    /// Numeric error code, e.g. `11004`.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

/// Errors reported by the service, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Reported errors; never empty inside [`CheckoutResult::Rejected`].
    pub errors: Vec<RemoteError>,
}

/// Outcome of a checkout submission.
///
/// Exactly one outcome is populated. Local, network and decode failures are
/// all [`CheckoutResult::Failed`] and carry no service payload.
#[must_use]
#[derive(Debug)]
pub enum CheckoutResult {
    /// The service accepted the request.
    Success(CheckoutResponse),
    /// The service rejected the request with one or more errors.
    Rejected(ErrorResponse),
    /// The request was not sent, not answered, or the answer was unreadable.
    Failed(CheckoutError),
}

impl CheckoutResult {
    /// Whether the service accepted the request.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Success payload, if any.
    pub fn response(&self) -> Option<&CheckoutResponse> {
        match self {
            Self::Success(response) => Some(response),
            _ => None,
        }
    }

    /// Errors reported by the service; empty unless rejected.
    pub fn errors(&self) -> &[RemoteError] {
        match self {
            Self::Rejected(response) => &response.errors,
            _ => &[],
        }
    }

    /// Local failure cause, if the exchange did not complete.
    pub fn failure(&self) -> Option<&CheckoutError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorList {
    #[serde(default)]
    error: Vec<RemoteError>,
}

/// Union of the success and error shapes.
#[derive(Debug, Default, Deserialize)]
struct ResponseDocument {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    errors: Option<ErrorList>,
    /// Errors directly under the root, as in an `<errors>` root document.
    #[serde(default)]
    error: Vec<RemoteError>,
}

/// Decodes a raw response body into a [`CheckoutResult`].
///
/// `content_type` is the response `Content-Type` header, consulted for a
/// charset when the XML declaration names none.
///
/// # Examples
///
/// ```
/// use pagseguro_checkout::decode_response;
///
/// let body = b"<checkout><code>ABC</code><data>XYZ</data></checkout>";
/// let result = decode_response(body, None);
/// assert!(result.is_success());
/// assert_eq!(result.response().unwrap().code, "ABC");
/// ```
pub fn decode_response(body: &[u8], content_type: Option<&str>) -> CheckoutResult {
    match parse_document(body, content_type).and_then(|(root, document)| classify(&root, document)) {
        Ok(result) => result,
        Err(err) => {
            error!(error = %err, "checkout response decode failed");
            CheckoutResult::Failed(err)
        }
    }
}

fn parse_document(body: &[u8], content_type: Option<&str>) -> Result<(String, ResponseDocument)> {
    let text = decode_text(body, content_type)?;
    let root = root_element(&text)?;
    let document = from_str(&text).map_err(|e| CheckoutError::Decode(e.to_string()))?;
    Ok((root, document))
}

/// Errors are read from a `<checkout>` or bare `<errors>` root; success needs `<checkout>`.
fn classify(root: &str, document: ResponseDocument) -> Result<CheckoutResult> {
    let mut errors = document.errors.map(|list| list.error).unwrap_or_default();
    errors.extend(document.error);

    if !errors.is_empty() && (root == ROOT_ELEMENT || root == ERRORS_ROOT) {
        warn!(count = errors.len(), first_code = errors[0].code, "checkout rejected by service");
        return Ok(CheckoutResult::Rejected(ErrorResponse { errors }));
    }

    if root != ROOT_ELEMENT {
        return Err(CheckoutError::Decode(format!("unexpected root element <{root}>")));
    }

    match document.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => {
            info!("checkout accepted");
            Ok(CheckoutResult::Success(CheckoutResponse {
                code: code.to_owned(),
                data: document.data.as_deref().map(str::trim).unwrap_or_default().to_owned(),
                date: document.date,
            }))
        }
        _ => Err(CheckoutError::Decode("response has neither errors nor a checkout code".to_owned())),
    }
}

/// Transcodes a response body to UTF-8.
///
/// The charset comes from the XML declaration, then the `Content-Type`
/// charset parameter, then defaults to UTF-8. A byte order mark overrides all
/// three. Malformed sequences are replaced rather than rejected.
///
/// # Errors
///
/// Returns [`CheckoutError::Decode`] if the declared charset is unknown.
pub fn decode_text<'a>(body: &'a [u8], content_type: Option<&str>) -> Result<Cow<'a, str>> {
    let label = declared_encoding(body).or_else(|| content_type.and_then(charset_param));
    let encoding = match label.as_deref() {
        // UTF-16 labels on ASCII-compatible bytes resolve to UTF-8
        Some(label) => Encoding::for_label(label.as_bytes())
            .map(Encoding::output_encoding)
            .ok_or_else(|| CheckoutError::Decode(format!("unsupported charset: {label}")))?,
        None => UTF_8,
    };

    let (text, used, had_errors) = encoding.decode(body);
    debug!(charset = used.name(), bytes = body.len(), "decoded checkout response");
    if had_errors {
        warn!(charset = used.name(), "checkout response contained malformed sequences");
    }
    Ok(text)
}

/// Reads the `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(body: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Decl(decl)) => {
                return decl
                    .encoding()
                    .and_then(std::result::Result::ok)
                    .map(|label| String::from_utf8_lossy(&label).trim().to_owned());
            }
            Ok(Event::Text(text)) if text.iter().all(u8::is_ascii_whitespace) => buf.clear(),
            _ => return None,
        }
    }
}

/// Local name of the first element in the document.
fn root_element(text: &str) -> Result<String> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element) | Event::Empty(element)) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => {
                return Err(CheckoutError::Decode("response has no root element".to_owned()));
            }
            Ok(_) => {}
            Err(e) => return Err(CheckoutError::Decode(e.to_string())),
        }
    }
}

/// Extracts the `charset` parameter of a `Content-Type` value.
fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_owned())
            .filter(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<checkout>
    <code>8CF4BE7DCECEF0F004A6DFA0A8243412</code>
    <data>XYZ</data>
    <date>2010-12-02T10:11:28.000-02:00</date>
</checkout>"#;

    const ERRORS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<checkout>
    <errors>
        <error>
            <code>11004</code>
            <message>Currency is required.</message>
        </error>
        <error>
            <code>11005</code>
            <message>Currency invalid value: 100</message>
        </error>
    </errors>
</checkout>"#;

    #[test]
    fn test_success_document() {
        let result = decode_response(SUCCESS.as_bytes(), None);
        assert!(result.is_success());
        let response = result.response().unwrap();
        assert_eq!(response.code, "8CF4BE7DCECEF0F004A6DFA0A8243412");
        assert_eq!(response.data, "XYZ");
        assert_eq!(response.date.as_deref(), Some("2010-12-02T10:11:28.000-02:00"));
        assert!(result.errors().is_empty());
        assert!(result.failure().is_none());
    }

    #[test]
    fn test_minimal_success_document() {
        let result = decode_response(b"<checkout><code>ABC</code><data>XYZ</data></checkout>", None);
        let response = result.response().unwrap();
        assert_eq!(response.code, "ABC");
        assert_eq!(response.data, "XYZ");
        assert!(response.date.is_none());
    }

    #[test]
    fn test_success_without_data() {
        let result = decode_response(b"<checkout><code>ABC</code></checkout>", None);
        assert_eq!(result.response().unwrap().data, "");
    }

    #[test]
    fn test_error_document() {
        let result = decode_response(ERRORS.as_bytes(), None);
        assert!(!result.is_success());
        assert!(result.response().is_none());
        assert_eq!(result.errors(), [
            RemoteError { code: 11004, message: "Currency is required.".to_owned() },
            RemoteError { code: 11005, message: "Currency invalid value: 100".to_owned() },
        ]);
    }

    #[test]
    fn test_errors_take_precedence_over_code() {
        let body = b"<checkout><code>ABC</code><data>XYZ</data>\
            <errors><error><code>10001</code><message>Email is required.</message></error></errors>\
            </checkout>";
        let result = decode_response(body, None);
        assert!(matches!(result, CheckoutResult::Rejected(_)));
        assert_eq!(result.errors()[0].code, 10001);
    }

    #[test]
    fn test_bare_errors_root() {
        let body = b"<?xml version=\"1.0\"?><errors><error><code>10003</code>\
            <message>Email invalid value.</message></error></errors>";
        let result = decode_response(body, None);
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].message, "Email invalid value.");
    }

    #[test]
    fn test_empty_error_list_falls_back_to_success() {
        let body = b"<checkout><errors></errors><code>ABC</code></checkout>";
        let result = decode_response(body, None);
        assert_eq!(result.response().unwrap().code, "ABC");
    }

    #[test]
    fn test_neither_shape_fails() {
        let result = decode_response(b"<checkout><status>ok</status></checkout>", None);
        assert!(matches!(result.failure(), Some(CheckoutError::Decode(_))));
        assert!(result.errors().is_empty());
        assert!(result.response().is_none());
    }

    #[test]
    fn test_garbage_fails() {
        let result = decode_response(b"<html><body>Service Unavailable", None);
        assert!(matches!(result, CheckoutResult::Failed(_)));

        let result = decode_response(b"", None);
        assert!(matches!(result, CheckoutResult::Failed(_)));
    }

    #[test]
    fn test_non_numeric_error_code_fails() {
        let body = b"<errors><error><code>abc</code><message>m</message></error></errors>";
        let result = decode_response(body, None);
        assert!(matches!(result.failure(), Some(CheckoutError::Decode(_))));
    }

    #[test]
    fn test_latin1_declared_body() {
        let mut body = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><errors><error><code>11013</code><message>Informa".to_vec();
        body.extend_from_slice(&[0xE7, 0xE3, 0x6F]); // "ção" in Latin-1
        body.extend_from_slice(b" inv\xE1lida</message></error></errors>");

        let result = decode_response(&body, None);
        assert_eq!(result.errors()[0].message, "Informação inválida");
    }

    #[test]
    fn test_latin1_from_content_type() {
        let body = b"<checkout><code>ABC</code><data>S\xE3o Paulo</data></checkout>";
        let result = decode_response(body, Some("application/xml; charset=ISO-8859-1"));
        assert_eq!(result.response().unwrap().data, "São Paulo");
    }

    #[test]
    fn test_declaration_wins_over_content_type() {
        let body = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><checkout><code>ABC</code><data>São</data></checkout>";
        let result = decode_response(body.as_bytes(), Some("application/xml;charset=ISO-8859-1"));
        assert_eq!(result.response().unwrap().data, "São");
    }

    #[test]
    fn test_unknown_charset_fails() {
        let body = b"<?xml version=\"1.0\" encoding=\"X-NOT-A-CHARSET\"?><checkout><code>A</code></checkout>";
        let result = decode_response(body, None);
        assert!(matches!(result.failure(), Some(CheckoutError::Decode(_))));
    }

    #[test]
    fn test_success_shape_under_foreign_root_fails() {
        let result = decode_response(b"<html><code>X</code></html>", None);
        assert!(matches!(result.failure(), Some(CheckoutError::Decode(_))));
        assert!(result.response().is_none());
    }

    #[test]
    fn test_error_shape_under_foreign_root_fails() {
        let body = b"<html><errors><error><code>10001</code><message>m</message></error></errors></html>";
        let result = decode_response(body, None);
        assert!(matches!(result.failure(), Some(CheckoutError::Decode(_))));
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_bare_errors_root_without_errors_fails() {
        let result = decode_response(b"<errors><code>ABC</code></errors>", None);
        assert!(matches!(result.failure(), Some(CheckoutError::Decode(_))));
    }

    #[test]
    fn test_code_and_data_are_trimmed() {
        let body = b"<checkout><code><![CDATA[ ABC ]]></code><data><![CDATA[ XYZ ]]></data></checkout>";
        let response = decode_response(body, None).response().cloned().unwrap();
        assert_eq!(response.code, "ABC");
        assert_eq!(response.data, "XYZ");
    }

    #[test]
    fn test_utf16_label_on_ascii_body() {
        let body = b"<?xml version=\"1.0\" encoding=\"UTF-16\"?><checkout><code>ABC</code><data>XYZ</data></checkout>";
        let result = decode_response(body, None);
        assert_eq!(result.response().unwrap().code, "ABC");
    }

    #[test]
    fn test_root_element() {
        assert_eq!(root_element("<?xml version=\"1.0\"?>\n<!-- c --><checkout><a/></checkout>").unwrap(), "checkout");
        assert_eq!(root_element("<errors/>").unwrap(), "errors");
        assert!(root_element("").is_err());
    }

    #[test]
    fn test_declared_encoding() {
        assert_eq!(
            declared_encoding(b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a/>").as_deref(),
            Some("ISO-8859-1")
        );
        assert_eq!(declared_encoding(b"<?xml version=\"1.0\"?><a/>"), None);
        assert_eq!(declared_encoding(b"<a/>"), None);
    }

    #[test]
    fn test_charset_param() {
        assert_eq!(charset_param("application/xml;charset=ISO-8859-1").as_deref(), Some("ISO-8859-1"));
        assert_eq!(charset_param("text/xml; Charset=\"utf-8\"").as_deref(), Some("utf-8"));
        assert_eq!(charset_param("application/xml"), None);
        assert_eq!(charset_param("application/xml; charset="), None);
    }
}
