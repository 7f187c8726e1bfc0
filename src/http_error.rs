//! HTTP-flavoured error values for use as a failure cause.
//!
//! [`HttpError`] pairs a message with a status code from a fixed table of
//! client (4xx) and server (5xx) errors. Every entry in the table gets a
//! factory that uses the standard reason phrase as the message:
//!
//! ```rust
//! use tryable::{HttpError, Try};
//!
//! fn find_user(id: u32) -> Try<&'static str, HttpError> {
//!     Try::of(|| match id {
//!         1 => Ok("ada"),
//!         _ => Err(HttpError::not_found().with_message(format!("no user {}", id))),
//!     })
//! }
//!
//! let err = find_user(7).get_cause().unwrap();
//! assert_eq!(err.status_code(), 404);
//! assert_eq!(err.message(), "no user 7");
//! assert!(err.is_client_error());
//! ```

use std::error::Error;
use std::fmt;

macro_rules! status_table {
    ($( $variant:ident => $code:literal, $factory:ident, $reason:literal; )+) => {
        /// A client or server error status with a standard reason phrase.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u16)]
        pub enum StatusCode {
            $(
                #[doc = concat!("`", stringify!($code), " ", $reason, "`")]
                $variant = $code,
            )+
        }

        impl StatusCode {
            /// Every status in the table, in ascending order.
            pub const ALL: &'static [StatusCode] = &[$(StatusCode::$variant),+];

            /// The numeric status code.
            #[inline]
            pub fn code(self) -> u16 {
                self as u16
            }

            /// The standard reason phrase.
            pub fn reason(self) -> &'static str {
                match self {
                    $(StatusCode::$variant => $reason,)+
                }
            }

            /// Look up a table entry by its numeric code.
            pub fn from_code(code: u16) -> Option<StatusCode> {
                match code {
                    $($code => Some(StatusCode::$variant),)+
                    _ => None,
                }
            }
        }

        impl HttpError {
            $(
                #[doc = concat!("`", stringify!($code), " ", $reason, "` with the standard reason phrase.")]
                #[inline]
                pub fn $factory() -> HttpError {
                    HttpError::from(StatusCode::$variant)
                }
            )+
        }
    };
}

status_table! {
    BadRequest => 400, bad_request, "Bad Request";
    Unauthorized => 401, unauthorized, "Unauthorized";
    PaymentRequired => 402, payment_required, "Payment Required";
    Forbidden => 403, forbidden, "Forbidden";
    NotFound => 404, not_found, "Not Found";
    MethodNotAllowed => 405, method_not_allowed, "Method Not Allowed";
    NotAcceptable => 406, not_acceptable, "Not Acceptable";
    ProxyAuthenticationRequired => 407, proxy_authentication_required, "Proxy Authentication Required";
    RequestTimeout => 408, request_timeout, "Request Timeout";
    Conflict => 409, conflict, "Conflict";
    Gone => 410, gone, "Gone";
    LengthRequired => 411, length_required, "Length Required";
    PreconditionFailed => 412, precondition_failed, "Precondition Failed";
    PayloadTooLarge => 413, payload_too_large, "Payload Too Large";
    UriTooLong => 414, uri_too_long, "URI Too Long";
    UnsupportedMediaType => 415, unsupported_media_type, "Unsupported Media Type";
    RangeNotSatisfiable => 416, range_not_satisfiable, "Range Not Satisfiable";
    ExpectationFailed => 417, expectation_failed, "Expectation Failed";
    ImATeapot => 418, im_a_teapot, "I'm a teapot";
    MisdirectedRequest => 421, misdirected_request, "Misdirected Request";
    UnprocessableEntity => 422, unprocessable_entity, "Unprocessable Entity";
    Locked => 423, locked, "Locked";
    FailedDependency => 424, failed_dependency, "Failed Dependency";
    TooEarly => 425, too_early, "Too Early";
    UpgradeRequired => 426, upgrade_required, "Upgrade Required";
    PreconditionRequired => 428, precondition_required, "Precondition Required";
    TooManyRequests => 429, too_many_requests, "Too Many Requests";
    RequestHeaderFieldsTooLarge => 431, request_header_fields_too_large, "Request Header Fields Too Large";
    UnavailableForLegalReasons => 451, unavailable_for_legal_reasons, "Unavailable For Legal Reasons";
    InternalServerError => 500, internal_server_error, "Internal Server Error";
    NotImplemented => 501, not_implemented, "Not Implemented";
    BadGateway => 502, bad_gateway, "Bad Gateway";
    ServiceUnavailable => 503, service_unavailable, "Service Unavailable";
    GatewayTimeout => 504, gateway_timeout, "Gateway Timeout";
    HttpVersionNotSupported => 505, http_version_not_supported, "HTTP Version Not Supported";
    VariantAlsoNegotiates => 506, variant_also_negotiates, "Variant Also Negotiates";
    InsufficientStorage => 507, insufficient_storage, "Insufficient Storage";
    LoopDetected => 508, loop_detected, "Loop Detected";
    NotExtended => 510, not_extended, "Not Extended";
    NetworkAuthenticationRequired => 511, network_authentication_required, "Network Authentication Required";
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// An error carrying a message and an HTTP status code.
///
/// `Display` prints the message alone, so an `HttpError` built with
/// [`HttpError::from_error`] reads the same as the error it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HttpError {
    message: String,
    status_code: u16,
}

impl HttpError {
    /// Build an error from any message and status code.
    ///
    /// The code is not checked against the table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::HttpError;
    ///
    /// let err = HttpError::new("Not Found", 404);
    /// assert_eq!(err.status_code(), 404);
    /// assert_eq!(err.message(), "Not Found");
    /// ```
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        HttpError {
            message: message.into(),
            status_code,
        }
    }

    /// Replace the message, keeping the status code.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            ..self
        }
    }

    /// Build an error whose message is `error`'s `Display` output.
    pub fn from_error<E>(error: &E, status_code: u16) -> Self
    where
        E: Error + ?Sized,
    {
        HttpError::new(error.to_string(), status_code)
    }

    /// Recover an `HttpError` from a boxed error.
    ///
    /// A box that already holds an `HttpError` yields it unchanged; anything
    /// else is wrapped with status 500 and its `Display` output as message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tryable::HttpError;
    ///
    /// let boxed: Box<dyn std::error::Error + Send + Sync> = "This is a test".into();
    /// let err = HttpError::cast(boxed);
    /// assert_eq!(err.status_code(), 500);
    /// assert_eq!(err.message(), "This is a test");
    ///
    /// let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(HttpError::gone());
    /// assert_eq!(HttpError::cast(boxed), HttpError::gone());
    /// ```
    pub fn cast(error: Box<dyn Error + Send + Sync>) -> Self {
        match error.downcast::<HttpError>() {
            Ok(http) => *http,
            Err(other) => HttpError::from_error(&*other, StatusCode::InternalServerError.code()),
        }
    }

    /// The error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The numeric status code.
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The table entry for this error's code, if there is one.
    pub fn status(&self) -> Option<StatusCode> {
        StatusCode::from_code(self.status_code)
    }

    /// Returns `true` for 4xx codes.
    #[inline]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Returns `true` for 5xx codes.
    #[inline]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }
}

impl From<StatusCode> for HttpError {
    fn from(status: StatusCode) -> Self {
        HttpError::new(status.reason(), status.code())
    }
}

impl Default for HttpError {
    fn default() -> Self {
        HttpError::internal_server_error()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for HttpError {}
