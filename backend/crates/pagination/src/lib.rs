//! Opaque cursor and pagination envelope primitives.
//!
//! List endpoints hand clients an opaque continuation token and accept it
//! back on the next request. Locally produced tokens are URL-safe base64 over
//! a serde payload; tokens minted by a remote store are carried through
//! verbatim. Clients must treat every token as opaque.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Page length applied when a request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on the page length a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised by cursor and page-size handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Token is empty after trimming whitespace.
    #[error("pagination token must not be empty")]
    EmptyToken,
    /// Requested page size falls outside the permitted range.
    #[error("page size must be between 1 and {max}, got {value}")]
    PageSizeOutOfRange {
        /// The rejected value.
        value: u32,
        /// The permitted maximum.
        max: u32,
    },
    /// Payload could not be serialised into a token.
    #[error("pagination token could not be encoded: {message}")]
    Encode {
        /// Underlying serialisation failure.
        message: String,
    },
    /// Token is not one this service produced, or its payload type changed.
    #[error("pagination token could not be decoded: {message}")]
    Decode {
        /// Underlying deserialisation failure.
        message: String,
    },
}

/// Validated page length, `1..=`[`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    /// Construct a page size, rejecting zero and values above the cap.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageSize;
    ///
    /// assert_eq!(PageSize::new(25).map(PageSize::get), Ok(25));
    /// assert!(PageSize::new(0).is_err());
    /// ```
    pub const fn new(value: u32) -> Result<Self, PaginationError> {
        if value == 0 || value > MAX_PAGE_SIZE {
            return Err(PaginationError::PageSizeOutOfRange {
                value,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self(value))
    }

    /// The validated length.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The validated length as a `usize` for slicing.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque continuation token for a paginated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw token received from a client or a remote store.
    ///
    /// # Errors
    /// Returns [`PaginationError::EmptyToken`] for blank input.
    pub fn from_token(token: impl Into<String>) -> Result<Self, PaginationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(PaginationError::EmptyToken);
        }
        Ok(Self(token))
    }

    /// Encode a serde payload into a locally minted token.
    ///
    /// # Examples
    /// ```
    /// use pagination::Cursor;
    ///
    /// let cursor = Cursor::encode(&42_u64).expect("encodable");
    /// assert_eq!(cursor.decode::<u64>().expect("decodable"), 42);
    /// ```
    ///
    /// # Errors
    /// Returns [`PaginationError::Encode`] when the payload cannot be
    /// serialised.
    pub fn encode<T: Serialize>(payload: &T) -> Result<Self, PaginationError> {
        let json = serde_json::to_vec(payload).map_err(|error| PaginationError::Encode {
            message: error.to_string(),
        })?;
        Ok(Self(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decode a locally minted token back into its payload.
    ///
    /// # Errors
    /// Returns [`PaginationError::Decode`] for foreign or stale tokens.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, PaginationError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(self.0.as_bytes())
            .map_err(|error| PaginationError::Decode {
                message: error.to_string(),
            })?;
        serde_json::from_slice(&bytes).map_err(|error| PaginationError::Decode {
            message: error.to_string(),
        })
    }

    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the cursor, yielding the raw token.
    #[must_use]
    pub fn into_token(self) -> String {
        self.0
    }

    /// Render the token URL-escaped for embedding in a query string. The
    /// inbound direction needs no counterpart: query extraction unescapes
    /// the parameter before it reaches [`Cursor::from_token`].
    #[must_use]
    pub fn to_query_value(&self) -> String {
        url::form_urlencoded::byte_serialize(self.0.as_bytes()).collect()
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of results plus the continuation token for the next, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Token for the following page; `None` when the set is exhausted.
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    /// Build a page from its parts.
    #[must_use]
    pub fn new(items: Vec<T>, next: Option<Cursor>) -> Self {
        Self { items, next }
    }

    /// A page with no items and no continuation.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next: None,
        }
    }

    /// Map the item type while preserving the continuation token.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct OffsetToken {
        offset: usize,
    }

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(MAX_PAGE_SIZE)]
    fn page_size_accepts_in_range_values(#[case] value: u32) {
        let size = PageSize::new(value).expect("valid page size");
        assert_eq!(size.get(), value);
    }

    #[rstest]
    #[case(0)]
    #[case(MAX_PAGE_SIZE + 1)]
    fn page_size_rejects_out_of_range_values(#[case] value: u32) {
        let err = PageSize::new(value).expect_err("out of range");
        assert_eq!(
            err,
            PaginationError::PageSizeOutOfRange {
                value,
                max: MAX_PAGE_SIZE
            }
        );
    }

    #[test]
    fn page_size_defaults_to_ten() {
        assert_eq!(PageSize::default().get(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn cursor_round_trips_serde_payloads() {
        let cursor = Cursor::encode(&OffsetToken { offset: 30 }).expect("encode");
        let decoded: OffsetToken = cursor.decode().expect("decode");
        assert_eq!(decoded, OffsetToken { offset: 30 });
    }

    #[test]
    fn cursor_tokens_are_url_safe() {
        let cursor = Cursor::encode(&OffsetToken { offset: 12345 }).expect("encode");
        assert_eq!(cursor.to_query_value(), cursor.as_str());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn cursor_rejects_blank_tokens(#[case] raw: &str) {
        assert_eq!(Cursor::from_token(raw), Err(PaginationError::EmptyToken));
    }

    #[test]
    fn cursor_decode_rejects_foreign_tokens() {
        let cursor = Cursor::from_token("not-base64-json!").expect("non-empty");
        let err = cursor.decode::<OffsetToken>().expect_err("foreign token");
        assert!(matches!(err, PaginationError::Decode { .. }));
    }

    #[test]
    fn query_value_escapes_foreign_tokens() {
        // Remote stores may mint tokens containing URL-significant bytes.
        let cursor = Cursor::from_token("hdW=+&x/9").expect("non-empty");
        let escaped = cursor.to_query_value();
        assert!(!escaped.contains('&'));
        assert!(!escaped.contains('+'));
        let unescaped: String = url::form_urlencoded::parse(format!("after={escaped}").as_bytes())
            .find(|(key, _)| key == "after")
            .map(|(_, value)| value.into_owned())
            .expect("after parameter");
        assert_eq!(unescaped, cursor.as_str());
    }

    #[test]
    fn page_map_preserves_continuation() {
        let next = Cursor::from_token("abc").expect("non-empty");
        let page = Page::new(vec![1, 2, 3], Some(next.clone()));
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.next, Some(next));
    }

    #[test]
    fn empty_page_has_no_continuation() {
        let page: Page<u8> = Page::empty();
        assert!(page.items.is_empty());
        assert!(page.next.is_none());
    }
}
