//! Access token issued by the password and refresh-token grants.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// `OAuth` token pair with the metadata needed to decide freshness.
///
/// Timestamps are whole seconds since the Unix epoch. The server may send
/// them as integers or as floats; fractions are dropped toward the earlier
/// expiry. A refresh never mutates a token; it produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthToken {
    /// Token presented in the `Authorization` header.
    pub access_token: String,
    /// Token exchanged for a new pair once this one expires.
    pub refresh_token: String,
    /// Authorization scheme, usually `bearer`.
    pub token_type: String,
    /// Lifetime in seconds, counted from `created_at`.
    #[serde(deserialize_with = "whole_seconds")]
    pub expires_in: i64,
    /// Issue instant in seconds since the Unix epoch.
    #[serde(deserialize_with = "whole_seconds")]
    pub created_at: i64,
}

impl AuthToken {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: i64,
        created_at: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: token_type.into(),
            expires_in,
            created_at,
        }
    }

    /// Expiry instant in seconds since the Unix epoch.
    #[must_use]
    pub const fn expires_at_secs(&self) -> i64 {
        self.created_at.saturating_add(self.expires_in)
    }

    /// Expiry instant, or `None` if it is out of the representable range.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at_secs(), 0)
    }

    /// Returns true while `now` is strictly before the expiry instant.
    ///
    /// The expiry instant itself counts as expired.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() < self.expires_at_secs()
    }

    /// Short preview of a token suitable for logs (first 8 chars + ...).
    #[must_use]
    pub fn preview(token: &str) -> String {
        match token.char_indices().nth(8) {
            Some((cut, _)) if token.len() > 12 => format!("{}...", &token[..cut]),
            _ => token.to_string(),
        }
    }
}

/// Reads any JSON number as whole seconds, flooring fractions.
fn whole_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct SecondsVisitor;

    impl Visitor<'_> for SecondsVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number of seconds")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::custom(format!("{value} seconds is out of range")))
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            let floored = value.floor();
            if !floored.is_finite() || floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
                return Err(E::custom(format!("{value} seconds is out of range")));
            }
            Ok(floored as i64)
        }
    }

    deserializer.deserialize_any(SecondsVisitor)
}
