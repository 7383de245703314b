//! HTTP status code of a response.

/// Status code the server answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Wraps a numeric status code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// True for `200..=299`, the only range a transport hands back.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.0, 200..=299)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_range_is_inclusive_of_200_and_299() {
        assert!(!StatusCode::new(199).is_success());
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(299).is_success());
        assert!(!StatusCode::new(300).is_success());
        assert!(!StatusCode::new(401).is_success());
    }

    #[test]
    fn test_display_is_numeric() {
        assert_eq!(StatusCode::new(404).to_string(), "404");
        assert_eq!(StatusCode::new(404).as_u16(), 404);
    }
}
