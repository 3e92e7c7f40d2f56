//! Diagnostic codes for categorizing compiler errors.
//!
//! Codes are grouped by compilation phase: `E1xxx` for lexical errors,
//! `E2xxx` for syntax errors, and `E3xxx` for name-resolution and codegen
//! errors.

/// A unique code identifying a diagnostic, e.g. `E2003`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    /// E1001: unexpected character.
    pub const E_LEX_UNEXPECTED_CHAR: Self = Self::new("E", 1001);
    /// E1002: unterminated string literal.
    pub const E_LEX_UNTERMINATED_STRING: Self = Self::new("E", 1002);
    /// E1003: malformed numeric literal (e.g. a trailing `.` with no digits).
    pub const E_LEX_INVALID_NUMBER: Self = Self::new("E", 1003);

    /// E2001: token doesn't fit the current production.
    pub const E_PARSE_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    /// E2002: a specific token was required but a different one was found.
    pub const E_PARSE_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    /// E2003: input ended mid-construct.
    pub const E_PARSE_UNEXPECTED_EOF: Self = Self::new("E", 2003);

    /// E3001: read of a name with no binding in scope.
    pub const E_SEM_UNDEFINED_VAR: Self = Self::new("E", 3001);
    /// E3002: call to a function with no matching declaration.
    pub const E_SEM_UNDEFINED_FN: Self = Self::new("E", 3002);
    /// E3003: call site argument count doesn't match the declaration.
    pub const E_SEM_ARITY_MISMATCH: Self = Self::new("E", 3003);
    /// E3004: `local` re-declares a name already local to the same frame.
    pub const E_SEM_DUPLICATE_LOCAL: Self = Self::new("E", 3004);
    /// E3005: two `func` declarations share a name.
    pub const E_SEM_DUPLICATE_FN: Self = Self::new("E", 3005);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_prefix_plus_four_digits() {
        assert_eq!(DiagnosticCode::E_PARSE_UNEXPECTED_EOF.as_str(), "E2003");
        assert_eq!(DiagnosticCode::new("E", 1).as_str(), "E0001");
    }

    #[test]
    fn codes_with_equal_fields_are_equal() {
        assert_eq!(DiagnosticCode::new("E", 3001), DiagnosticCode::new("E", 3001));
        assert_ne!(DiagnosticCode::new("E", 3001), DiagnosticCode::new("E", 3002));
    }
}
