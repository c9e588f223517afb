//! Exit codes for the ezyVet CLI
//!
//! Scripts driving the CLI can tell a bad filter apart from a rejected token
//! or an unreachable server by the process exit status.

/// Process exit codes for failed commands
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command line usage error (64), e.g. a filter that is not valid JSON
    UsageError = 64,

    /// Data format error (65), e.g. an API page without `meta` or `items`
    DataError = 65,

    /// System error (71), e.g. the token file cannot be written
    OSError = 71,

    /// Configuration error (78)
    ConfigError = 78,

    /// Authentication error (100), the token endpoint or the token check refused us
    AuthError = 100,

    /// Network error (101)
    NetworkError = 101,

    /// API error (102), a list endpoint answered with a non-200 status
    ApiError = 102,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_sysexits() {
        assert_eq!(ExitCode::UsageError.code(), 64);
        assert_eq!(ExitCode::DataError.code(), 65);
        assert_eq!(ExitCode::OSError.code(), 71);
        assert_eq!(ExitCode::ConfigError.code(), 78);
    }

    #[test]
    fn test_application_codes() {
        assert_eq!(ExitCode::AuthError.code(), 100);
        assert_eq!(ExitCode::NetworkError.code(), 101);
        assert_eq!(ExitCode::ApiError.code(), 102);
    }
}
