//! Stable, machine-readable error codes.

/// Every error enum in the workspace maps each variant to a stable code string.
pub trait StrataErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const EMPTY_PATH: &str = "PARSE_EMPTY_PATH";
pub const UNSUPPORTED_EXTENSION: &str = "PARSE_UNSUPPORTED_EXTENSION";
pub const SOURCE_FILE_CREATION: &str = "PARSE_SOURCE_FILE_CREATION";
pub const TYPE_CHECKER_UNAVAILABLE: &str = "PARSE_TYPE_CHECKER_UNAVAILABLE";

pub const MISSING_ROOT_PATH: &str = "ANALYSIS_MISSING_ROOT_PATH";
pub const INVALID_INPUT: &str = "ANALYSIS_INVALID_INPUT";
pub const INVALID_PATTERN: &str = "ANALYSIS_INVALID_PATTERN";
pub const JSON_ERROR: &str = "ANALYSIS_JSON_ERROR";

pub const CONFIG_IO: &str = "CONFIG_IO_ERROR";
pub const CONFIG_PARSE: &str = "CONFIG_PARSE_ERROR";
pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
