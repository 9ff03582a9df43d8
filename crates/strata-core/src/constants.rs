//! Caps, thresholds, and fixed labels shared across the analyzers.

/// Version string stamped into every `ParserResult`.
pub const PARSER_VERSION: &str = concat!("strata-enhanced/", env!("CARGO_PKG_VERSION"));

/// Extensions the enhanced parser accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// Extensions treated as already-resolved source files during module path resolution.
pub const RECOGNIZED_SOURCE_EXTENSIONS: &[&str] =
    &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".mts", ".cts", ".json"];

/// Extension appended to extensionless module paths.
pub const DEFAULT_MODULE_EXTENSION: &str = ".ts";

/// Prefix marking a relation endpoint as an external package.
pub const EXTERNAL_PREFIX: &str = "external:";

/// Stack-overflow guard for the cycle-detection DFS.
pub const MAX_RECURSION_DEPTH: usize = 1000;

/// Safety valve for a single breadth-first depth traversal.
pub const MAX_BFS_ITERATIONS: usize = 10_000;

/// Above this many internal dependencies, average depth is approximated.
pub const AVERAGE_DEPTH_APPROXIMATION_THRESHOLD: usize = 1000;

/// Size of the most-used / least-used package lists.
pub const USAGE_TOP_N: usize = 10;

/// Cyclomatic complexity above which a function is reported.
pub const DEFAULT_COMPLEXITY_THRESHOLD: u32 = 10;

/// Default parse cache capacity (entries).
pub const DEFAULT_PARSE_CACHE_CAPACITY: u64 = 10_000;

/// Placeholder name for constructs with no syntactic name.
pub const UNKNOWN_NAME: &str = "unknown";
