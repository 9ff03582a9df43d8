//! String-based path handling. Paths are `/`-separated; nothing touches the
//! file system.

use glob::{MatchOptions, Pattern};
use strata_core::constants::{DEFAULT_MODULE_EXTENSION, RECOGNIZED_SOURCE_EXTENSIONS};
use strata_core::errors::{AnalysisError, AnalysisResult};

/// `*` and `?` never cross a `/`; `**` spans segments.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Collapse `.` and `..` segments and duplicate separators.
///
/// `..` above the start of a relative path is kept; above `/` it is dropped.
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            s => parts.push(s),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

pub fn join(base: &str, relative: &str) -> String {
    if relative.starts_with('/') || base.is_empty() {
        return normalize(relative);
    }
    normalize(&format!("{base}/{relative}"))
}

/// Directory part of a path (`""` for a bare file name).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// `path` relative to `root`, or `path` unchanged when it is not under `root`.
pub fn relative_to(root: &str, path: &str) -> String {
    let root = normalize(root);
    let path = normalize(path);
    if root.is_empty() {
        return path;
    }
    match path.strip_prefix(&root) {
        Some("") => String::new(),
        Some(rest) if rest.starts_with('/') => rest[1..].to_string(),
        _ if root == "/" => path.trim_start_matches('/').to_string(),
        _ => path,
    }
}

pub fn has_recognized_extension(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    RECOGNIZED_SOURCE_EXTENSIONS
        .iter()
        .any(|ext| file.len() > ext.len() && file.ends_with(ext))
}

/// Append the default module extension to extensionless paths.
pub fn with_module_extension(path: String) -> String {
    if has_recognized_extension(&path) {
        path
    } else {
        format!("{path}{DEFAULT_MODULE_EXTENSION}")
    }
}

/// A relative (`./`, `../`) or absolute specifier, as opposed to a package.
pub fn is_path_specifier(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
        || specifier.starts_with('/')
}

/// Package name of a bare specifier: first segment, or first two when scoped.
pub fn package_name(specifier: &str) -> Option<String> {
    if specifier.is_empty() || is_path_specifier(specifier) {
        return None;
    }
    let mut segments = specifier.split('/');
    let first = segments.next()?;
    if first.starts_with('@') {
        let second = segments.next().filter(|s| !s.is_empty())?;
        return Some(format!("{first}/{second}"));
    }
    Some(first.to_string())
}

pub fn compile_patterns(patterns: &[String]) -> AnalysisResult<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| AnalysisError::InvalidPattern {
                pattern: p.clone(),
                message: e.msg.to_string(),
            })
        })
        .collect()
}

pub fn matches_any(patterns: &[Pattern], path: &str) -> bool {
    patterns.iter().any(|p| p.matches_with(path, MATCH_OPTIONS))
}

/// Expand `{a,b}` alternation, which `glob::Pattern` does not support.
/// Groups expand left to right; nested braces are not supported.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[open..].find('}').map(|i| open + i) else {
        return vec![pattern.to_string()];
    };
    let (head, tail) = (&pattern[..open], &pattern[close + 1..]);
    pattern[open + 1..close]
        .split(',')
        .flat_map(|alt| expand_braces(&format!("{head}{alt}{tail}")))
        .collect()
}
