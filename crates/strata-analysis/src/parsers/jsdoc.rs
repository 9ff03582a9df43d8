//! `/** ... */` documentation comments.

use strata_core::types::jsdoc::{JSDocInfo, JSDocParam};
use strata_core::types::type_info::DegradedReason;
use tree_sitter::Node;

use super::syntax::{node_text, statement_owner};

/// The `/**` comment directly preceding a declaration, skipping decorators.
///
/// Exported and ambient declarations carry their comment on the wrapping
/// statement; variables carry it on their declaration list.
pub fn doc_comment_for(node: Node, source: &[u8]) -> Option<String> {
    let owner = statement_owner(node);
    let mut prev = owner.prev_named_sibling();
    while let Some(sibling) = prev {
        match sibling.kind() {
            "decorator" => prev = sibling.prev_named_sibling(),
            "comment" => {
                let text = node_text(sibling, source);
                return text.trim_start().starts_with("/**").then_some(text);
            }
            _ => return None,
        }
    }
    None
}

/// `None` when there is no comment or it carries nothing.
pub fn extract_jsdoc(node: Node, source: &[u8]) -> Result<Option<JSDocInfo>, DegradedReason> {
    let Some(comment) = doc_comment_for(node, source) else {
        return Ok(None);
    };
    let info = parse_jsdoc(&comment)?;
    Ok((!info.is_empty()).then_some(info))
}

/// Plain description of a member's doc comment, for type-info documentation.
pub fn member_documentation(node: Node, source: &[u8]) -> Option<String> {
    let comment = doc_comment_for(node, source)?;
    parse_jsdoc(&comment).ok()?.description
}

/// Parse the text of a `/** */` block into structured documentation.
pub fn parse_jsdoc(comment: &str) -> Result<JSDocInfo, DegradedReason> {
    let body = comment
        .trim()
        .strip_prefix("/**")
        .ok_or_else(|| malformed("missing `/**` opener"))?;
    let body = body
        .strip_suffix("*/")
        .ok_or_else(|| malformed("unterminated comment"))?;

    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();

    let mut description: Vec<&str> = Vec::new();
    let mut blocks: Vec<(String, Vec<&str>)> = Vec::new();
    for line in lines {
        if let Some(tag_line) = line.trim_start().strip_prefix('@') {
            let (tag, rest) = tag_line
                .split_once(char::is_whitespace)
                .unwrap_or((tag_line, ""));
            blocks.push((tag.to_string(), vec![rest.trim()]));
        } else if let Some((_, block)) = blocks.last_mut() {
            block.push(line);
        } else {
            description.push(line);
        }
    }

    let mut info = JSDocInfo {
        description: non_empty(description.join("\n")),
        ..Default::default()
    };
    info.summary = info.description.as_deref().map(first_sentence);

    for (tag, block) in blocks {
        let text = block.join("\n").trim().to_string();
        match tag.as_str() {
            "param" | "arg" | "argument" => info.params.push(parse_param(&text)),
            "returns" | "return" => info.returns = non_empty(text),
            "example" => info.examples.push(text),
            "see" => info.see.push(text),
            "deprecated" => {
                info.deprecated = true;
                if !text.is_empty() {
                    info.tags.insert(tag, text);
                }
            }
            "since" => info.since = non_empty(text),
            "author" => info.author = non_empty(text),
            "version" => info.version = non_empty(text),
            _ => {
                let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
                info.tags
                    .entry(tag)
                    .and_modify(|existing| {
                        existing.push('\n');
                        existing.push_str(&joined);
                    })
                    .or_insert(joined);
            }
        }
    }
    Ok(info)
}

fn malformed(message: &str) -> DegradedReason {
    DegradedReason::MalformedComment {
        message: message.to_string(),
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn first_sentence(description: &str) -> String {
    let first_paragraph = description.split("\n\n").next().unwrap_or(description);
    let flat = first_paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.find(". ") {
        Some(end) => flat[..=end].to_string(),
        None => flat,
    }
}

/// `{type} name - description`, `[name]`, `[name=default]`.
fn parse_param(text: &str) -> JSDocParam {
    let mut rest = text.trim();
    let mut param = JSDocParam::default();

    if rest.starts_with('{') {
        if let Some(close) = matching_brace(rest) {
            param.type_name = non_empty(rest[1..close].to_string());
            rest = rest[close + 1..].trim_start();
        }
    }

    let (name_part, tail) = if rest.starts_with('[') {
        match rest.find(']') {
            Some(close) => (&rest[..=close], &rest[close + 1..]),
            None => (rest, ""),
        }
    } else {
        rest.split_once(char::is_whitespace).unwrap_or((rest, ""))
    };

    if let Some(inner) = name_part.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        param.is_optional = true;
        match inner.split_once('=') {
            Some((name, default)) => {
                param.name = name.trim().to_string();
                param.default_value = non_empty(default.to_string());
            }
            None => param.name = inner.trim().to_string(),
        }
    } else {
        param.name = name_part.to_string();
    }
    if let Some(ty) = &param.type_name {
        if ty.ends_with('=') {
            param.is_optional = true;
        }
    }

    let tail = tail.trim_start();
    let tail = tail.strip_prefix('-').unwrap_or(tail);
    param.description = non_empty(tail.split_whitespace().collect::<Vec<_>>().join(" "));
    param
}

fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
