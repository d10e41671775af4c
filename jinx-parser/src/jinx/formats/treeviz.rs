//! Treeviz formatter for node trees
//!
//! One line per node, nesting drawn with box connectors:
//!
//! ```text
//! ⧉ unresolved
//! ├─ ⇡ base.html
//! └─ ▣ content [defined_in_base]
//!   └─ ¶ hello
//! ```
//!
//! Labels are truncated to 30 characters. Boolean attributes that are set show up as
//! `[name]` after the label.
//!
//! Icons
//!     Roots:
//!         Document, Template: ⧉
//!         Layer: §
//!         Branch: ➔
//!     Text:
//!         Literal: ¶
//!         Raw: 𝒱
//!         Comment: #
//!     Expressions:
//!         Eval: ƒ
//!         Condition: ?
//!         Foreach: ↻
//!     References:
//!         Include: ⊕
//!         Extends: ⇡
//!         Base: ⊤
//!     Inheritance:
//!         Block: ▣
//!         Super: ↑

use crate::jinx::ast::AstSnapshot;

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" | "Template" => "⧉",
        "Layer" => "§",
        "Branch" => "➔",
        "Literal" => "¶",
        "Raw" => "𝒱",
        "Comment" => "#",
        "Eval" => "ƒ",
        "Condition" => "?",
        "Foreach" => "↻",
        "Include" => "⊕",
        "Extends" => "⇡",
        "Base" => "⊤",
        "Block" => "▣",
        "Super" => "↑",
        _ => "○",
    }
}

fn line_text(snapshot: &AstSnapshot) -> String {
    let mut text = format!(
        "{} {}",
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, LABEL_WIDTH)
    );
    for (key, value) in &snapshot.attributes {
        if value == "true" {
            text.push_str(&format!(" [{}]", key));
        }
    }
    text
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!("{}{} {}\n", prefix, connector, line_text(snapshot)));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
    }

    output
}

/// Render a snapshot, root line first.
pub fn to_treeviz_str(snapshot: &AstSnapshot) -> String {
    let mut output = format!("{}\n", line_text(snapshot));
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jinx::ast::snapshot_from_document;
    use crate::jinx::parsing::parse_str;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_nested_connectors() {
        let nodes = parse_str("{% if a %}x{% endif %}{{ b }}").unwrap();
        let output = to_treeviz_str(&snapshot_from_document(&nodes));
        assert_eq!(
            output,
            "⧉ unresolved\n├─ ? a\n│ └─ ➔ then\n│   └─ ¶ x\n└─ ƒ b\n"
        );
    }

    #[test]
    fn test_set_flags_are_listed() {
        let nodes = parse_str("{% block main %}{% endblock %}").unwrap();
        let output = to_treeviz_str(&snapshot_from_document(&nodes));
        assert_eq!(output, "⧉ unresolved\n└─ ▣ main [defined_in_base]\n");
    }
}
