//! Trailing-newline normalization for loaded files
//!
//! Files reach the grammar through one of two doors, each with its own rule:
//!
//! - root and `extends` targets: drop the final character when the text ends in `%}` plus a
//!   newline, or in two newlines; otherwise make sure it ends in a newline.
//! - `include` targets: drop exactly one trailing newline, if there is one.

/// How a file is being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// The initial file or the target of an `extends`.
    Root,
    /// The target of an `include`.
    Include,
}

impl FileRole {
    pub fn normalize(self, text: &str) -> String {
        match self {
            FileRole::Root => normalize_root(text),
            FileRole::Include => normalize_include(text),
        }
    }
}

pub fn normalize_root(text: &str) -> String {
    if text.ends_with("%}\n") || text.ends_with("\n\n") {
        text[..text.len() - 1].to_string()
    } else if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

pub fn normalize_include(text: &str) -> String {
    text.strip_suffix('\n').unwrap_or(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("{% endblock %}\n", "{% endblock %}")]
    #[case("text\n\n", "text\n")]
    #[case("text\n", "text\n")]
    #[case("text", "text\n")]
    #[case("", "\n")]
    fn test_root_rule(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_root(input), expected);
    }

    #[rstest]
    #[case("hello\n", "hello")]
    #[case("hello\n\n", "hello\n")]
    #[case("hello", "hello")]
    #[case("", "")]
    fn test_include_rule(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_include(input), expected);
    }
}
