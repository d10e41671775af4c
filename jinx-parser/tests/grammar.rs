//! Grammar tests over single files
//!
//! Covers the construct set, the whitespace-trim engine and the file-level rules
//! (`extends` placement, block close names, reserved `super`).

use jinx_parser::jinx::ast::{Expr, Node, UnresolvedNode};
use jinx_parser::jinx::testing::assert_nodes;
use jinx_parser::parse_str;
use rstest::rstest;

fn parse(source: &str) -> Vec<UnresolvedNode> {
    parse_str(source).unwrap_or_else(|err| panic!("{:?} failed to parse: {}", source, err))
}

#[test]
fn test_single_eval() {
    assert_eq!(parse("{{ foo }}"), vec![Node::Eval(Expr::var("foo"))]);
}

#[test]
fn test_condition_with_else() {
    assert_eq!(
        parse("{% if a %}X{% else %}Y{% endif %}"),
        vec![Node::Condition {
            condition: Expr::var("a"),
            then_branch: vec![Node::literal("X")],
            else_branch: Some(vec![Node::literal("Y")]),
        }]
    );
}

#[test]
fn test_trimmed_loop_has_no_outer_whitespace() {
    assert_eq!(
        parse("{%- for i in xs -%}  L  {%- endfor -%}"),
        vec![Node::Foreach {
            binder: "i".to_string(),
            iterable: Expr::var("xs"),
            body: vec![Node::literal("L")],
            else_branch: None,
        }]
    );
}

#[test]
fn test_trim_symmetry() {
    let trimmed = parse("  {%- if foo -%}  T  {%- endif -%}  ");
    let plain = parse("{% if foo %}T{% endif %}");
    assert_eq!(trimmed, plain);
}

#[test]
fn test_untrimmed_whitespace_is_kept() {
    assert_nodes(&parse("a\n  {% if foo %}\n  T\n{% endif %}\n"))
        .item_count(4)
        .item(0, |n| n.literal("a"))
        .item(1, |n| n.literal("\n  "))
        .item(2, |n| {
            n.assert_condition()
                .condition("foo")
                .no_else()
                .then_branch(|b| {
                    b.literal_text("\n  T\n");
                });
        })
        .item(3, |n| n.literal("\n"));
}

#[rstest]
#[case::left_only("x  {%- include \"p\" %}  y", "x", "  y")]
#[case::right_only("x  {% include \"p\" -%}  y", "x  ", "y")]
#[case::both("x  {%- include \"p\" -%}  y", "x", "y")]
fn test_trim_markers_are_independent(
    #[case] source: &str,
    #[case] before: &str,
    #[case] after: &str,
) {
    let nodes = parse(source);
    let include_at = nodes
        .iter()
        .position(|node| matches!(node, Node::Include(..)))
        .unwrap();
    let text_of = |nodes: &[UnresolvedNode]| -> String {
        nodes
            .iter()
            .filter_map(|node| match node {
                Node::Literal(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    };

    assert_eq!(text_of(&nodes[..include_at]), before);
    assert_eq!(text_of(&nodes[include_at + 1..]), after);
}

#[test]
fn test_function_calls_nest() {
    assert_eq!(
        parse("{{ join( users , sep(x.y) ) }}"),
        vec![Node::Eval(Expr::fun(
            "join",
            vec![Expr::var("users"), Expr::fun("sep", vec![Expr::var("x.y")])],
        ))]
    );
}

#[test]
fn test_foreach_with_else() {
    assert_nodes(&parse(
        "{% for user in site.users %}{{ user.name }}{% else %}nobody{% endfor %}",
    ))
    .item_count(1)
    .item(0, |n| {
        n.assert_foreach()
            .binder("user")
            .iterable("site.users")
            .body(|b| {
                b.item_count(1).item(0, |n| n.eval("user.name"));
            })
            .else_branch(|b| {
                b.item_count(1).item(0, |n| n.literal("nobody"));
            });
    });
}

#[rstest]
#[case::double_quotes("{% include \"partials/nav.html\" %}", "partials/nav.html")]
#[case::single_quotes("{% include 'partials/nav.html' %}", "partials/nav.html")]
#[case::quote_inside("{% include 'say \"hi\"' %}", "say \"hi\"")]
fn test_include_paths(#[case] source: &str, #[case] path: &str) {
    assert_eq!(parse(source), vec![Node::include(path)]);
}

#[test]
fn test_raw_is_opaque() {
    assert_eq!(
        parse("{% raw %}{{ not_an_expr( %}{% endraw %}"),
        vec![Node::Raw("{{ not_an_expr( %}".to_string())]
    );
}

#[test]
fn test_raw_keeps_whitespace_before_close() {
    assert_nodes(&parse("{% raw %} a {% endraw %}")).item(0, |n| n.raw(" a "));
    assert_nodes(&parse("{% raw %} a {%- endraw %}")).item(0, |n| n.raw(" a"));
}

#[test]
fn test_raw_open_can_trim_right() {
    assert_eq!(
        parse("{% raw -%}  x{% endraw %}"),
        vec![Node::Raw("x".to_string())]
    );
    assert_nodes(&parse("a {%- raw -%}\n x {%- endraw -%} b"))
        .item_count(3)
        .item(0, |n| n.literal("a"))
        .item(1, |n| n.raw("x"))
        .item(2, |n| n.literal("b"));
}

#[test]
fn test_comment_ends_at_first_close() {
    assert_nodes(&parse("{# one {# two #}rest"))
        .item_count(2)
        .item(0, |n| n.comment(" one {# two "))
        .item(1, |n| n.literal("rest"));
}

#[rstest]
#[case::unnamed("{% block x %}body{% endblock %}")]
#[case::named("{% block x %}body{% endblock x %}")]
fn test_block_close_forms_are_equivalent(#[case] source: &str) {
    assert_eq!(
        parse(source),
        vec![Node::block(true, "x", vec![Node::literal("body")])]
    );
}

#[test]
fn test_mismatched_block_close_fails() {
    assert!(parse_str("{% block x %}body{% endblock y %}").is_err());
}

#[test]
fn test_blocks_in_child_are_not_base_blocks() {
    assert_nodes(&parse(
        "{% extends \"base.html\" %}{% block x %}{% if a %}{% block y %}{% endblock %}{% endif %}{% endblock %}",
    ))
    .item_count(2)
    .item(0, |n| n.extends("base.html"))
    .item(1, |n| {
        n.assert_block()
            .name("x")
            .defined_in_base(false)
            .scoped(false)
            .body(|b| {
                b.item(0, |n| {
                    n.assert_condition().then_branch(|b| {
                        b.item(0, |n| {
                            n.assert_block().name("y").defined_in_base(false);
                        });
                    });
                });
            });
    });
}

#[test]
fn test_extends_may_follow_whitespace() {
    assert_eq!(parse("\n  {% extends 'a' %}"), vec![Node::extends("a")]);
}

#[rstest]
#[case::second_extends("{% extends \"a\" %}{% extends \"b\" %}")]
#[case::after_text("hello {% extends \"a\" %}")]
#[case::inside_block("{% block x %}{% extends \"a\" %}{% endblock %}")]
fn test_extends_placement(#[case] source: &str) {
    assert!(parse_str(source).is_err(), "{:?} should not parse", source);
}

#[test]
fn test_super_is_reserved() {
    assert_eq!(parse("{{ super() }}"), vec![Node::Super]);
    assert_eq!(parse("{{super()}}"), vec![Node::Super]);
    assert!(parse_str("{{ super(x) }}").is_err());
}

#[rstest]
#[case::unclosed_eval("{{ foo ")]
#[case::unknown_keyword("{% unless a %}{% endunless %}")]
#[case::unclosed_if("{% if a %}body")]
#[case::stray_close("{% endif %}")]
#[case::stray_brace("a { b")]
fn test_malformed_input(#[case] source: &str) {
    let err = parse_str(source).unwrap_err();
    assert!(err.line >= 1 && err.column >= 1, "{:?}", err);
}

#[test]
fn test_error_position_points_into_source() {
    let err = parse_str("line one\n{{ a }}\n{% endfor %}").unwrap_err();
    assert!(err.line >= 2, "{:?}", err);
    assert!(err.remainder.contains("endfor"), "{:?}", err);
}
