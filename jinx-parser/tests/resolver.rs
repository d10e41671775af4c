//! Resolution tests: include splicing, extends inlining and inheritance flattening

use jinx_parser::jinx::ast::{Node, ResolvedNode};
use jinx_parser::jinx::resolving::{parse_template_str, LoaderError};
use jinx_parser::jinx::testing::assert_template;
use jinx_parser::{FileSystemLoader, MemoryLoader, ResolveError, ResolveOptions, Resolver};
use std::fs;

fn lit(text: &str) -> ResolvedNode {
    Node::literal(text)
}

#[test]
fn test_include_is_spliced_in_place() {
    let loader = MemoryLoader::new()
        .with("C", "hello\n")
        .with("root", "{% include \"C\" %}\n");
    let template = Resolver::new(&loader).load_template("root").unwrap();

    assert_eq!(template.base, vec![lit("hello")]);
    assert!(template.child.is_empty());
}

#[test]
fn test_no_file_references_survive() {
    let loader = MemoryLoader::new()
        .with("nav", "<nav>{% include \"link\" %}</nav>")
        .with("link", "<a>")
        .with("base", "{% block body %}{% include \"nav\" %}{% endblock %}")
        .with(
            "page",
            "{% extends \"base\" %}{% block body %}{% for x in xs %}{% include \"link\" %}{% endfor %}{% endblock %}",
        );
    let template = Resolver::new(&loader).load_template("page").unwrap();

    for node in template.base.iter().chain(&template.child) {
        node.walk(&mut |n| assert!(!n.is_file_reference(), "unexpected {:?}", n));
    }
    assert_template(&template)
        .base(|b| {
            b.item(0, |n| {
                n.assert_block()
                    .name("body")
                    .defined_in_base(true)
                    .body(|body| {
                        body.literal_text("<nav><a></nav>");
                    });
            });
        })
        .child(|c| {
            c.item(0, |n| {
                n.assert_block().name("body").defined_in_base(false);
            });
        });
}

#[test]
fn test_two_file_inheritance() {
    let loader = MemoryLoader::new()
        .with("parent", "{% block b %}P{% endblock %}\n")
        .with(
            "child",
            "{% extends \"parent\" %}{% block b %}C{% endblock %}\n",
        );
    let template = Resolver::new(&loader).load_template("child").unwrap();

    assert_eq!(
        template.base,
        vec![Node::block(true, "b", vec![lit("P")])]
    );
    assert_eq!(
        template.child,
        vec![Node::block(false, "b", vec![lit("C")])]
    );
}

#[test]
fn test_flattening_order() {
    let loader = MemoryLoader::new()
        .with("B", "{% block x %}B-x{% endblock %}TAIL_B")
        .with("A", "{% extends \"B\" %}{% block x %}A-x{% endblock %}TAIL_A");
    let template = Resolver::new(&loader).load_template("A").unwrap();

    assert_eq!(
        template.base,
        vec![Node::block(true, "x", vec![lit("B-x")]), lit("TAIL_B\n")]
    );
    assert_eq!(
        template.child,
        vec![Node::block(false, "x", vec![lit("A-x")]), lit("TAIL_A\n")]
    );
}

#[test]
fn test_three_level_chain_keeps_every_layer() {
    let loader = MemoryLoader::new()
        .with("root", "{% block a %}r{% endblock %}\n")
        .with("middle", "{% extends \"root\" %}{% block a %}m{% endblock %}\n")
        .with("leaf", "{% extends \"middle\" %}{% block a %}l{% endblock %}\n");
    let template = Resolver::new(&loader).load_template("leaf").unwrap();

    assert_eq!(template.base, vec![Node::block(true, "a", vec![lit("r")])]);
    let overrides: Vec<_> = template
        .child_blocks()
        .map(|(name, body)| (name, body.to_vec()))
        .collect();
    assert_eq!(
        overrides,
        vec![("a", vec![lit("m")]), ("a", vec![lit("l")])]
    );
}

#[test]
fn test_include_of_child_template_keeps_only_base() {
    let loader = MemoryLoader::new()
        .with("parent", "[{% block b %}P{% endblock %}]")
        .with("widget", "{% extends \"parent\" %}{% block b %}W{% endblock %}");
    let template = parse_template_str("{% include \"widget\" %}", &loader).unwrap();

    assert_template(&template)
        .no_overrides()
        .base(|b| {
            b.item_count(4)
                .item(0, |n| n.literal("["))
                .item(1, |n| {
                    n.assert_block().name("b").body(|body| {
                        body.literal_text("P");
                    });
                })
                .item(2, |n| n.literal("]\n"))
                .item(3, |n| n.literal("\n"));
        });
}

#[test]
fn test_root_source_normalization() {
    let template = parse_template_str("text", MemoryLoader::new()).unwrap();
    assert_eq!(template.base, vec![lit("text\n")]);

    let template = parse_template_str("{% if a %}x{% endif %}\n", MemoryLoader::new()).unwrap();
    assert_eq!(template.base.len(), 1);
}

#[test]
fn test_missing_extends_target() {
    let loader = MemoryLoader::new().with("page", "{% extends \"gone\" %}");
    let err = Resolver::new(&loader).load_template("page").unwrap_err();
    match err {
        ResolveError::Reference { path, source } => {
            assert_eq!(path, "gone");
            assert_eq!(source, LoaderError::NotFound("gone".to_string()));
        }
        other => panic!("expected reference error, got {other}"),
    }
}

#[test]
fn test_syntax_error_names_the_file() {
    let loader = MemoryLoader::new()
        .with("page", "{% include \"broken\" %}")
        .with("broken", "{% if a %}never closed");
    let err = Resolver::new(&loader).load_template("page").unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Syntax { path: Some(ref path), .. } if path == "broken"
    ));
    assert!(err.to_string().starts_with("broken: syntax error at "));
}

#[test]
fn test_extends_cycle_is_reported() {
    let loader = MemoryLoader::new()
        .with("a", "{% extends \"b\" %}")
        .with("b", "{% extends \"a\" %}");
    let err = Resolver::new(&loader).load_template("a").unwrap_err();
    match err {
        ResolveError::Cycle { chain } => assert_eq!(chain, vec!["a", "b", "a"]),
        other => panic!("expected cycle, got {other}"),
    }
}

#[test]
fn test_repeated_include_is_not_a_cycle() {
    let loader = MemoryLoader::new()
        .with("item", "*")
        .with("list", "{% include \"item\" %}{% include \"item\" %}\n");
    let template = Resolver::new(&loader)
        .with_options(ResolveOptions {
            detect_cycles: true,
        })
        .load_template("list")
        .unwrap();
    assert_eq!(template.base, vec![lit("*"), lit("*")]);
}

#[test]
fn test_file_system_loader() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("layouts")).unwrap();
    fs::write(
        dir.path().join("layouts/base.html"),
        "<body>{% block content %}{% endblock %}</body>\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("index.html"),
        "{% extends \"layouts/base.html\" %}\n{% block content %}hi{% endblock %}\n",
    )
    .unwrap();

    let template = Resolver::new(FileSystemLoader::new(dir.path()))
        .load_template("index.html")
        .unwrap();

    assert_eq!(
        template.base,
        vec![
            lit("<body>"),
            Node::block(true, "content", vec![]),
            lit("</body>\n"),
        ]
    );
    assert_eq!(
        template.child,
        vec![
            lit("\n"),
            Node::block(false, "content", vec![lit("hi")]),
        ]
    );
}
