use std::fs;
use stencil::{
    Lookup, Node, Template, TemplateError, Value,
    ctx::Ctx,
    parse,
    render::{self, Mode},
};
use tempfile::TempDir;

#[test]
fn greeting_through_free_functions() {
    let tpl = parse("Hello, {{ Name }}! You are {{Age}} years old.");
    let vars: Lookup = [
        ("Name", Value::from("fengfeng")),
        ("Age", Value::from(21)),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        stencil::render(&tpl, &vars),
        "Hello, fengfeng! You are 21 years old."
    );
}

#[test]
fn nodes_follow_source_order() {
    let tpl = Template::parse("a{{ x }}b");
    assert_eq!(
        tpl.nodes(),
        [
            Node::Literal("a".into()),
            Node::Reference("x".into()),
            Node::Literal("b".into()),
        ]
    );
}

#[test]
fn lenient_and_strict_disagree_on_bad_input() {
    let src = "keep {{ cut";
    assert_eq!(parse(src).render(&Lookup::new()), "keep ");
    assert_eq!(
        Template::parse_strict(src),
        Err(TemplateError::Unterminated { offset: 5 })
    );
}

#[test]
fn toml_vars_drive_a_tree_render() {
    let tmp = TempDir::new().unwrap();
    let templates = tmp.path().join("templates");
    fs::create_dir_all(templates.join("app")).unwrap();
    fs::write(
        templates.join("app/config.ini.tpl"),
        "[server]\nhost = {{ server.host }}\nport = {{ server.port }}\ndebug = {{debug}}\n",
    )
    .unwrap();

    let vars_file = tmp.path().join("vars.toml");
    fs::write(
        &vars_file,
        "debug = true\n[server]\nhost = \"localhost\"\nport = 8080\n",
    )
    .unwrap();

    let mut lookup = Lookup::load(&vars_file).unwrap();
    lookup.set_pair("server.port=9090").unwrap();

    let out = tmp.path().join("out");
    let ctx = Ctx::new(&templates, None, &out).unwrap();
    let report = render::render_tree(&ctx, &lookup, Mode::Strict).unwrap();

    assert_eq!(report.rendered.len(), 1);
    assert_eq!(
        fs::read_to_string(out.join("app/config.ini")).unwrap(),
        "[server]\nhost = localhost\nport = 9090\ndebug = true\n"
    );
}

#[test]
fn tree_refuses_output_over_its_sources() {
    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    let templates = proj.join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("a.tpl"), "{{ a }}").unwrap();
    fs::write(proj.join("notes.md"), "mine").unwrap();

    assert!(Ctx::new(&templates, None, &proj).is_err());
    assert!(Ctx::new(&templates, None, &templates).is_err());
    assert!(templates.join("a.tpl").exists());
    assert_eq!(fs::read_to_string(proj.join("notes.md")).unwrap(), "mine");
}

#[test]
fn set_values_render_as_typed() {
    let mut vars = Lookup::new();
    for pair in ["zip=007", "ver=1.10", "n=+5", "big=1e3", "v=2.50", "age=21"] {
        vars.set_pair(pair).unwrap();
    }
    assert_eq!(
        parse("{{zip}}|{{ver}}|{{n}}|{{big}}|{{v}}|{{age}}").render(&vars),
        "007|1.10|+5|1e3|2.50|21"
    );
}
