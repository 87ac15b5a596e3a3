use argsieve::{Arity, OptionSpec, Origin, ParseError, Schema, parse};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn bare_inputs_keep_order_and_leave_params_empty() {
    let tokens = ["b", "a", "c", "a"];
    let r = parse(&tokens, &Schema::new()).unwrap();
    assert!(r.params.is_empty());
    assert_eq!(r.input_values(), vec!["b", "a", "c", "a"]);
    let origins: Vec<usize> = r.inputs.iter().map(|i| i.origin).collect();
    assert_eq!(origins, vec![0, 1, 2, 3]);
}

#[test]
fn repeated_multi_flag_collects_true_per_occurrence() {
    let schema = Schema::new().option("v", OptionSpec::new().multiple(true));
    let r = parse(&["-v", "x", "-v", "--v", "-v"], &schema).unwrap();

    let record = &r.params["v"];
    assert_eq!(record.value(), &Arity::Multi(vec![json!(true); 4]));
    let indices: Vec<i64> = record.origin().as_slice().iter().map(|o| o.index()).collect();
    assert_eq!(indices, vec![0, 2, 3, 4]);
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn single_valued_option_given_twice_fails() {
    let schema = Schema::new().option("out", OptionSpec::value());
    let err = parse(&["--out", "a.txt", "--out=b.txt"], &schema).unwrap_err();
    assert_eq!(err.kind(), "duplicate-option");
    assert_eq!(err.token(), Some("--out=b.txt"));
    assert!(err.to_string().contains("already set to \"a.txt\""));
}

#[test]
fn swallow_takes_everything_verbatim() {
    let schema = Schema::new().option("x", OptionSpec::new().swallow(true));
    let r = parse(&["--x", "a", "-b", "c"], &schema).unwrap();
    assert_eq!(r.get_all("x"), Some(&[json!("a"), json!("-b"), json!("c")][..]));
    assert!(r.inputs.is_empty());
    assert!(!r.is_present("b"));
    assert_eq!(
        r.params["x"].origin(),
        &Arity::Multi(vec![Origin::Token(1), Origin::Token(2), Origin::Token(3)])
    );
}

#[test]
fn swallow_ignores_transform_and_unknown_shapes() {
    let schema = Schema::new().option(
        "exec",
        OptionSpec::value()
            .swallow(true)
            .transform(|_| Err("never called".to_string())),
    );
    let r = parse(&["in", "--exec", "--unknown", "-z=1"], &schema).unwrap();
    assert_eq!(r.get_all("exec"), Some(&[json!("--unknown"), json!("-z=1")][..]));
    assert_eq!(r.input_values(), vec!["in"]);
}

#[test]
fn alias_collapses_onto_canonical_name() {
    let schema = Schema::new()
        .option("full", OptionSpec::value().multiple(true))
        .option("f", OptionSpec::alias_of("full"));
    let r = parse(&["-f", "1", "-f", "2"], &schema).unwrap();
    assert_eq!(r.params.keys().map(String::as_str).collect::<Vec<_>>(), vec!["full"]);
    assert_eq!(r.get_all("full"), Some(&[json!("1"), json!("2")][..]));
}

#[test]
fn alias_and_canonical_share_duplicate_check() {
    let schema = Schema::new()
        .option("output", OptionSpec::value())
        .option("o", OptionSpec::alias_of("output"));
    let err = parse(&["-o", "a", "--output", "b"], &schema).unwrap_err();
    assert!(matches!(err, ParseError::DuplicateOption { ref name, .. } if name == "output"));
}

#[test]
fn default_injected_with_negative_origin() {
    let schema = Schema::new().option("mode", OptionSpec::value().default_value("auto"));
    let r = parse::<&str>(&[], &schema).unwrap();
    assert_eq!(r.get("mode"), Some(&json!("auto")));
    assert_eq!(r.params["mode"].origin(), &Arity::Scalar(Origin::Default));
    assert!(r.is_present("mode"));
    assert!(!r.is_explicit("mode"));
}

#[test]
fn default_never_overwrites_given_value() {
    let schema = Schema::new().option("mode", OptionSpec::value().default_value("auto"));
    let r = parse(&["--mode", "fast"], &schema).unwrap();
    assert_eq!(r.get("mode"), Some(&json!("fast")));
    assert!(r.is_explicit("mode"));
}

#[test]
fn parsing_is_pure() {
    let schema = Schema::new()
        .implicit(true)
        .option("n", OptionSpec::value().multiple(true))
        .option("mode", OptionSpec::value().default_value("auto"));
    let tokens = ["-n", "1", "in", "--extra=2", "-n3", "--flag"];
    let first = parse(&tokens, &schema).unwrap();
    let second = parse(&tokens, &schema).unwrap();
    assert_eq!(first, second);
}

#[test]
fn implicit_mode_accepts_undeclared_options() {
    let schema = Schema::new().implicit(true);
    let r = parse(&["--verbose", "--level=3", "-x", "file", "--level= 4"], &schema).unwrap();
    assert_eq!(r.get_all("verbose"), Some(&[json!(true)][..]));
    assert_eq!(r.get_all("level"), Some(&[json!("3"), json!("4")][..]));
    assert_eq!(r.get_all("x"), Some(&[json!(true)][..]));
    assert_eq!(r.input_values(), vec!["file"]);
}

#[test]
fn unknown_option_without_implicit_fails() {
    let err = parse(&["--nope"], &Schema::new()).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownOption {
            token: "--nope".to_string()
        }
    );
}

#[test]
fn bad_alias_fails_before_reading_tokens() {
    let schema = Schema::new().option("f", OptionSpec::alias_of("missing"));
    let err = parse::<&str>(&[], &schema).unwrap_err();
    assert_eq!(err.kind(), "invalid-schema");
}

#[test]
fn result_serializes_like_the_documented_shape() {
    let schema = Schema::new()
        .option("name", OptionSpec::value())
        .option("q", OptionSpec::new());
    let r = parse(&["--name=bob", "file.txt", "-q"], &schema).unwrap();
    assert_eq!(
        serde_json::to_string(&r).unwrap(),
        r#"{"params":{"name":{"value":"bob","index":0},"q":{"value":true,"index":2}},"inputs":[{"value":"file.txt","index":1}]}"#
    );
}
