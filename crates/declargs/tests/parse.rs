use declargs::{ParseError, Parser, binding};

fn argv(tokens: &[&str]) -> Vec<String> {
    std::iter::once("app")
        .chain(tokens.iter().copied())
        .map(str::to_string)
        .collect()
}

#[test]
fn long_and_short_flag_forms_set_the_value() {
    let mut parser = Parser::new("app");
    parser.add_flag(Some('v'), "verbose", "Verbose output");
    parser.parse(&argv(&["--verbose"])).expect("long form");
    assert!(parser.flag("verbose"));

    let mut parser = Parser::new("app");
    parser.add_flag(Some('v'), "verbose", "Verbose output");
    parser.parse(&argv(&["-v"])).expect("short form");
    assert!(parser.flag("verbose"));
}

#[test]
fn clustered_short_flags_match_separate_tokens() {
    let build = |parser: &mut Parser| {
        parser.add_flag(Some('a'), "all", "");
        parser.add_flag(Some('b'), "brief", "");
    };

    let mut clustered = Parser::new("app");
    build(&mut clustered);
    clustered.parse(&argv(&["-ab"])).expect("clustered");

    let mut separate = Parser::new("app");
    build(&mut separate);
    separate.parse(&argv(&["-a", "-b"])).expect("separate");

    assert_eq!(clustered.flag("all"), separate.flag("all"));
    assert_eq!(clustered.flag("brief"), separate.flag("brief"));
    assert_eq!(clustered.flag_values("all"), separate.flag_values("all"));
    assert_eq!(clustered.flag_values("brief"), separate.flag_values("brief"));
}

#[test]
fn integer_assignment_parses_base_ten() {
    let mut parser = Parser::new("app");
    parser.add_int(None, "count", "");
    parser.parse(&argv(&["--count=5"])).expect("numeric value");
    assert_eq!(parser.int("count"), Some(5));
}

#[test]
fn non_numeric_integer_assignment_fails() {
    let mut parser = Parser::new("app");
    parser.add_int(None, "count", "");
    let err = parser.parse(&argv(&["--count=abc"])).unwrap_err();
    match err {
        ParseError::InvalidInteger { name, value, .. } => {
            assert_eq!(name, "count");
            assert_eq!(value, "abc");
        }
        other => panic!("expected InvalidInteger, got: {other:?}"),
    }
}

#[test]
fn multi_value_minimum_is_enforced() {
    let mut parser = Parser::new("app");
    parser.add_int(None, "num", "").multi_value(2);
    let err = parser.parse(&argv(&["--num=1"])).unwrap_err();
    match err {
        ParseError::TooFewValues { name, min, got } => {
            assert_eq!(name, "num");
            assert_eq!(min, 2);
            assert_eq!(got, 1);
        }
        other => panic!("expected TooFewValues, got: {other:?}"),
    }

    let mut parser = Parser::new("app");
    parser.add_int(None, "num", "").multi_value(2);
    parser
        .parse(&argv(&["--num=1", "--num=2", "--num=3"]))
        .expect("three values meet a minimum of two");
    assert_eq!(parser.ints("num"), &[1, 2, 3]);
    assert_eq!(parser.int("num"), Some(3));
}

#[test]
fn default_counts_as_an_assignment() {
    let mut parser = Parser::new("app");
    parser
        .add_string(None, "name", "")
        .default_value("anonymous".to_string());
    parser.parse(&argv(&[])).expect("default satisfies validation");
    assert_eq!(parser.string("name"), Some("anonymous"));
}

#[test]
fn help_short_circuits_validation() {
    let mut parser = Parser::new("app");
    parser.add_help(Some('h'), "help", "Show help information");
    parser.add_string(None, "input", "Required input");

    parser
        .parse(&argv(&["--help"]))
        .expect("help bypasses the missing required string");
    assert!(parser.help_requested());
}

#[test]
fn help_is_not_requested_when_flag_stays_unset() {
    let mut parser = Parser::new("app");
    parser
        .add_help(Some('h'), "help", "Show help information")
        .default_value(false);
    parser.add_string(None, "input", "").default_value(String::new());

    parser.parse(&argv(&[])).expect("defaults satisfy validation");
    assert!(!parser.help_requested());
}

#[test]
fn positional_tokens_keep_input_order() {
    let mut parser = Parser::new("app");
    parser.add_string(None, "files", "").multi_value(1).positional();

    parser
        .parse(&argv(&["alpha", "beta", "gamma"]))
        .expect("positional tokens");
    assert_eq!(
        parser.strings("files"),
        &["alpha".to_string(), "beta".to_string(), "gamma".to_string()]
    );
}

#[test]
fn positional_tokens_broadcast_to_every_positional_argument() {
    // Two positional arguments each receive the entire leftover list; the
    // tokens are not partitioned between them.
    let mut parser = Parser::new("app");
    parser.add_string(None, "first", "").positional();
    parser.add_string(None, "second", "").positional();
    parser.add_int(None, "nums", "").positional();

    parser.parse(&argv(&["7", "8"])).expect("positional tokens");
    assert_eq!(parser.strings("first"), &["7".to_string(), "8".to_string()]);
    assert_eq!(parser.strings("second"), &["7".to_string(), "8".to_string()]);
    assert_eq!(parser.ints("nums"), &[7, 8]);
}

#[test]
fn flagged_tokens_are_consumed_before_positional_distribution() {
    let mut parser = Parser::new("app");
    parser.add_flag(Some('v'), "verbose", "");
    parser.add_string(None, "files", "").positional();

    parser
        .parse(&argv(&["one", "-v", "two"]))
        .expect("mixed tokens");
    assert!(parser.flag("verbose"));
    assert_eq!(parser.strings("files"), &["one".to_string(), "two".to_string()]);
}

#[test]
fn identical_registrations_parse_identically() {
    let build = |parser: &mut Parser| {
        parser.add_flag(Some('v'), "verbose", "").default_value(false);
        parser.add_string(Some('o'), "output", "");
        parser.add_int(None, "jobs", "").multi_value(1);
    };
    let tokens = argv(&["-v", "-o=out.txt", "--jobs=2", "--jobs=4"]);

    let mut first = Parser::new("app");
    build(&mut first);
    first.parse(&tokens).expect("first engine");

    let mut second = Parser::new("app");
    build(&mut second);
    second.parse(&tokens).expect("second engine");

    assert_eq!(first.flag("verbose"), second.flag("verbose"));
    assert_eq!(first.string("output"), second.string("output"));
    assert_eq!(first.ints("jobs"), second.ints("jobs"));
}

#[test]
fn unknown_short_flag_fails_regardless_of_valid_tokens() {
    let mut parser = Parser::new("app");
    parser.add_flag(Some('a'), "all", "");

    let err = parser.parse(&argv(&["-a", "-z"])).unwrap_err();
    match err {
        ParseError::UnknownShort(c) => assert_eq!(c, 'z'),
        other => panic!("expected UnknownShort, got: {other:?}"),
    }
}

#[test]
fn unknown_long_name_fails_the_parse() {
    let mut parser = Parser::new("app");
    parser.add_flag(None, "all", "").default_value(false);

    let err = parser.parse(&argv(&["--missing"])).unwrap_err();
    match err {
        ParseError::UnknownLong(name) => assert_eq!(name, "missing"),
        other => panic!("expected UnknownLong, got: {other:?}"),
    }
}

#[test]
fn short_assignment_resolves_strings_before_integers() {
    let mut parser = Parser::new("app");
    parser.add_string(Some('o'), "output", "");
    parser.add_int(Some('j'), "jobs", "");

    parser
        .parse(&argv(&["-o=report.txt", "-j=4"]))
        .expect("short assignments");
    assert_eq!(parser.string("output"), Some("report.txt"));
    assert_eq!(parser.int("jobs"), Some(4));
}

#[test]
fn bound_storage_mirrors_every_assignment() {
    let last = binding::<String>();
    let all = binding::<Vec<String>>();

    let mut parser = Parser::new("app");
    parser
        .add_string(Some('i'), "input", "")
        .store(&last)
        .store_all(&all);

    parser
        .parse(&argv(&["--input=a.txt", "-i=b.txt"]))
        .expect("repeated assignment");

    assert_eq!(*last.borrow(), "b.txt");
    assert_eq!(*all.borrow(), vec!["a.txt".to_string(), "b.txt".to_string()]);
    assert_eq!(parser.string("input"), Some("b.txt"));
}

#[test]
fn strict_boolean_mode_mirrors_the_structured_result() {
    let mut parser = Parser::new("app");
    parser.add_int(None, "count", "");
    assert!(parser.parse_ok(&argv(&["--count=5"])));

    let mut parser = Parser::new("app");
    parser.add_int(None, "count", "");
    assert!(!parser.parse_ok(&argv(&["--count=abc"])));
}

#[test]
fn getters_on_unknown_names_yield_empty_results() {
    let parser = Parser::new("app");
    assert!(!parser.flag("nope"));
    assert_eq!(parser.string("nope"), None);
    assert_eq!(parser.int("nope"), None);
    assert!(parser.strings("nope").is_empty());
    assert!(parser.ints("nope").is_empty());
    assert!(parser.flag_values("nope").is_empty());
}
