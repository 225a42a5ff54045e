//! Help text rendering for a parser's registered arguments.

use crate::arg::Arg;
use crate::parser::Parser;

fn option_left<T>(arg: &Arg<T>, takes_value: bool) -> String {
    let mut out = match arg.short() {
        Some(c) => format!("-{c}, --{}", arg.long()),
        None => format!("--{}", arg.long()),
    };
    if takes_value {
        out.push_str(&format!("=<{}>", arg.long().to_ascii_uppercase()));
    }
    out
}

fn positional_left<T>(arg: &Arg<T>) -> String {
    format!("<{}>...", arg.long().to_ascii_uppercase())
}

fn describe<T>(arg: &Arg<T>) -> String {
    let mut out = arg.description().trim().to_string();
    if let Some(default) = arg.default_repr() {
        if out.is_empty() {
            out.push_str(&format!("[default: {default}]"));
        } else {
            out.push_str(&format!(" [default: {default}]"));
        }
    }
    if arg.min_count() > 0 {
        out.push_str(&format!(" (at least {} values)", arg.min_count()));
    }
    out
}

fn push_section(out: &mut String, title: &str, rows: &[(String, String)]) {
    if rows.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}:\n"));
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {left}\n"));
        } else {
            out.push_str(&format!("  {left:width$}  {help}\n"));
        }
    }
}

pub(crate) fn render(parser: &Parser) -> String {
    let mut positionals: Vec<(String, String)> = Vec::new();
    let mut options: Vec<(String, String)> = Vec::new();

    for arg in parser.flags.values() {
        options.push((option_left(arg, false), describe(arg)));
    }
    for arg in parser.strings.values() {
        if arg.is_positional() {
            positionals.push((positional_left(arg), describe(arg)));
        } else {
            options.push((option_left(arg, true), describe(arg)));
        }
    }
    for arg in parser.ints.values() {
        if arg.is_positional() {
            positionals.push((positional_left(arg), describe(arg)));
        } else {
            options.push((option_left(arg, true), describe(arg)));
        }
    }

    let mut out = String::new();
    out.push_str(parser.name());
    out.push('\n');

    out.push_str(&format!("\nUsage: {}", parser.name()));
    if !options.is_empty() {
        out.push_str(" [OPTIONS]");
    }
    for (left, _) in &positionals {
        out.push_str(&format!(" {left}"));
    }
    out.push('\n');

    push_section(&mut out, "Arguments", &positionals);
    push_section(&mut out, "Options", &options);

    out
}
