use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::debug;

use crate::arg::Arg;
use crate::error::{ParseError, ParseResult};
use crate::help;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Flag,
    String,
    Integer,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Flag => "flag",
            Kind::String => "string",
            Kind::Integer => "integer",
        }
    }
}

/// Command-line parser: three registries of declared arguments plus the
/// tokenizer that populates them.
///
/// Tokens are classified left to right: anything not starting with `-` is
/// positional; `-abc` is a cluster of short flags; `--name` is a long flag;
/// `-x=value` and `--name=value` assign to a string or integer argument.
/// After tokenization every registered argument must have received a value
/// (and enough values, for multi-value arguments) unless a help flag was hit.
///
/// Not safe to share across threads; the registries are mutated in place
/// during both registration and parsing.
#[derive(Debug, Default)]
pub struct Parser {
    name: String,
    pub(crate) flags: IndexMap<String, Arg<bool>>,
    pub(crate) strings: IndexMap<String, Arg<String>>,
    pub(crate) ints: IndexMap<String, Arg<i64>>,
    short_names: IndexMap<char, String>,
    help_names: Vec<String>,
    conflicts: Vec<String>,
}

impl Parser {
    pub fn new(name: &str) -> Self {
        Parser {
            name: name.to_string(),
            ..Parser::default()
        }
    }

    /// Display label, no parsing effect.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a boolean flag, keyed by `long`.
    pub fn add_flag(&mut self, short: Option<char>, long: &str, description: &str) -> &mut Arg<bool> {
        self.note_long(long, Kind::Flag);
        self.note_short(short, long);
        register(&mut self.flags, short, long, description)
    }

    /// Declare a string-valued argument, keyed by `long`.
    pub fn add_string(&mut self, short: Option<char>, long: &str, description: &str) -> &mut Arg<String> {
        self.note_long(long, Kind::String);
        self.note_short(short, long);
        register(&mut self.strings, short, long, description)
    }

    /// Declare an integer-valued argument, keyed by `long`.
    pub fn add_int(&mut self, short: Option<char>, long: &str, description: &str) -> &mut Arg<i64> {
        self.note_long(long, Kind::Integer);
        self.note_short(short, long);
        register(&mut self.ints, short, long, description)
    }

    /// Declare a help flag. When it is set during parsing, completeness
    /// validation is skipped entirely and the parse reports success.
    pub fn add_help(&mut self, short: Option<char>, long: &str, description: &str) -> &mut Arg<bool> {
        self.help_names.push(long.to_string());
        self.add_flag(short, long, description)
    }

    /// Whether a registered help flag was set, by the command line or a
    /// default.
    pub fn help_requested(&self) -> bool {
        self.help_names
            .iter()
            .any(|name| self.flags.get(name).is_some_and(|arg| *arg.value()))
    }

    /// Rendered help text for all registered arguments.
    pub fn help_text(&self) -> String {
        help::render(self)
    }

    /// Last value of a flag; `false` if unknown or never set.
    pub fn flag(&self, long: &str) -> bool {
        self.flags.get(long).is_some_and(|arg| *arg.value())
    }

    /// All values assigned to a flag, in assignment order.
    pub fn flag_values(&self, long: &str) -> &[bool] {
        self.flags.get(long).map_or(&[], |arg| arg.values())
    }

    /// Last value of a string argument; `None` if the name is unknown.
    pub fn string(&self, long: &str) -> Option<&str> {
        self.strings.get(long).map(|arg| arg.value().as_str())
    }

    /// All values assigned to a string argument, in assignment order.
    pub fn strings(&self, long: &str) -> &[String] {
        self.strings.get(long).map_or(&[], |arg| arg.values())
    }

    /// Last value of an integer argument; `None` if the name is unknown.
    pub fn int(&self, long: &str) -> Option<i64> {
        self.ints.get(long).map(|arg| *arg.value())
    }

    /// All values assigned to an integer argument, in assignment order.
    pub fn ints(&self, long: &str) -> &[i64] {
        self.ints.get(long).map_or(&[], |arg| arg.values())
    }

    /// Parse an argument vector. Token 0 is the program name and is skipped.
    ///
    /// On success every registered argument has received at least the
    /// required number of values and bound storage reflects the final state.
    /// On failure the registries may have been partially updated; parsing is
    /// not transactional.
    pub fn parse(&mut self, args: &[String]) -> ParseResult<()> {
        if let Some(conflict) = self.conflicts.first() {
            return Err(ParseError::Declaration(conflict.clone()));
        }

        debug!(
            parser = %self.name,
            tokens = args.len().saturating_sub(1),
            "parsing argument vector"
        );

        let mut positionals: Vec<&str> = Vec::new();
        for raw in args.iter().skip(1) {
            let token = raw.as_str();
            if !token.starts_with('-') {
                positionals.push(token);
                continue;
            }
            match token.split_once('=') {
                None => self.apply_flag_token(token)?,
                Some((name, value)) => self.apply_assignment(name, value)?,
            }
        }

        if self.help_requested() {
            debug!("help requested, skipping validation");
            return Ok(());
        }

        self.distribute_positionals(&positionals)?;
        self.validate()
    }

    /// Boolean form of [`parse`](Parser::parse) for callers that only need a
    /// pass/fail signal.
    pub fn parse_ok(&mut self, args: &[String]) -> bool {
        self.parse(args).is_ok()
    }

    /// A dashed token without `=`: a short-flag cluster (`-abc`) or a long
    /// flag (`--name`).
    fn apply_flag_token(&mut self, token: &str) -> ParseResult<()> {
        let tail = &token[1..];
        if !tail.is_empty() && !tail.starts_with('-') {
            for c in tail.chars() {
                let long = self
                    .short_names
                    .get(&c)
                    .cloned()
                    .ok_or(ParseError::UnknownShort(c))?;
                self.assign_flag(&long)?;
            }
            return Ok(());
        }

        let name = token.strip_prefix("--").unwrap_or(tail);
        self.assign_flag(name)
    }

    fn assign_flag(&mut self, long: &str) -> ParseResult<()> {
        match self.flags.get_mut(long) {
            Some(arg) => {
                arg.assign(true);
                Ok(())
            }
            None => Err(ParseError::UnknownLong(long.to_string())),
        }
    }

    /// A dashed token with `=`: `name` is the text before `=` including its
    /// dashes, `value` the raw text after.
    fn apply_assignment(&mut self, name: &str, value: &str) -> ParseResult<()> {
        let tail = &name[1..];
        if !tail.starts_with('-') {
            let mut chars = tail.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                // -x=value: a single short character.
                let long = self
                    .short_names
                    .get(&c)
                    .cloned()
                    .ok_or(ParseError::UnknownShort(c))?;
                return self.assign_value(&long, value);
            }
        }

        let long = name.strip_prefix("--").unwrap_or(tail);
        self.assign_value(long, value)
    }

    /// Value assignments resolve against the string registry first, then the
    /// integer registry. Flags never take `=`-values.
    fn assign_value(&mut self, long: &str, value: &str) -> ParseResult<()> {
        if let Some(arg) = self.strings.get_mut(long) {
            arg.assign(value.to_string());
            return Ok(());
        }
        if let Some(arg) = self.ints.get_mut(long) {
            let parsed = value
                .parse::<i64>()
                .map_err(|source| ParseError::InvalidInteger {
                    name: long.to_string(),
                    value: value.to_string(),
                    source,
                })?;
            arg.assign(parsed);
            return Ok(());
        }
        Err(ParseError::UnknownLong(long.to_string()))
    }

    /// Every positional argument receives the entire buffered token list, in
    /// input order.
    fn distribute_positionals(&mut self, positionals: &[&str]) -> ParseResult<()> {
        for arg in self.strings.values_mut().filter(|arg| arg.is_positional()) {
            for token in positionals {
                arg.assign((*token).to_string());
            }
        }
        for arg in self.ints.values_mut().filter(|arg| arg.is_positional()) {
            for token in positionals {
                let parsed = token
                    .parse::<i64>()
                    .map_err(|source| ParseError::InvalidInteger {
                        name: arg.long().to_string(),
                        value: (*token).to_string(),
                        source,
                    })?;
                arg.assign(parsed);
            }
        }
        Ok(())
    }

    /// Registries are checked in registration order; the first unsatisfied
    /// argument aborts validation.
    fn validate(&self) -> ParseResult<()> {
        check_registry(&self.flags)?;
        check_registry(&self.strings)?;
        check_registry(&self.ints)
    }

    fn note_long(&mut self, long: &str, kind: Kind) {
        let declared = [
            (Kind::Flag, self.flags.contains_key(long)),
            (Kind::String, self.strings.contains_key(long)),
            (Kind::Integer, self.ints.contains_key(long)),
        ];
        for (other, present) in declared {
            if !present {
                continue;
            }
            if other == kind {
                self.conflicts.push(format!("--{long} declared twice"));
            } else {
                self.conflicts.push(format!(
                    "--{long} declared as both {} and {}",
                    other.label(),
                    kind.label()
                ));
            }
        }
    }

    fn note_short(&mut self, short: Option<char>, long: &str) {
        let Some(c) = short else {
            return;
        };
        if let Some(prev) = self.short_names.insert(c, long.to_string()) {
            if prev != long {
                self.conflicts
                    .push(format!("-{c} maps to both '{prev}' and '{long}'"));
            }
        }
    }
}

fn register<'r, T: Clone + Default>(
    map: &'r mut IndexMap<String, Arg<T>>,
    short: Option<char>,
    long: &str,
    description: &str,
) -> &'r mut Arg<T> {
    match map.entry(long.to_string()) {
        Entry::Occupied(entry) => {
            let slot = entry.into_mut();
            *slot = Arg::new(short, long, description);
            slot
        }
        Entry::Vacant(entry) => entry.insert(Arg::new(short, long, description)),
    }
}

fn check_registry<T>(map: &IndexMap<String, Arg<T>>) -> ParseResult<()> {
    for (long, arg) in map {
        if !arg.has_value() {
            debug!(%long, "argument never received a value");
            return Err(ParseError::MissingValue(long.clone()));
        }
        let min = arg.min_count();
        if min != 0 && arg.values().len() < min {
            debug!(%long, min, got = arg.values().len(), "argument under its minimum count");
            return Err(ParseError::TooFewValues {
                name: long.clone(),
                min,
                got: arg.values().len(),
            });
        }
    }
    Ok(())
}
