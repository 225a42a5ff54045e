//! Typed command-line argument declaration and parsing.
//!
//! Callers declare flags, string options and integer options on a [`Parser`]
//! (each optionally short-named, multi-valued, positional or defaulted), then
//! hand it the raw argument vector to populate typed values:
//!
//! ```
//! use declargs::Parser;
//!
//! let mut parser = Parser::new("greet");
//! parser.add_string(Some('o'), "output", "Output file").default_value("-".to_string());
//! parser.add_int(None, "count", "Repetitions").default_value(1);
//! parser.add_flag(Some('v'), "verbose", "Verbose output").default_value(false);
//!
//! let argv: Vec<String> = ["greet", "--count=3", "-v"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! assert!(parser.parse(&argv).is_ok());
//! assert_eq!(parser.int("count"), Some(3));
//! assert!(parser.flag("verbose"));
//! ```
//!
//! Values can be read back through the parser (scalar or by index), or
//! mirrored into caller-owned storage via [`binding`] handles registered with
//! [`Arg::store`] / [`Arg::store_all`].

mod arg;
mod error;
mod help;
mod parser;

pub use arg::{Arg, Binding, SeqBinding, binding};
pub use error::{ParseError, ParseResult};
pub use parser::Parser;
