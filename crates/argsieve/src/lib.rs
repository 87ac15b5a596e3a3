//! Schema-driven argument parsing.
//!
//! `argsieve` turns a flat list of argument tokens into named parameters and
//! positional inputs. The schema decides, per option, whether it is a flag or
//! takes a value, whether it may repeat, whether it is an alias for another
//! option, and whether it swallows every remaining token.
//!
//! # Example
//!
//! ```
//! use argsieve::{OptionSpec, Schema, parse};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .option("name", OptionSpec::value())
//!     .option("q", OptionSpec::new())
//!     .option("mode", OptionSpec::value().default_value("auto"));
//!
//! let result = parse(&["--name=bob", "file.txt", "-q"], &schema).unwrap();
//! assert_eq!(result.get("name"), Some(&json!("bob")));
//! assert_eq!(result.get("q"), Some(&json!(true)));
//! assert_eq!(result.get("mode"), Some(&json!("auto")));
//! assert_eq!(result.input_values(), vec!["file.txt"]);
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod parser;
pub mod schema;
pub mod value;

pub use config::{SchemaFile, ValueType, load_schema};
pub use error::{ParseError, SchemaError};
pub use parser::parse;
pub use schema::{OptionSpec, Schema, Transform};
pub use value::{Arity, InputRecord, Origin, ParamRecord, ParseResult};

pub use serde_json::Value;
