//! # envfill - twelve-factor configuration from environment variables
//!
//! A small abstraction over environment variable stores, plus two utilities
//! built on it: filling command-line flags from the environment, and
//! flattening prefixed variables into scalars, arrays and maps.
//!
//! ## Features
//!
//! - **Environment Stores**: [`Env`] trait with the process environment ([`OsEnv`])
//!   and a thread-safe in-memory map ([`MapEnv`])
//! - **Expansion**: `${name}` and `$name` substitution ([`env::expand`])
//! - **Structured Filling**: `APP_USERS_0`, `APP_USERS_1` become an array,
//!   `APP_ADDR_DEFAULT` an entry of the `addr` map ([`fill_map`], [`Classifier`])
//! - **Flag Pre-filling**: `clap` arguments take their defaults from the
//!   environment before the command line is parsed ([`fill_flags`])
//!
//! ## Structured Filling
//!
//! ```rust
//! use envfill::{Classifier, MapEnv, Value};
//!
//! let env = MapEnv::from_map([
//!     ("APP_CONFIG", "/etc/app.toml"),
//!     ("APP_USERS_0", "ann"),
//!     ("APP_USERS_1", "bob"),
//!     ("APP_ADDR_DEFAULT", "localhost"),
//!     ("APP_ADDR_FALLBACK", "127.0.0.1"),
//!     ("OTHER", "ignored"),
//! ]);
//!
//! let classifier = Classifier::builder("APP_").map_field("addr").build();
//! let values = classifier.fill(&env);
//!
//! assert_eq!(values["config"], Value::from("/etc/app.toml"));
//! assert_eq!(values["users"], Value::from(vec!["ann", "bob"]));
//! assert_eq!(values["addr"].as_map().unwrap()["fallback"], "127.0.0.1");
//! assert!(!values.contains_key("other"));
//! ```
//!
//! ## Flags
//!
//! ```rust,no_run
//! use clap::{CommandFactory, FromArgMatches, Parser};
//! use envfill::fill_flags;
//!
//! #[derive(Debug, Parser)]
//! struct Server {
//!     /// Address to bind
//!     #[arg(long, default_value = "0.0.0.0:8080")]
//!     listen_addr: String,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // LISTEN_ADDR from the environment, unless given on the command line
//! let mut cmd = Server::command();
//! fill_flags(&mut cmd)?;
//! let server = Server::from_arg_matches(&cmd.get_matches())?;
//! println!("listening on {}", server.listen_addr);
//! # Ok(())
//! # }
//! ```

mod error;
mod sync;

pub mod env;
pub mod fill;
pub mod flags;

pub use env::{Env, MapEnv, OsEnv};
pub use error::{Error, Result};
pub use fill::{
    Classifier, ClassifierBuilder, Value, Values, VarName, fill_map, filter_prefix, to_json,
};
pub use flags::{default_mapping, fill_flags, fill_flags_lookup};
