//! Flag pre-filling from environment variables
//!
//! Call [`fill_flags`] (or [`fill_flags_lookup`]) on a [`clap::Command`] before
//! matching the command line. Every argument found in the environment takes
//! that value as its default, so values given on the command line still win
//! and report [`ValueSource::CommandLine`](clap::parser::ValueSource::CommandLine).

use crate::env::{Env, OsEnv};
use crate::error::{Error, Result};
use clap::builder::{BoolishValueParser, TypedValueParser};
use clap::{Arg, ArgAction, Command};
use std::error::Error as _;
use std::ffi::OsStr;

/// Default flag-to-variable name mapping
///
/// Upper-cases `prefix + name` and replaces `-` with `_`, so with prefix
/// `"app-"` the flag `log-level` maps to `APP_LOG_LEVEL`.
pub fn default_mapping(prefix: &str) -> impl Fn(&str) -> String + Send + Sync + use<> {
    let prefix = prefix.to_string();
    move |name: &str| format!("{prefix}{name}").to_uppercase().replace('-', "_")
}

/// Fill argument defaults from the process environment using [`default_mapping`] with no prefix
///
/// # Errors
///
/// See [`fill_flags_lookup`].
pub fn fill_flags(cmd: &mut Command) -> Result<()> {
    fill_flags_lookup(cmd, &OsEnv::new(), default_mapping(""))
}

/// Fill argument defaults from `env`, looking each argument up under `mapping(id)`
///
/// Arguments are visited in id order; help and version flags are skipped. A
/// value found in `env` is checked with the argument's own value parser and
/// installed as its default, which also satisfies `required(true)`. Boolean
/// flags accept the usual spellings (`1`, `yes`, `on`, `false`, ...) and
/// arguments with a value delimiter are split on it.
///
/// # Errors
///
/// Returns [`Error::InvalidFlagValue`](crate::Error::InvalidFlagValue) for the
/// first value an argument rejects. Arguments filled before it keep their new
/// defaults.
///
/// # Example
/// ```rust
/// use clap::{Arg, Command};
/// use envfill::{default_mapping, fill_flags_lookup, MapEnv};
///
/// let env = MapEnv::from_map([("APP_LOG_LEVEL", "debug")]);
/// let mut cmd = Command::new("app").arg(Arg::new("log-level").long("log-level").default_value("info"));
///
/// fill_flags_lookup(&mut cmd, &env, default_mapping("app-"))?;
/// let matches = cmd.get_matches_from(["app"]);
/// assert_eq!(matches.get_one::<String>("log-level").map(String::as_str), Some("debug"));
/// # Ok::<(), envfill::Error>(())
/// ```
pub fn fill_flags_lookup<M>(cmd: &mut Command, env: &dyn Env, mapping: M) -> Result<()>
where
    M: Fn(&str) -> String,
{
    let mut ids: Vec<String> = cmd
        .get_arguments()
        .filter(|arg| fillable(arg))
        .map(|arg| arg.get_id().as_str().to_string())
        .collect();
    ids.sort();

    for id in ids {
        let var = mapping(&id);
        let Some(raw) = env.lookup(&var) else {
            continue;
        };
        let Some(arg) = cmd.get_arguments().find(|arg| arg.get_id().as_str() == id) else {
            continue;
        };
        let defaults = env_defaults(cmd, arg, &raw).map_err(|reason| Error::InvalidFlagValue {
            flag: id.clone(),
            source_name: var.clone(),
            reason,
        })?;

        *cmd = std::mem::take(cmd).mut_arg(&id, |arg| arg.default_values(defaults).required(false));
        log::debug!("Flag '{id}' filled from environment variable {var}");
    }
    Ok(())
}

fn fillable(arg: &Arg) -> bool {
    !matches!(
        arg.get_action(),
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
    )
}

/// Default values for `arg` taken from the raw environment value
fn env_defaults(cmd: &Command, arg: &Arg, raw: &str) -> std::result::Result<Vec<String>, String> {
    if matches!(arg.get_action(), ArgAction::SetTrue | ArgAction::SetFalse) {
        let on = BoolishValueParser::new()
            .parse_ref(cmd, Some(arg), OsStr::new(raw))
            .map_err(|err| rejection(&err))?;
        return Ok(vec![on.to_string()]);
    }

    let parts: Vec<String> = match arg.get_value_delimiter() {
        Some(delim) => raw.split(delim).map(str::to_string).collect(),
        None => vec![raw.to_string()],
    };
    for part in &parts {
        check_value(cmd, arg, part)?;
    }
    Ok(parts)
}

/// Run `value` through the value parser of `arg`
///
/// Invalid defaults trip clap's debug assertions instead of returning an
/// error, so the value is parsed as an explicit option of a one-argument
/// command carrying the same parser.
fn check_value(cmd: &Command, arg: &Arg, value: &str) -> std::result::Result<(), String> {
    let option = Arg::new("value")
        .long("value")
        .action(ArgAction::Set)
        .allow_hyphen_values(true)
        .value_parser(arg.get_value_parser().clone());
    Command::new(cmd.get_name().to_string())
        .no_binary_name(true)
        .arg(option)
        .try_get_matches_from(["--value", value])
        .map(drop)
        .map_err(|err| rejection(&err))
}

fn rejection(err: &clap::Error) -> String {
    err.source()
        .map_or_else(|| err.kind().to_string(), ToString::to_string)
}
