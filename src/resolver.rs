//! Turns a command line into a [`Configuration`].
//!
//! clap does the tokenizing, driven by the table in [`crate::schema`]. The
//! [`Resolver`] then walks the argument-bearing tokens in command line
//! order, so the first bad token is the one reported, and merges in the
//! event flags, whose order does not matter.

use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, info, warn};

use crate::config::{Configuration, EmissionMode};
use crate::error::ResolveError;
use crate::implication;
use crate::parse::{self, Parsed};
use crate::schema::{self, OptionId, OPTIONS};

const ABOUT: &str =
    "Extract scheduler data using BPF and emit them into perfetto as track events";

/// Catch-all for tokens that are not a flag or a flag's argument.
const STRAY: &str = "stray";

/// Build the clap command from the option table.
pub fn command() -> Command {
    let mut cmd = Command::new("sched-analyzer")
        .version(env!("CARGO_PKG_VERSION"))
        .about(ABOUT)
        .arg(
            Arg::new(STRAY)
                .action(ArgAction::Append)
                .num_args(1..)
                .value_parser(clap::value_parser!(String))
                .hide(true),
        );

    for spec in OPTIONS {
        let arg = Arg::new(spec.name).long(spec.name).help(spec.help);
        let arg = match spec.arg {
            Some(placeholder) => arg
                .value_name(placeholder)
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(String))
                .allow_hyphen_values(true),
            None => arg.action(ArgAction::Count),
        };
        cmd = cmd.arg(arg);
    }

    // Last of the two wins.
    cmd.mut_arg(OptionId::System.name(), |a| {
        a.overrides_with(OptionId::App.name())
    })
    .mut_arg(OptionId::App.name(), |a| {
        a.overrides_with(OptionId::System.name())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Value(OptionId, &'a str),
    Stray(&'a str),
}

fn indexed_values<'a>(matches: &'a ArgMatches, id: &str) -> Vec<(usize, &'a str)> {
    match (matches.indices_of(id), matches.get_many::<String>(id)) {
        (Some(indices), Some(values)) => indices.zip(values.map(String::as_str)).collect(),
        _ => Vec::new(),
    }
}

/// Argument-bearing and stray tokens, in the order they were given.
fn ordered_tokens(matches: &ArgMatches) -> Vec<Token<'_>> {
    let mut tokens: Vec<(usize, Token<'_>)> = Vec::new();
    for spec in OPTIONS.iter().filter(|s| s.takes_value()) {
        tokens.extend(
            indexed_values(matches, spec.name)
                .into_iter()
                .map(|(i, v)| (i, Token::Value(spec.id, v))),
        );
    }
    tokens.extend(
        indexed_values(matches, STRAY)
            .into_iter()
            .map(|(i, v)| (i, Token::Stray(v))),
    );
    tokens.sort_by_key(|(i, _)| *i);
    tokens.into_iter().map(|(_, t)| t).collect()
}

/// Builds a configuration one token at a time, starting from the defaults.
///
/// Arguments are validated before anything is assigned, so a failed token
/// leaves the configuration as it was.
#[derive(Debug, Default)]
pub struct Resolver {
    config: Configuration,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver::default()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Apply a flag that takes no argument. Flags that need one are
    /// rejected.
    pub fn apply_flag(&mut self, id: OptionId) -> Result<(), ResolveError> {
        match id {
            OptionId::System => self.config.set_mode(EmissionMode::System),
            OptionId::App => self.config.set_mode(EmissionMode::App),
            id if implication::is_event(id) => {
                let toggles = implication::expand(id);
                debug!("--{}: enabling {:?}", id.name(), toggles);
                self.config.toggles.union(toggles);
            }
            _ => {
                return Err(ResolveError::UsageViolation {
                    token: format!("--{}", id.name()),
                })
            }
        }
        Ok(())
    }

    /// Validate `raw` for flag `id` and store it. Flags that take no
    /// argument are rejected.
    pub fn apply_value(&mut self, id: OptionId, raw: &str) -> Result<(), ResolveError> {
        let option = id.name();
        match id {
            OptionId::Output => self.config.output = raw.into(),
            OptionId::OutputPath => self.config.output_path = Some(raw.into()),
            OptionId::MaxSize => {
                let Parsed { value, rest } = parse::parse_size_kib(raw)
                    .map_err(|e| ResolveError::from_number(option, raw, e))?;
                warn_trailing(option, raw, rest);
                self.config.max_size = value;
            }
            OptionId::Pid => {
                let Parsed { value, rest } = parse::parse_pid(raw)
                    .map_err(|e| ResolveError::from_number(option, raw, e))?;
                warn_trailing(option, raw, rest);
                self.config.pid = value;
            }
            OptionId::Comm => {
                let comm = parse::parse_comm(raw);
                if comm.as_bytes().len() < raw.len() {
                    debug!("--comm: '{raw}' truncated to '{comm}'");
                }
                self.config.comm = comm;
            }
            _ => {
                return Err(ResolveError::UsageViolation {
                    token: format!("--{option}={raw}"),
                })
            }
        }
        debug!("--{option} {raw}");
        Ok(())
    }

    /// Positional arguments are never accepted.
    pub fn reject_positional(token: &str) -> ResolveError {
        ResolveError::UsageViolation {
            token: token.to_string(),
        }
    }

    /// Feed everything clap matched. Stops at the first bad token.
    pub fn apply_matches(&mut self, matches: &ArgMatches) -> Result<(), ResolveError> {
        for token in ordered_tokens(matches) {
            match token {
                Token::Value(id, raw) => self.apply_value(id, raw)?,
                Token::Stray(raw) => return Err(Resolver::reject_positional(raw)),
            }
        }
        for spec in OPTIONS.iter().filter(|s| !s.takes_value()) {
            if matches.get_count(spec.name) > 0 {
                self.apply_flag(spec.id)?;
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Configuration {
        self.config
    }
}

fn warn_trailing(option: &str, raw: &str, rest: &str) {
    if !rest.is_empty() {
        warn!("--{option} {raw}: ignoring trailing characters '{rest}'");
    }
}

/// Replay the raw command line up to the point clap gave up, so a bad
/// value or stray token that came earlier is reported ahead of clap's own
/// error. Returns `None` once the token clap rejected is reached.
fn earlier_error(args: &[OsString]) -> Option<ResolveError> {
    let mut scratch = Resolver::new();
    let mut tokens = args.iter().skip(1).map(|arg| arg.to_string_lossy());
    while let Some(token) = tokens.next() {
        if token == "--" {
            return tokens.next().map(|t| Resolver::reject_positional(&t));
        }
        let Some(long) = token.strip_prefix("--") else {
            if token.starts_with('-') && token.len() > 1 {
                // -h, -V or an unknown short flag, all clap's to report.
                return None;
            }
            return Some(Resolver::reject_positional(&token));
        };
        let (name, inline) = match long.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (long, None),
        };
        let spec = schema::lookup(name)?;
        if !spec.takes_value() {
            if inline.is_some() {
                return None;
            }
            continue;
        }
        let value = match inline {
            Some(value) => value.to_string(),
            None => tokens.next()?.into_owned(),
        };
        if let Err(e) = scratch.apply_value(spec.id, &value) {
            return Some(e);
        }
    }
    None
}

/// Resolve a full command line, program name first.
///
/// Errors are reported in command line order: the first bad token wins,
/// whether it is a bad number, a stray argument or something clap rejects.
pub fn resolve<I, T>(args: I) -> Result<Configuration, ResolveError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let matches = match command().try_get_matches_from(args.iter().cloned()) {
        Ok(matches) => matches,
        Err(e) => return Err(earlier_error(&args).unwrap_or(ResolveError::Cli(e))),
    };
    let mut resolver = Resolver::new();
    resolver.apply_matches(&matches)?;
    let config = resolver.finish();
    info!(
        "resolved {:?} mode, {} categories, trace {}",
        config.mode,
        config.toggles.len(),
        config.trace_path().display()
    );
    Ok(config)
}
