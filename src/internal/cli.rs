use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;

use crate::internal::coordinator::BrowseTarget;
use crate::internal::errors::BrowseError;
use crate::internal::selection::LineIndex;
use crate::internal::selection::SelectionRange;

pub const LOG_ENV: &str = "GITLAB_BROWSE_LOG";

/// Part of a file the user pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Lines(SelectionRange),
    /// Character offsets, end exclusive.
    Offsets { start: usize, end: usize },
}

impl Selection {
    /// Lines covered by the selection, reading `path` for offsets.
    pub fn resolve(&self, path: &Path) -> Result<Option<SelectionRange>, BrowseError> {
        match self {
            Selection::Lines(range) => Ok(Some(*range)),
            Selection::Offsets { start, end } => {
                let text = std::fs::read_to_string(path)?;
                Ok(LineIndex::new(&text).map_selection(*start, *end))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    File {
        path: PathBuf,
        selection: Option<Selection>,
    },
    Commit {
        dir: PathBuf,
        hash: String,
    },
    MergeRequest {
        path: PathBuf,
        selection: Option<Selection>,
        commit: Option<String>,
    },
    Status {
        path: PathBuf,
    },
}

impl CliAction {
    /// What to open, or `None` for actions that don't open anything.
    pub fn browse_target(&self) -> Result<Option<BrowseTarget>, BrowseError> {
        let target = match self {
            CliAction::File { path, selection } => BrowseTarget::File {
                path: path.clone(),
                selection: match selection {
                    Some(selection) => selection.resolve(path)?,
                    None => None,
                },
            },
            CliAction::Commit { dir, hash } => BrowseTarget::Commit {
                path: dir.clone(),
                hash: hash.clone(),
            },
            CliAction::MergeRequest {
                path,
                selection,
                commit,
            } => {
                let line = match (selection, commit) {
                    (Some(selection), None) => selection
                        .resolve(path)?
                        .map(|range| range.start_line),
                    _ => None,
                };
                BrowseTarget::MergeRequest {
                    path: path.clone(),
                    line,
                    commit: commit.clone(),
                }
            }
            CliAction::Status { .. } => return Ok(None),
        };

        Ok(Some(target))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub print: bool,
    pub remote: Option<String>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub action: CliAction,
}

impl CliArgs {
    pub fn try_parse_from<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = build_command().try_get_matches_from(argv)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let action = match matches.subcommand() {
            Some(("commit", sub)) => CliAction::Commit {
                dir: path_arg(sub, "dir"),
                hash: string_arg(sub, "hash").unwrap_or_default(),
            },
            Some(("mr", sub)) => CliAction::MergeRequest {
                path: path_arg(sub, "path"),
                selection: selection_arg(sub),
                commit: string_arg(sub, "commit"),
            },
            Some(("status", sub)) => CliAction::Status {
                path: path_arg(sub, "path"),
            },
            Some((_, sub)) => CliAction::File {
                path: path_arg(sub, "path"),
                selection: selection_arg(sub),
            },
            None => {
                return Err(clap::Error::new(
                    clap::error::ErrorKind::MissingSubcommand,
                ))
            }
        };

        Ok(Self {
            print: matches.get_flag("print"),
            remote: string_arg(matches, "remote"),
            config: matches.get_one::<PathBuf>("config").cloned(),
            verbose: matches.get_flag("verbose"),
            action,
        })
    }
}

fn string_arg(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn path_arg(matches: &ArgMatches, id: &str) -> PathBuf {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

fn selection_arg(matches: &ArgMatches) -> Option<Selection> {
    if let Some(range) = matches.get_one::<SelectionRange>("lines") {
        return Some(Selection::Lines(*range));
    }
    matches
        .get_one::<(usize, usize)>("offsets")
        .map(|(start, end)| Selection::Offsets {
            start: *start,
            end: *end,
        })
}

fn parse_offsets(value: &str) -> Result<(usize, usize), String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid offset '{}'", part.trim()))
    };
    let (start, end) = (parse(start)?, parse(end)?);
    if end < start {
        return Err(format!("offsets {start}:{end} are inverted"));
    }
    Ok((start, end))
}

fn lines_arg(help: &'static str) -> Arg {
    Arg::new("lines")
        .short('L')
        .long("lines")
        .value_name("START[-END]")
        .help(help)
        .value_parser(|value: &str| value.parse::<SelectionRange>())
}

fn offsets_arg() -> Arg {
    Arg::new("offsets")
        .long("offsets")
        .value_name("START:END")
        .help("Selection as character offsets in the file")
        .value_parser(parse_offsets)
        .conflicts_with("lines")
}

fn path_positional(help: &'static str) -> Arg {
    Arg::new("path")
        .value_name("PATH")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
}

pub fn build_command() -> Command {
    Command::new("gitlab-browse")
        .about("Open files, commits and merge requests of a local repository on GitLab")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("print")
                .long("print")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print the URL instead of opening a browser"),
        )
        .arg(
            Arg::new("remote")
                .long("remote")
                .global(true)
                .value_name("NAME")
                .help("Only consider this remote"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file to use"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help(format!(
                    "Show error details; set {LOG_ENV} for finer logging"
                )),
        )
        .subcommand(
            Command::new("file")
                .about("Open a file on its tracked branch")
                .arg(path_positional("File to open"))
                .arg(lines_arg("Lines to highlight"))
                .arg(offsets_arg()),
        )
        .subcommand(
            Command::new("commit")
                .about("Open a commit")
                .arg(Arg::new("hash").value_name("HASH").required(true))
                .arg(
                    Arg::new("dir")
                        .short('C')
                        .value_name("DIR")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Directory inside the repository"),
                ),
        )
        .subcommand(
            Command::new("mr")
                .about("Open the merge request that last changed a line")
                .arg(path_positional("File containing the line"))
                .arg(
                    Arg::new("lines")
                        .short('L')
                        .long("line")
                        .value_name("LINE")
                        .help("Line to look up, the first one by default")
                        .value_parser(|value: &str| value.parse::<SelectionRange>()),
                )
                .arg(offsets_arg())
                .arg(
                    Arg::new("commit")
                        .long("commit")
                        .value_name("HASH")
                        .conflicts_with_all(["lines", "offsets"])
                        .help("Look up this commit instead of blaming a line"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Tell whether a file can be opened on GitLab")
                .arg(path_positional("File to check")),
        )
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
