//! Pseudo-filename request parsing.
//!
//! # Grammar
//! ```text
//! request  := member | command
//! member   := <IDENTIFIER> ".xml"            (extension case-insensitive)
//! command  := "@" TOKEN [ " " PARAMS ]
//! PARAMS   := raw text; for user lists, ids separated by "," (no escaping)
//! ```
//!
//! Leading path separators (`/`, `\`) are ignored. For member requests only
//! the last path component counts, and it may not contain `,`.

use thiserror::Error;

/// Consumer sent a name outside the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("protocol violation: {0}")]
    Violation(String),
}

/// A parsed consumer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Stats for one player.
    Member(String),
    /// A command from the command language.
    Command(Command),
}

/// Commands of the pseudo-filename language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Log(String),
    SetUsers(Vec<String>),
    AddUsers(Vec<String>),
    Run,
    GetUsers,
    GetLastStat,
}

impl Command {
    /// Command token without the `@`.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Log(_) => "LOG",
            Command::SetUsers(_) => "SET_USERS",
            Command::AddUsers(_) => "ADD_USERS",
            Command::Run => "RUN",
            Command::GetUsers => "GET_USERS",
            Command::GetLastStat => "GET_LAST_STAT",
        }
    }

    /// Whether the command changes state or only produces data.
    pub fn is_effect(&self) -> bool {
        !matches!(self, Command::GetUsers | Command::GetLastStat)
    }
}

/// Parse a requested name.
pub fn parse_request(name: &str) -> Result<Request, CommandError> {
    let name = name.trim_start_matches(['/', '\\']);

    if let Some(command) = name.strip_prefix('@') {
        return parse_command(command).map(Request::Command);
    }

    parse_member(name).map(Request::Member)
}

fn parse_command(text: &str) -> Result<Command, CommandError> {
    let (token, params) = match text.split_once(' ') {
        Some((token, params)) => (token, Some(params)),
        None => (text, None),
    };
    let required = || {
        params.ok_or_else(|| CommandError::Violation(format!("@{} requires a parameter", token)))
    };

    match token {
        "LOG" => Ok(Command::Log(required()?.to_string())),
        "SET_USERS" => Ok(Command::SetUsers(split_users(required()?))),
        "ADD_USERS" => Ok(Command::AddUsers(split_users(required()?))),
        "RUN" => Ok(Command::Run),
        "GET_USERS" => Ok(Command::GetUsers),
        "GET_LAST_STAT" => Ok(Command::GetLastStat),
        _ => Err(CommandError::Violation(format!("unknown command @{}", token))),
    }
}

fn split_users(params: &str) -> Vec<String> {
    params
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_member(path: &str) -> Result<String, CommandError> {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = file_name
        .len()
        .checked_sub(4)
        .filter(|&split| file_name.is_char_boundary(split))
        .map(|split| file_name.split_at(split))
        .filter(|(_, ext)| ext.eq_ignore_ascii_case(".xml"))
        .map(|(stem, _)| stem.trim())
        .ok_or_else(|| CommandError::Violation(format!("not an .xml name: {}", path)))?;

    if stem.is_empty() {
        return Err(CommandError::Violation(format!("empty identifier: {}", path)));
    }
    // A comma would split into several ids on the batch wire.
    if stem.contains(',') {
        return Err(CommandError::Violation(format!("identifier contains ',': {}", path)));
    }
    Ok(stem.to_string())
}
