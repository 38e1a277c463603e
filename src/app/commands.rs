//! Parsing of the interactive commands read from stdin.

use crate::logic::sort_key_for_action;
use crate::state::SortKey;

/// One line of user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Switch the active sort key.
    Sort(SortKey),
    /// Open the result at a zero-based display position.
    Open(usize),
    /// Search by the maintainer of the result at a zero-based display position.
    Maintainer(usize),
    /// Drop the view and attach a fresh one to the same session.
    Redraw,
    /// Print the sort menu.
    Menu,
    /// Print the command summary.
    Help,
    /// Leave.
    Quit,
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
commands:
  sort <key>        name, votes, popularity, last_updated, first_submitted
  open <n>          print the AUR page of result n
  maintainer <n>    search packages by the maintainer of result n
  menu              show the sort menu
  redraw            rebuild the view (sort order is kept)
  quit              exit";

/// What: Parse one input line.
///
/// Inputs:
/// - `line`: Raw line from stdin
///
/// Output:
/// - `Ok(None)` for a blank line, `Ok(Some(cmd))` for a command, or an error
///   message for the user
///
/// Details:
/// - Positions are one-based on input and zero-based in [`Command`].
/// - `sort` accepts config keys and their aliases as well as menu action ids.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    let cmd = match head.to_lowercase().as_str() {
        "sort" | "s" => {
            let raw = arg.ok_or("usage: sort <key>")?;
            let key = SortKey::from_config_key(raw)
                .or_else(|| sort_key_for_action(raw))
                .ok_or_else(|| format!("unknown sort key: {raw}"))?;
            Command::Sort(key)
        }
        "open" | "o" => Command::Open(position(arg, "open")?),
        "maintainer" | "m" => Command::Maintainer(position(arg, "maintainer")?),
        "redraw" | "r" => Command::Redraw,
        "menu" => Command::Menu,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(cmd))
}

fn position(arg: Option<&str>, verb: &str) -> Result<usize, String> {
    let raw = arg.ok_or_else(|| format!("usage: {verb} <n>"))?;
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("not a result number: {raw}")),
    }
}
