//! Interactive explorer session
//!
//! Reads line commands, feeds them to the [`ExplorerController`] as
//! actions, and redraws the table whenever a page lands. Input and
//! background completions are handled by one loop, one at a time.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::Metadata;
use crate::display::render_explorer;
use crate::explorer::{Action, ExplorerController, ExplorerUpdate, SortColumn};

pub const HELP: &str = "\
Commands:
  /<text>, search <text>   search by name (sent after typing pauses)
  platform [name]          filter by platform (empty clears)
  genre [name]             filter by genre (empty clears)
  publisher [name]         filter by publisher (empty clears)
  years [min|-] [max|-]    filter by release year range
  sort <column>            sort; repeat to flip direction
  next | prev | first | last | page <n>
  clear                    reset all filters
  refresh                  reload the current page
  platforms | genres       list known values
  help | quit
";

/// One parsed line of input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(Action),
    ListPlatforms,
    ListGenres,
    Help,
    Quit,
}

fn parse_year(token: Option<&str>) -> Result<Option<i32>, String> {
    match token {
        None | Some("-") => Ok(None),
        Some(t) => t
            .parse()
            .map(Some)
            .map_err(|_| format!("invalid year '{}'", t)),
    }
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(text) = line.strip_prefix('/') {
        return Ok(Some(Command::Action(Action::SearchInput(text.to_string()))));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "search" | "s" => Command::Action(Action::SearchInput(rest.to_string())),
        "platform" => Command::Action(Action::SetPlatform(rest.to_string())),
        "genre" => Command::Action(Action::SetGenre(rest.to_string())),
        "publisher" => Command::Action(Action::SetPublisher(rest.to_string())),
        "years" => {
            let mut tokens = rest.split_whitespace();
            let min = parse_year(tokens.next())?;
            let max = parse_year(tokens.next())?;
            Command::Action(Action::SetYearRange { min, max })
        }
        "sort" => {
            let column: SortColumn = rest.parse()?;
            Command::Action(Action::SortBy(column))
        }
        "next" | "n" => Command::Action(Action::NextPage),
        "prev" | "p" => Command::Action(Action::PreviousPage),
        "first" => Command::Action(Action::FirstPage),
        "last" => Command::Action(Action::LastPage),
        "page" => {
            let page: u32 = rest
                .parse()
                .map_err(|_| format!("invalid page number '{}'", rest))?;
            Command::Action(Action::GoToPage(page))
        }
        "clear" => Command::Action(Action::ClearFilters),
        "refresh" | "r" => Command::Action(Action::Refresh),
        "platforms" => Command::ListPlatforms,
        "genres" => Command::ListGenres,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    Ok(Some(command))
}

fn draw<W: Write>(controller: &ExplorerController, output: &mut W) -> io::Result<()> {
    let view = render_explorer(
        controller.state(),
        &controller.page().games,
        &controller.page_info(),
        controller.is_loading(),
    );
    writeln!(output, "{}", view)?;
    output.flush()
}

fn list<W: Write>(output: &mut W, label: &str, values: Option<&Vec<String>>) -> io::Result<()> {
    match values {
        Some(values) if !values.is_empty() => writeln!(output, "{}: {}", label, values.join(", ")),
        _ => writeln!(output, "No {} known (metadata unavailable)", label.to_lowercase()),
    }
}

/// Drive the controller from `input` until `quit` or end of input
///
/// At end of input the session waits for outstanding work and draws the
/// final page, so piped command scripts produce complete output.
pub async fn run<R, W>(
    controller: &mut ExplorerController,
    metadata: Option<&Metadata>,
    input: R,
    output: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    controller.dispatch(Action::Refresh);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => return Ok(()),
                    Ok(Some(Command::Help)) => write!(output, "{}", HELP)?,
                    Ok(Some(Command::ListPlatforms)) => {
                        list(output, "Platforms", metadata.map(|m| &m.platforms))?
                    }
                    Ok(Some(Command::ListGenres)) => {
                        list(output, "Genres", metadata.map(|m| &m.genres))?
                    }
                    Ok(Some(Command::Action(action))) => {
                        tracing::debug!(?action, "Explorer input");
                        controller.dispatch(action);
                    }
                    Err(message) => writeln!(output, "{}", message)?,
                }
            }
            Some(event) = controller.next_event() => {
                match controller.handle_event(event) {
                    ExplorerUpdate::PageApplied | ExplorerUpdate::FetchFailed(_) => {
                        draw(controller, output)?;
                    }
                    ExplorerUpdate::Stale | ExplorerUpdate::FetchStarted | ExplorerUpdate::Ignored => {}
                }
            }
        }
    }

    let updates = controller.settle().await;
    if !updates.is_empty() {
        draw(controller, output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(line: &str) -> Action {
        match parse_command(line) {
            Ok(Some(Command::Action(a))) => a,
            other => panic!("expected action for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_parse_search() {
        assert_eq!(action("/super mario"), Action::SearchInput("super mario".to_string()));
        assert_eq!(action("search  zelda "), Action::SearchInput("zelda".to_string()));
        assert_eq!(action("/"), Action::SearchInput(String::new()));
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(action("genre Role-Playing"), Action::SetGenre("Role-Playing".to_string()));
        assert_eq!(action("platform"), Action::SetPlatform(String::new()));
        assert_eq!(
            action("publisher Electronic Arts"),
            Action::SetPublisher("Electronic Arts".to_string())
        );
        assert_eq!(
            action("years 2005 -"),
            Action::SetYearRange {
                min: Some(2005),
                max: None
            }
        );
        assert_eq!(action("years"), Action::SetYearRange { min: None, max: None });
        assert!(parse_command("years abc").is_err());
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(action("next"), Action::NextPage);
        assert_eq!(action("p"), Action::PreviousPage);
        assert_eq!(action("page 7"), Action::GoToPage(7));
        assert_eq!(action("sort critic"), Action::SortBy(SortColumn::CriticScore));
        assert!(parse_command("page x").is_err());
        assert!(parse_command("sort rating").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("genres"), Ok(Some(Command::ListGenres)));
        assert_eq!(parse_command("?"), Ok(Some(Command::Help)));
        assert!(parse_command("dance").is_err());
    }
}
