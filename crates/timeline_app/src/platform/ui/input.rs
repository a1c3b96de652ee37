use engine_logging::engine_debug;
use timeline_core::Msg;

use crate::platform::app::UiEvent;

/// Maps one line of terminal input to an event. Lines starting with `:` are
/// commands; anything else replaces the search query.
pub fn parse_command(line: &str) -> UiEvent {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return UiEvent::Dispatch(Msg::QueryChanged(line.to_string()));
    };

    let (name, argument) = match command.trim().split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command.trim(), ""),
    };
    match name {
        "q" | "quit" => UiEvent::Quit,
        "theme" => UiEvent::Dispatch(Msg::ThemeToggled),
        "source" if argument.is_empty() => UiEvent::Dispatch(Msg::NextSourceClicked),
        "source" => UiEvent::Dispatch(Msg::SourceSelected(argument.to_string())),
        "help" => UiEvent::Redraw,
        other => {
            engine_debug!("Unknown command :{}", other);
            UiEvent::Redraw
        }
    }
}

#[cfg(test)]
mod tests {
    use timeline_core::Msg;

    use super::parse_command;
    use crate::platform::app::UiEvent;

    #[test]
    fn plain_lines_set_the_query() {
        assert_eq!(
            parse_command("Ringerike  \n"),
            UiEvent::Dispatch(Msg::QueryChanged("Ringerike  ".to_string()))
        );
        assert_eq!(
            parse_command("\r\n"),
            UiEvent::Dispatch(Msg::QueryChanged(String::new()))
        );
    }

    #[test]
    fn commands_map_to_messages() {
        assert_eq!(parse_command(":q"), UiEvent::Quit);
        assert_eq!(parse_command(":quit\n"), UiEvent::Quit);
        assert_eq!(parse_command(":theme"), UiEvent::Dispatch(Msg::ThemeToggled));
        assert_eq!(
            parse_command(":source"),
            UiEvent::Dispatch(Msg::NextSourceClicked)
        );
        assert_eq!(
            parse_command(":source  https://example.com/a.md \n"),
            UiEvent::Dispatch(Msg::SourceSelected("https://example.com/a.md".to_string()))
        );
    }

    #[test]
    fn help_and_unknown_commands_redraw() {
        assert_eq!(parse_command(":help"), UiEvent::Redraw);
        assert_eq!(parse_command(":frobnicate"), UiEvent::Redraw);
    }
}
