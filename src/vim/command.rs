use crate::diagnostics::DiagnosticCategory;
use crate::error::ConsoleError;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a diagnostic; `None` runs the selected dashboard scenario
    Scan(Option<DiagnosticCategory>),
    Fix,
    Home,
    Commands,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Result<Command, ConsoleError> {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match cmd {
        "scan" | "s" | "run" => match arg {
            Some(name) => Ok(Command::Scan(Some(name.parse()?))),
            None => Ok(Command::Scan(None)),
        },
        "fix" | "f" => Ok(Command::Fix),
        "home" | "back" | "b" => Ok(Command::Home),
        "commands" | "cmd" | "c" => Ok(Command::Commands),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(ConsoleError::UnknownCommand("empty command".to_string())),
        other => Err(ConsoleError::UnknownCommand(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_with_and_without_category() {
        assert_eq!(
            parse_command("scan mesh").unwrap(),
            Command::Scan(Some(DiagnosticCategory::Mesh))
        );
        assert_eq!(parse_command("  s  ").unwrap(), Command::Scan(None));
        assert!(matches!(
            parse_command("scan toaster"),
            Err(ConsoleError::UnknownCategory(_))
        ));
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(parse_command("f").unwrap(), Command::Fix);
        assert_eq!(parse_command("back").unwrap(), Command::Home);
        assert_eq!(parse_command("cmd").unwrap(), Command::Commands);
        assert_eq!(parse_command("?").unwrap(), Command::Help);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn unknown_and_empty_commands_error() {
        assert!(matches!(
            parse_command("reboot"),
            Err(ConsoleError::UnknownCommand(name)) if name == "reboot"
        ));
        assert!(matches!(parse_command(""), Err(ConsoleError::UnknownCommand(_))));
    }
}
