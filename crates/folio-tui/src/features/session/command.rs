//! Command grammar for the interactive terminal.
//!
//! A line is classified by its first whitespace-delimited token, matched
//! case-insensitively. Classification never fails: anything unknown is
//! [`Command::Unknown`].

use chrono::{DateTime, FixedOffset};
use folio_core::projects::ProjectSummary;

use super::transcript::OutputLine;

pub const PASSWORD_PROMPT: &str = "Enter password:";
pub const AUTH_SUCCESS: &str = "Authentication successful. Opening admin panel...";
pub const AUTH_FAILURE: &str = "root auth failure (this incident will be reported)";

/// Locale-independent `date` output, e.g. `Sun Oct 18 2026 14:03:11 +00:00`.
const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S %:z";

pub struct CommandSpec {
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every command, in `help` order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        usage: "help",
        description: "Show this help message",
    },
    CommandSpec {
        usage: "ls [-a]",
        description: "List projects (-a includes hidden ones)",
    },
    CommandSpec {
        usage: "admin",
        description: "Open the admin panel (requires password)",
    },
    CommandSpec {
        usage: "clear",
        description: "Clear the terminal history",
    },
    CommandSpec {
        usage: "date",
        description: "Display the current date",
    },
    CommandSpec {
        usage: "echo [text]",
        description: "Print text to the terminal",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Empty or whitespace-only line.
    Empty,
    Help,
    Admin,
    Clear,
    Date,
    Echo(&'a str),
    Ls { all: bool },
    /// `ls` with an argument it does not understand.
    LsUsage(&'a str),
    Unknown,
}

pub fn parse(line: &str) -> Command<'_> {
    let line = line.trim_start();
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Command::Empty;
    };

    match head.to_ascii_lowercase().as_str() {
        "help" => Command::Help,
        "admin" => Command::Admin,
        "clear" => Command::Clear,
        "date" => Command::Date,
        "echo" => Command::Echo(echo_text(line, head.len())),
        "ls" => {
            let mut all = false;
            for arg in tokens {
                match arg {
                    "-a" | "--all" => all = true,
                    other => return Command::LsUsage(other),
                }
            }
            Command::Ls { all }
        }
        _ => Command::Unknown,
    }
}

/// Everything after the first whitespace character following `echo`.
fn echo_text(line: &str, head_len: usize) -> &str {
    let rest = &line[head_len..];
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => "",
    }
}

pub fn help_lines() -> Vec<OutputLine> {
    let width = COMMANDS.iter().map(|c| c.usage.len()).max().unwrap_or(0);
    let mut lines = vec![OutputLine::text("Available commands:")];
    lines.extend(COMMANDS.iter().map(|c| {
        OutputLine::Text(format!("  {:<width$}  {}", c.usage, c.description))
    }));
    lines
}

/// Project names in directory order; hidden ones only with `all`.
pub fn ls_lines(projects: &[ProjectSummary], all: bool) -> Vec<OutputLine> {
    projects
        .iter()
        .filter(|p| all || !p.hidden)
        .map(|p| OutputLine::ProjectLink {
            id: p.id.clone(),
            name: p.display_name.clone(),
        })
        .collect()
}

pub fn ls_usage_lines(arg: &str) -> Vec<OutputLine> {
    vec![
        OutputLine::Text(format!("ls: unrecognized option '{arg}'")),
        OutputLine::text("usage: ls [-a]"),
    ]
}

pub fn format_date(now: &DateTime<FixedOffset>) -> String {
    now.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn summary(id: &str, name: &str, hidden: bool) -> ProjectSummary {
        ProjectSummary {
            id: id.to_string(),
            display_name: name.to_string(),
            hidden,
        }
    }

    fn names(lines: &[OutputLine]) -> Vec<&str> {
        lines.iter().map(OutputLine::as_str).collect()
    }

    #[test]
    fn test_parse_is_case_insensitive_on_first_token() {
        assert_eq!(parse("HELP"), Command::Help);
        assert_eq!(parse("  Admin  "), Command::Admin);
        assert_eq!(parse("cLeAr"), Command::Clear);
        assert_eq!(parse("DATE now"), Command::Date);
    }

    #[test]
    fn test_parse_empty_and_unknown() {
        assert_eq!(parse(""), Command::Empty);
        assert_eq!(parse("   \t"), Command::Empty);
        assert_eq!(parse("sudo rm -rf /"), Command::Unknown);
        assert_eq!(parse("helpme"), Command::Unknown);
        assert_eq!(parse("echoing"), Command::Unknown);
    }

    #[test]
    fn test_echo_keeps_text_verbatim() {
        assert_eq!(parse("echo hello world"), Command::Echo("hello world"));
        assert_eq!(parse("echo   spaced  out "), Command::Echo("  spaced  out "));
        assert_eq!(parse("ECHO Mixed Case"), Command::Echo("Mixed Case"));
        assert_eq!(parse("echo"), Command::Echo(""));
        assert_eq!(parse("echo "), Command::Echo(""));
    }

    #[test]
    fn test_ls_flags() {
        assert_eq!(parse("ls"), Command::Ls { all: false });
        assert_eq!(parse("LS -a"), Command::Ls { all: true });
        assert_eq!(parse("ls --all"), Command::Ls { all: true });
        assert_eq!(parse("ls -l"), Command::LsUsage("-l"));
    }

    #[test]
    fn test_ls_lines_respect_hidden_and_order() {
        let projects = vec![summary("1", "A", false), summary("2", "B", true)];
        assert_eq!(names(&ls_lines(&projects, false)), ["A"]);
        assert_eq!(names(&ls_lines(&projects, true)), ["A", "B"]);
    }

    #[test]
    fn test_ls_lines_never_resort() {
        let projects = vec![
            summary("9", "Zeta", false),
            summary("1", "Alpha", false),
            summary("5", "Mu", false),
        ];
        assert_eq!(names(&ls_lines(&projects, false)), ["Zeta", "Alpha", "Mu"]);
        assert_eq!(
            ls_lines(&projects, false)[0],
            OutputLine::ProjectLink {
                id: "9".to_string(),
                name: "Zeta".to_string()
            }
        );
    }

    #[test]
    fn test_help_lists_every_command() {
        let lines = help_lines();
        assert_eq!(lines.len(), COMMANDS.len() + 1);
        let text = names(&lines).join("\n");
        for name in ["help", "ls", "admin", "clear", "date", "echo"] {
            assert!(text.contains(name), "help is missing {name}");
        }
    }

    #[test]
    fn test_date_format_is_fixed() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let now = offset.with_ymd_and_hms(2026, 10, 18, 14, 3, 11).unwrap();
        assert_eq!(format_date(&now), "Sun Oct 18 2026 14:03:11 +00:00");
    }
}
