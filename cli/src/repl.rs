use crate::report::Format;
use clap::ValueEnum;

pub const HELP: &str = "Type a query, or :select <id>, :history, :export <path> [--format text|json], :quit";

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    History,
    Select(u32),
    Export { path: &'a str, format: Format },
    Search(&'a str),
    /// A `:`-command that did not parse; carries the usage line to print.
    Usage(&'static str),
}

pub fn parse(input: &str) -> Command<'_> {
    let input = input.trim();
    match input.split_whitespace().collect::<Vec<_>>().as_slice() {
        [":quit"] | [":q"] => Command::Quit,
        [":history"] => Command::History,
        [":select", id] => id.parse().map(Command::Select).unwrap_or(Command::Usage("Usage: :select <id>")),
        [":export", path] => Command::Export { path: *path, format: Format::Text },
        [":export", path, "--format", kind] => match Format::from_str(kind, true) {
            Ok(format) => Command::Export { path: *path, format },
            Err(_) => Command::Usage("Usage: :export <path> [--format text|json]"),
        },
        [":select", ..] => Command::Usage("Usage: :select <id>"),
        [":export", ..] => Command::Usage("Usage: :export <path> [--format text|json]"),
        [cmd, ..] if cmd.starts_with(':') => Command::Usage(HELP),
        _ => Command::Search(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_takes_an_optional_format_flag() {
        assert_eq!(parse(":export out.txt"), Command::Export { path: "out.txt", format: Format::Text });
        assert_eq!(parse(":export out.json --format json"), Command::Export { path: "out.json", format: Format::Json });
        assert_eq!(parse(":export out.txt --format TEXT"), Command::Export { path: "out.txt", format: Format::Text });
        assert!(matches!(parse(":export out.txt json"), Command::Usage(_)));
        assert!(matches!(parse(":export out.txt --format pdf"), Command::Usage(_)));
    }

    #[test]
    fn select_needs_a_numeric_id() {
        assert_eq!(parse(":select 13"), Command::Select(13));
        assert!(matches!(parse(":select thirteen"), Command::Usage(_)));
        assert!(matches!(parse(":select"), Command::Usage(_)));
    }

    #[test]
    fn plain_text_is_a_search() {
        assert_eq!(parse("  risk management "), Command::Search("risk management"));
        assert_eq!(parse(""), Command::Search(""));
        assert_eq!(parse(":q"), Command::Quit);
        assert_eq!(parse(":history"), Command::History);
        assert!(matches!(parse(":frobnicate"), Command::Usage(HELP)));
    }
}
