use std::path::PathBuf;

pub const HELP: &[&str] = &[
    "Commands:",
    "  upload <path.pdf>   upload and parse a résumé",
    "  jd <text>           replace the job description",
    "  jd+ <text>          append a line to the job description",
    "  jd-file <path>      load the job description from a file",
    "  analyze             check the ATS match",
    "  reset               clear the panel",
    "  show                print the panel",
    "  help                print this help",
    "  quit                exit",
];

/// One line typed at the panel prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// `upload` without a path models a dismissed file picker.
    Upload(Option<PathBuf>),
    SetJobDescription(String),
    AppendJobDescription(String),
    LoadJobDescription(PathBuf),
    Analyze,
    Reset,
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Returns `None` for blank lines.
pub fn parse_line(line: &str) -> Option<InputCommand> {
    use InputCommand::*;

    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "upload" => Upload(non_empty(rest).map(|path| PathBuf::from(unquote(path)))),
        "jd" => SetJobDescription(rest.to_string()),
        "jd+" => AppendJobDescription(rest.to_string()),
        "jd-file" => match non_empty(rest) {
            Some(path) => LoadJobDescription(PathBuf::from(unquote(path))),
            None => Unknown(line.to_string()),
        },
        "analyze" | "check" => Analyze,
        "reset" => Reset,
        "show" => Show,
        "help" | "?" => Help,
        "quit" | "exit" => Quit,
        _ => Unknown(line.to_string()),
    };
    Some(command)
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

/// Strips one pair of matching quotes so paths with spaces can be pasted as-is.
fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Appends `line` as a new line of `current`.
pub fn append_line(current: &str, line: &str) -> String {
    if current.is_empty() {
        line.to_string()
    } else {
        format!("{current}\n{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::InputCommand::*;
    use super::*;

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(
            parse_line("upload ~/cv/resume.pdf"),
            Some(Upload(Some(PathBuf::from("~/cv/resume.pdf"))))
        );
        assert_eq!(
            parse_line("  upload \"My Resume.pdf\" "),
            Some(Upload(Some(PathBuf::from("My Resume.pdf"))))
        );
        assert_eq!(parse_line("upload"), Some(Upload(None)));
        assert_eq!(
            parse_line("jd Senior Rust engineer, SQL"),
            Some(SetJobDescription("Senior Rust engineer, SQL".to_string()))
        );
        assert_eq!(parse_line("jd"), Some(SetJobDescription(String::new())));
        assert_eq!(
            parse_line("jd+ Remote friendly"),
            Some(AppendJobDescription("Remote friendly".to_string()))
        );
        assert_eq!(
            parse_line("jd-file jd.txt"),
            Some(LoadJobDescription(PathBuf::from("jd.txt")))
        );
        assert_eq!(parse_line("ANALYZE"), Some(Analyze));
        assert_eq!(parse_line("exit"), Some(Quit));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("frobnicate now"), Some(Unknown("frobnicate now".to_string())));
        assert_eq!(parse_line("jd-file"), Some(Unknown("jd-file".to_string())));
    }

    #[test]
    fn append_line_joins_with_newline() {
        assert_eq!(append_line("", "first"), "first");
        assert_eq!(append_line("first", "second"), "first\nsecond");
    }
}
