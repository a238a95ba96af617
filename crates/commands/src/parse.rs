/// Prefix distinguishing commands from ordinary submissions.
pub const COMMAND_PREFIX: &str = "!codebot";

/// A parsed command invocation: the command name plus positional args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Parse `text` as a command invocation.
///
/// Returns `None` when the text does not carry the command prefix (it is
/// then a submission, not a command). A bare prefix parses to an empty
/// command name, which the dispatcher reports as not found.
#[must_use]
pub fn parse(text: &str) -> Option<ParsedCommand> {
    let rest = text.strip_prefix(COMMAND_PREFIX)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        // e.g. "!codebottle" is not a command
        return None;
    }
    let mut words = rest.split_whitespace().map(str::to_string);
    let name = words.next().unwrap_or_default();
    Some(ParsedCommand {
        name,
        args: words.collect(),
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_args() {
        let parsed = parse("!codebot promote 1234").unwrap();
        assert_eq!(parsed.name, "promote");
        assert_eq!(parsed.args, ["1234"]);
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(parse("int main() {}").is_none());
    }

    #[test]
    fn prefix_must_be_a_whole_word() {
        assert!(parse("!codebottle help").is_none());
    }

    #[test]
    fn bare_prefix_has_empty_name() {
        assert_eq!(parse("!codebot").unwrap().name, "");
        assert_eq!(parse("!codebot   ").unwrap().name, "");
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let parsed = parse("!codebot   chadd  ").unwrap();
        assert_eq!(parsed.name, "chadd");
        assert!(parsed.args.is_empty());
    }
}
