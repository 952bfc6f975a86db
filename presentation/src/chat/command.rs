//! Slash commands understood by the chat REPL

use deskchat_domain::PersonalDataKind;

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Login,
    Otp,
    Logout,
    /// Start a fresh conversation, keeping the login
    New,
    /// `/quick` lists, `/quick N` sends the N-th (1-based) quick reply
    Quick(Option<usize>),
    History,
    PersonalData(PersonalDataKind),
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line; `None` if it is not a command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        let command = match name {
            "/login" => ReplCommand::Login,
            "/otp" => ReplCommand::Otp,
            "/logout" => ReplCommand::Logout,
            "/new" => ReplCommand::New,
            "/quick" | "/q" => match arg {
                None => ReplCommand::Quick(None),
                Some(n) => match n.parse::<usize>() {
                    Ok(n) if n > 0 => ReplCommand::Quick(Some(n)),
                    _ => ReplCommand::Unknown(line.to_string()),
                },
            },
            "/history" => ReplCommand::History,
            "/fees" => ReplCommand::PersonalData(PersonalDataKind::Fees),
            "/schedule" => ReplCommand::PersonalData(PersonalDataKind::Schedule),
            "/profile" => ReplCommand::PersonalData(PersonalDataKind::Profile),
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(line.to_string()),
        };
        Some(command)
    }

    pub fn help() -> &'static str {
        "Commands:
  /login           - Log in with student ID and password
  /otp             - Log in with a one-time code sent to your phone
  /logout          - Log out and continue as a visitor
  /new             - Start a new conversation (stays logged in)
  /quick [N]       - List quick replies, or send number N
  /history         - Show the transcript stored on the server
  /fees            - Show your fees (requires login)
  /schedule        - Show your class schedule (requires login)
  /profile         - Show your profile (requires login)
  /help, /h, /?    - Show this help
  /quit, /exit     - Close the chat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(ReplCommand::parse("what courses do you offer?"), None);
        assert_eq!(ReplCommand::parse("  a/b  "), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/login"), Some(ReplCommand::Login));
        assert_eq!(ReplCommand::parse(" /otp "), Some(ReplCommand::Otp));
        assert_eq!(ReplCommand::parse("/logout"), Some(ReplCommand::Logout));
        assert_eq!(ReplCommand::parse("/new"), Some(ReplCommand::New));
        assert_eq!(ReplCommand::parse("/history"), Some(ReplCommand::History));
        assert_eq!(
            ReplCommand::parse("/fees"),
            Some(ReplCommand::PersonalData(PersonalDataKind::Fees))
        );
        assert_eq!(ReplCommand::parse("/exit"), Some(ReplCommand::Quit));
    }

    #[test]
    fn test_parse_quick_reply_index() {
        assert_eq!(ReplCommand::parse("/quick"), Some(ReplCommand::Quick(None)));
        assert_eq!(ReplCommand::parse("/quick 2"), Some(ReplCommand::Quick(Some(2))));
        assert_eq!(
            ReplCommand::parse("/quick 0"),
            Some(ReplCommand::Unknown("/quick 0".to_string()))
        );
        assert_eq!(
            ReplCommand::parse("/quick two"),
            Some(ReplCommand::Unknown("/quick two".to_string()))
        );
    }

    #[test]
    fn test_unknown_command_keeps_input() {
        assert_eq!(
            ReplCommand::parse("/models"),
            Some(ReplCommand::Unknown("/models".to_string()))
        );
    }
}
