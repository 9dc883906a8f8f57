use livetrans_core::Msg;

pub const HELP: &str = "\
Type text to replace the input. Commands:
  :on            enable real-time translation
  :off           disable real-time translation
  :lang <name>   change the target language
  :go            translate the current input now
  :help          show this help
  :quit          exit
Start a line with '::' to enter text beginning with ':'.";

/// One line of terminal input, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Enable,
    Disable,
    Language(String),
    Translate,
    Help,
    Quit,
    /// New content of the input box.
    Text(String),
    Unknown(String),
}

pub fn parse_line(line: &str) -> InputCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(escaped) = line.strip_prefix("::") {
        return InputCommand::Text(format!(":{escaped}"));
    }
    let Some(command) = line.strip_prefix(':') else {
        return InputCommand::Text(line.to_string());
    };

    let mut parts = command.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();
    match (name, argument) {
        ("on", "") => InputCommand::Enable,
        ("off", "") => InputCommand::Disable,
        ("lang", lang) if !lang.is_empty() => InputCommand::Language(lang.to_string()),
        ("go", "") => InputCommand::Translate,
        ("help", "") => InputCommand::Help,
        ("quit" | "q", "") => InputCommand::Quit,
        _ => InputCommand::Unknown(line.to_string()),
    }
}

impl InputCommand {
    /// Coordinator message for this command, if it has one.
    pub fn into_msg(self) -> Option<Msg> {
        match self {
            InputCommand::Enable => Some(Msg::SetEnabled(true)),
            InputCommand::Disable => Some(Msg::SetEnabled(false)),
            InputCommand::Language(lang) => Some(Msg::TargetLanguageChanged(lang)),
            InputCommand::Translate => Some(Msg::TranslateClicked),
            InputCommand::Text(text) => Some(Msg::TextChanged(text)),
            InputCommand::Help | InputCommand::Quit | InputCommand::Unknown(_) => None,
        }
    }
}
