//! Parses chat input. Plain lines are messages; lines starting with `/` stand
//! in for the buttons of the graphical client.

use std::path::PathBuf;

use navi_core::{AudioOption, Language, MessageId, ServiceCard};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Upload(String),
    Record(PathBuf),
    Service(ServiceCard),
    /// 1-based position in the listed results.
    Save(usize),
    Apply(usize),
    Download,
    Accept,
    Decline,
    Transcript(MessageId),
    Audio(AudioOption),
    Language(Language),
    Away,
    SignOut,
    DeleteAccount,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command /{0}; type /help for the list")]
    UnknownCommand(String),
    #[error("/{command} needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("{value:?} is not {what}")]
    InvalidArgument { value: String, what: &'static str },
}

pub const HELP: &str = "\
Type a message and press Enter to answer Navi. Commands:
  /service <number|name>   pick a service card
  /save <n>                save listing n from the results
  /apply <n>               autofill an application for listing n
  /download                save the autofilled application as HTML
  /accept, /decline        answer the offer of more help
  /upload <file name>      attach a document
  /record <audio file>     send a voice message from a recording
  /transcript <id>         show or hide an audio message's transcript
  /audio <browser|local|off>
  /lang <en|es|uk|pl|fr|hi>
  /away                    leave the chat screen
  /signout, /delete        reset the session
  /help, /quit";

pub fn parse(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Say(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "upload" => Command::Upload(required(arg, "upload", "a file name")?.to_string()),
        "record" => Command::Record(PathBuf::from(required(arg, "record", "an audio file")?)),
        "service" => Command::Service(service_card(required(arg, "service", "a service")?)?),
        "save" => Command::Save(position(required(arg, "save", "a listing number")?)?),
        "apply" => Command::Apply(position(required(arg, "apply", "a listing number")?)?),
        "download" => Command::Download,
        "accept" | "yes" => Command::Accept,
        "decline" | "no" => Command::Decline,
        "transcript" => {
            let value = required(arg, "transcript", "a message id")?;
            let id = value.parse().map_err(|_| InputError::InvalidArgument {
                value: value.to_string(),
                what: "a message id",
            })?;
            Command::Transcript(MessageId(id))
        }
        "audio" => Command::Audio(audio_option(required(arg, "audio", "browser, local or off")?)?),
        "lang" | "language" => {
            let value = required(arg, "lang", "a language code")?;
            Command::Language(Language::from_code(value).ok_or_else(|| {
                InputError::InvalidArgument {
                    value: value.to_string(),
                    what: "a supported language code",
                }
            })?)
        }
        "away" => Command::Away,
        "signout" => Command::SignOut,
        "delete" => Command::DeleteAccount,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(
    arg: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, InputError> {
    if arg.is_empty() {
        Err(InputError::MissingArgument { command, what })
    } else {
        Ok(arg)
    }
}

fn position(value: &str) -> Result<usize, InputError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(InputError::InvalidArgument {
            value: value.to_string(),
            what: "a listing number",
        }),
    }
}

/// Cards are picked by their 1-based position or by label.
fn service_card(value: &str) -> Result<ServiceCard, InputError> {
    let by_position = value
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| ServiceCard::ALL.get(index).copied());
    by_position
        .or_else(|| ServiceCard::from_label(value))
        .ok_or_else(|| InputError::InvalidArgument {
            value: value.to_string(),
            what: "a service card",
        })
}

fn audio_option(value: &str) -> Result<AudioOption, InputError> {
    match value.to_ascii_lowercase().as_str() {
        "browser" => Ok(AudioOption::Browser),
        "local" => Ok(AudioOption::Local),
        "off" => Ok(AudioOption::Off),
        _ => Err(InputError::InvalidArgument {
            value: value.to_string(),
            what: "an audio option",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            parse("  Maria Lopez \n"),
            Ok(Some(Command::Say("Maria Lopez".into())))
        );
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn service_by_number_or_name() {
        assert_eq!(
            parse("/service 2"),
            Ok(Some(Command::Service(ServiceCard::HousingSearch)))
        );
        assert_eq!(
            parse("/service job search"),
            Ok(Some(Command::Service(ServiceCard::JobSearch)))
        );
        assert!(matches!(
            parse("/service 9"),
            Err(InputError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn listing_positions_are_one_based() {
        assert_eq!(parse("/save 3"), Ok(Some(Command::Save(3))));
        assert!(parse("/apply 0").is_err());
        assert_eq!(
            parse("/apply"),
            Err(InputError::MissingArgument {
                command: "apply",
                what: "a listing number"
            })
        );
    }

    #[test]
    fn settings_commands() {
        assert_eq!(
            parse("/audio OFF"),
            Ok(Some(Command::Audio(AudioOption::Off)))
        );
        assert_eq!(
            parse("/lang uk"),
            Ok(Some(Command::Language(Language::Ukrainian)))
        );
        assert!(parse("/lang xx").is_err());
    }

    #[test]
    fn upload_keeps_spaces_in_file_name() {
        assert_eq!(
            parse("/upload my resume.pdf"),
            Ok(Some(Command::Upload("my resume.pdf".into())))
        );
    }

    #[test]
    fn unknown_commands_are_errors() {
        assert_eq!(
            parse("/dance"),
            Err(InputError::UnknownCommand("dance".into()))
        );
    }
}
