// File: src/command/parser.rs
// Turns command text into a `Command`.
//
// Syntax: a command word, an optional preamble (an index for delete/edit/select),
// then `prefix/value` arguments. A prefix only counts at the start of a word, and
// its value runs until the next prefix, so values may contain spaces:
//
//   add na/Acme Robotics ro/Software Engineer st/applied da/2024-01-05
//   event add na/Technical interview st/2024-03-01 10:00 en/2024-03-01 11:00
use crate::command::{
    AddCommand, Command, DeleteCommand, EditCommand, EditEventDescriptor,
    EditInternshipDescriptor, EventAddCommand, EventDeleteCommand, EventEditCommand,
    EventFindCommand, FindCommand, Index, SelectCommand,
};
use crate::error::ParseError;
use crate::model::field::{DATE_FORMAT, DATETIME_FORMAT, require_ordered, require_text};
use crate::model::{EventFilter, Internship, InternshipFilter, InternshipStatus};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::str::FromStr;

pub const PREFIX_COMPANY: &str = "na/";
pub const PREFIX_ROLE: &str = "ro/";
pub const PREFIX_STATUS: &str = "st/";
pub const PREFIX_DATE: &str = "da/";
pub const PREFIX_NOTES: &str = "no/";

pub const PREFIX_EVENT_NAME: &str = "na/";
pub const PREFIX_EVENT_START: &str = "st/";
pub const PREFIX_EVENT_END: &str = "en/";

const INTERNSHIP_PREFIXES: [&str; 5] = [
    PREFIX_COMPANY,
    PREFIX_ROLE,
    PREFIX_STATUS,
    PREFIX_DATE,
    PREFIX_NOTES,
];
const EVENT_PREFIXES: [&str; 3] = [PREFIX_EVENT_NAME, PREFIX_EVENT_START, PREFIX_EVENT_END];

const HELP_HINT: &str = "Type `help` to see every command.";

/// Tokenized arguments: the text before the first prefix, then each prefix
/// with its trimmed value, in input order.
#[derive(Debug, PartialEq)]
struct ArgumentMap<'a> {
    preamble: &'a str,
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> ArgumentMap<'a> {
    fn value(&self, prefix: &str) -> Option<&'a str> {
        self.values
            .iter()
            .rev()
            .find(|(p, _)| *p == prefix)
            .map(|(_, v)| *v)
    }

    fn has_all(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().all(|p| self.value(p).is_some())
    }

    fn ensure_no_duplicates(&self) -> Result<(), ParseError> {
        let mut repeated: Vec<&str> = Vec::new();
        for (i, (prefix, _)) in self.values.iter().enumerate() {
            if self.values[..i].iter().any(|(p, _)| p == prefix) && !repeated.contains(prefix) {
                repeated.push(*prefix);
            }
        }
        if repeated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(repeated.join(" ")))
        }
    }
}

fn tokenize<'a>(args: &'a str, prefixes: &[&'static str]) -> ArgumentMap<'a> {
    let mut positions: Vec<(usize, &'static str)> = Vec::new();
    let mut at_word_start = true;
    for (idx, c) in args.char_indices() {
        if at_word_start
            && let Some(prefix) = prefixes.iter().find(|p| args[idx..].starts_with(**p))
        {
            positions.push((idx, *prefix));
        }
        at_word_start = c.is_whitespace();
    }

    let preamble_end = positions.first().map(|(idx, _)| *idx).unwrap_or(args.len());
    let mut values = Vec::with_capacity(positions.len());
    for (i, (idx, prefix)) in positions.iter().enumerate() {
        let value_end = positions.get(i + 1).map(|(next, _)| *next).unwrap_or(args.len());
        values.push((*prefix, args[idx + prefix.len()..value_end].trim()));
    }

    ArgumentMap {
        preamble: args[..preamble_end].trim(),
        values,
    }
}

pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let input = input.trim();
    let (word, args) = input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""));

    match word {
        "add" => parse_add(args),
        "delete" => Ok(Command::Delete(DeleteCommand {
            index: parse_index(args, DeleteCommand::USAGE)?,
        })),
        "edit" => parse_edit(args),
        "find" => parse_find(args),
        "list" => Ok(Command::List),
        "select" => Ok(Command::Select(SelectCommand {
            index: parse_index(args, SelectCommand::USAGE)?,
        })),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        "event" => parse_event(args),
        "" => Err(ParseError::InvalidFormat(HELP_HINT)),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_event(args: &str) -> Result<Command, ParseError> {
    let args = args.trim();
    let (sub, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    match sub {
        "add" => parse_event_add(rest),
        "delete" => Ok(Command::EventDelete(EventDeleteCommand {
            index: parse_index(rest, EventDeleteCommand::USAGE)?,
        })),
        "edit" => parse_event_edit(rest),
        "find" => parse_event_find(rest),
        "" => Err(ParseError::InvalidFormat(HELP_HINT)),
        other => Err(ParseError::UnknownCommand(format!("event {}", other))),
    }
}

// --- Internship commands ---

fn parse_add(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &INTERNSHIP_PREFIXES);
    if !map.preamble.is_empty()
        || !map.has_all(&[PREFIX_COMPANY, PREFIX_ROLE, PREFIX_STATUS, PREFIX_DATE])
    {
        return Err(ParseError::InvalidFormat(AddCommand::USAGE));
    }
    map.ensure_no_duplicates()?;

    let internship = Internship::new(
        map.value(PREFIX_COMPANY).unwrap_or_default(),
        map.value(PREFIX_ROLE).unwrap_or_default(),
        parse_status(map.value(PREFIX_STATUS).unwrap_or_default())?,
        parse_date(map.value(PREFIX_DATE).unwrap_or_default())?,
        map.value(PREFIX_NOTES).unwrap_or_default(),
    )?;
    Ok(Command::Add(AddCommand { internship }))
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &INTERNSHIP_PREFIXES);
    let index = parse_index(map.preamble, EditCommand::USAGE)?;
    map.ensure_no_duplicates()?;

    let descriptor = EditInternshipDescriptor {
        company: map
            .value(PREFIX_COMPANY)
            .map(|v| require_text("Company", v))
            .transpose()?,
        role: map
            .value(PREFIX_ROLE)
            .map(|v| require_text("Role", v))
            .transpose()?,
        status: map.value(PREFIX_STATUS).map(parse_status).transpose()?,
        applied: map.value(PREFIX_DATE).map(parse_date).transpose()?,
        notes: map.value(PREFIX_NOTES).map(str::to_string),
    };
    if !descriptor.is_any_field_edited() {
        return Err(ParseError::InvalidValue(
            EditCommand::MESSAGE_NOT_EDITED.to_string(),
        ));
    }
    Ok(Command::Edit(EditCommand { index, descriptor }))
}

fn parse_find(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &INTERNSHIP_PREFIXES[..4]);
    if !map.preamble.is_empty() {
        return Err(ParseError::InvalidFormat(FindCommand::USAGE));
    }
    map.ensure_no_duplicates()?;

    let filter = InternshipFilter {
        company: map
            .value(PREFIX_COMPANY)
            .map(|v| require_text("Company", v))
            .transpose()?,
        role: map
            .value(PREFIX_ROLE)
            .map(|v| require_text("Role", v))
            .transpose()?,
        status: map
            .value(PREFIX_STATUS)
            .map(|v| require_text("Status", v))
            .transpose()?,
        applied: map.value(PREFIX_DATE).map(parse_date).transpose()?,
    };
    Ok(Command::Find(FindCommand { filter }))
}

// --- Event commands ---

fn parse_event_add(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &EVENT_PREFIXES);
    if !map.preamble.is_empty() || !map.has_all(&EVENT_PREFIXES) {
        return Err(ParseError::InvalidFormat(EventAddCommand::USAGE));
    }
    map.ensure_no_duplicates()?;

    let name = require_text("Event name", map.value(PREFIX_EVENT_NAME).unwrap_or_default())?;
    let start = parse_datetime(map.value(PREFIX_EVENT_START).unwrap_or_default())?;
    let end = parse_datetime(map.value(PREFIX_EVENT_END).unwrap_or_default())?;
    require_ordered(start, end)?;
    Ok(Command::EventAdd(EventAddCommand { name, start, end }))
}

fn parse_event_edit(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &EVENT_PREFIXES);
    let index = parse_index(map.preamble, EventEditCommand::USAGE)?;
    map.ensure_no_duplicates()?;

    let descriptor = EditEventDescriptor {
        name: map
            .value(PREFIX_EVENT_NAME)
            .map(|v| require_text("Event name", v))
            .transpose()?,
        start: map.value(PREFIX_EVENT_START).map(parse_datetime).transpose()?,
        end: map.value(PREFIX_EVENT_END).map(parse_datetime).transpose()?,
    };
    if !descriptor.is_any_field_edited() {
        return Err(ParseError::InvalidValue(
            EventEditCommand::MESSAGE_NOT_EDITED.to_string(),
        ));
    }
    if let (Some(start), Some(end)) = (descriptor.start, descriptor.end) {
        require_ordered(start, end)?;
    }
    Ok(Command::EventEdit(EventEditCommand { index, descriptor }))
}

fn parse_event_find(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &EVENT_PREFIXES);
    if !map.preamble.is_empty() {
        return Err(ParseError::InvalidFormat(EventFindCommand::USAGE));
    }
    map.ensure_no_duplicates()?;

    let filter = EventFilter {
        name: map
            .value(PREFIX_EVENT_NAME)
            .map(|v| require_text("Event name", v))
            .transpose()?,
        start: map.value(PREFIX_EVENT_START).map(parse_datetime).transpose()?,
        end: map.value(PREFIX_EVENT_END).map(parse_datetime).transpose()?,
    };
    Ok(Command::EventFind(EventFindCommand { filter }))
}

// --- Field parsers ---

pub fn parse_index(s: &str, usage: &'static str) -> Result<Index, ParseError> {
    s.trim()
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidFormat(usage))
}

pub fn parse_status(s: &str) -> Result<InternshipStatus, ParseError> {
    InternshipStatus::from_str(s.trim()).map_err(|_| {
        ParseError::InvalidValue(format!(
            "Unknown status '{}'. Status must be one of: {}",
            s.trim(),
            InternshipStatus::all_names()
        ))
    })
}

/// Accepts `YYYY-MM-DD`, `today` and `tomorrow`.
pub fn parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    let s = s.trim();
    let today = Local::now().date_naive();
    match s.to_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
        ParseError::InvalidValue(format!(
            "Invalid date '{}'. Dates are written as YYYY-MM-DD",
            s
        ))
    })
}

pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, ParseError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map_err(|_| {
        ParseError::InvalidValue(format!(
            "Invalid time '{}'. Times are written as YYYY-MM-DD HH:MM",
            s
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_values_with_spaces() {
        let map = tokenize(
            " 2 na/Acme Robotics ro/Software Engineer",
            &INTERNSHIP_PREFIXES,
        );
        assert_eq!(map.preamble, "2");
        assert_eq!(map.value(PREFIX_COMPANY), Some("Acme Robotics"));
        assert_eq!(map.value(PREFIX_ROLE), Some("Software Engineer"));
        assert_eq!(map.value(PREFIX_STATUS), None);
    }

    #[test]
    fn test_tokenize_ignores_prefix_inside_word() {
        let map = tokenize(" no/see https://x.io/na/page", &INTERNSHIP_PREFIXES);
        assert_eq!(map.value(PREFIX_NOTES), Some("see https://x.io/na/page"));
        assert_eq!(map.value(PREFIX_COMPANY), None);
    }

    #[test]
    fn test_parse_add() {
        let cmd = parse_command("add na/Acme ro/SWE st/Applied da/2024-01-05 no/referral").unwrap();
        let Command::Add(AddCommand { internship }) = cmd else {
            panic!("expected an add command");
        };
        assert_eq!(internship.company(), "Acme");
        assert_eq!(internship.role(), "SWE");
        assert_eq!(internship.status(), InternshipStatus::Applied);
        assert_eq!(internship.applied(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(internship.notes(), "referral");
    }

    #[test]
    fn test_parse_add_missing_field() {
        assert_eq!(
            parse_command("add na/Acme ro/SWE st/applied"),
            Err(ParseError::InvalidFormat(AddCommand::USAGE))
        );
    }

    #[test]
    fn test_parse_add_bad_values() {
        let err = parse_command("add na/Acme ro/SWE st/ghosted da/2024-01-05").unwrap_err();
        assert!(err.to_string().starts_with("Unknown status 'ghosted'"));

        let err = parse_command("add na/Acme ro/SWE st/applied da/05-01-2024").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));

        let err = parse_command("add na/ ro/SWE st/applied da/2024-01-05").unwrap_err();
        assert_eq!(err, ParseError::InvalidValue("Company must not be blank".into()));
    }

    #[test]
    fn test_parse_duplicate_prefix() {
        assert_eq!(
            parse_command("find na/Acme na/Beta"),
            Err(ParseError::DuplicatePrefixes("na/".into()))
        );
    }

    #[test]
    fn test_parse_find_allows_no_fields() {
        assert_eq!(
            parse_command("find"),
            Ok(Command::Find(FindCommand {
                filter: InternshipFilter::default()
            }))
        );
    }

    #[test]
    fn test_parse_find_fields() {
        let cmd = parse_command("find na/Acme st/app").unwrap();
        assert_eq!(
            cmd,
            Command::Find(FindCommand {
                filter: InternshipFilter {
                    company: Some("Acme".into()),
                    status: Some("app".into()),
                    ..Default::default()
                }
            })
        );
    }

    #[test]
    fn test_parse_index_commands() {
        assert_eq!(
            parse_command("delete 2"),
            Ok(Command::Delete(DeleteCommand {
                index: Index::from_one_based(2).unwrap()
            }))
        );
        assert_eq!(
            parse_command("delete 0"),
            Err(ParseError::InvalidFormat(DeleteCommand::USAGE))
        );
        assert_eq!(
            parse_command("select abc"),
            Err(ParseError::InvalidFormat(SelectCommand::USAGE))
        );
    }

    #[test]
    fn test_parse_edit_needs_a_field() {
        assert_eq!(
            parse_command("edit 1"),
            Err(ParseError::InvalidValue(EditCommand::MESSAGE_NOT_EDITED.into()))
        );
        let cmd = parse_command("edit 1 st/offered no/").unwrap();
        assert_eq!(
            cmd,
            Command::Edit(EditCommand {
                index: Index::from_one_based(1).unwrap(),
                descriptor: EditInternshipDescriptor {
                    status: Some(InternshipStatus::Offered),
                    notes: Some(String::new()),
                    ..Default::default()
                }
            })
        );
    }

    #[test]
    fn test_parse_event_add() {
        let cmd = parse_command(
            "event add na/Technical interview st/2024-03-01 10:00 en/2024-03-01 11:30",
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::EventAdd(EventAddCommand {
                name: "Technical interview".into(),
                start: parse_datetime("2024-03-01 10:00").unwrap(),
                end: parse_datetime("2024-03-01 11:30").unwrap(),
            })
        );
    }

    #[test]
    fn test_parse_event_add_rejects_reversed_times() {
        let err = parse_command("event add na/Call st/2024-03-01 12:00 en/2024-03-01 11:00")
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue(_)));
    }

    #[test]
    fn test_parse_event_find_end_only() {
        let cmd = parse_command("event find en/2024-06-30 23:59").unwrap();
        assert_eq!(
            cmd,
            Command::EventFind(EventFindCommand {
                filter: EventFilter {
                    end: Some(parse_datetime("2024-06-30 23:59").unwrap()),
                    ..Default::default()
                }
            })
        );
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(
            parse_command("fly away"),
            Err(ParseError::UnknownCommand("fly".into()))
        );
        assert_eq!(
            parse_command("event fly"),
            Err(ParseError::UnknownCommand("event fly".into()))
        );
        assert_eq!(parse_command("   "), Err(ParseError::InvalidFormat(HELP_HINT)));
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date("Today").unwrap(), today);
        assert_eq!(parse_date("tomorrow").unwrap(), today + Duration::days(1));
    }
}
