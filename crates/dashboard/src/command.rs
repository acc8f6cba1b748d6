use agro_core::{ChartKind, DashError, Granularity, Message as AppMessage, Result, Zone};
use agro_schedule::{parse_time, parse_weekday, ScheduleAction};
use chrono::Weekday;

/// Help text printed for `help` or an unknown command.
pub const HELP: &str = "\
commands:
  hourly | daily | weekly | monthly   (or h | d | w | m)  chart bucketing
  line | bar                                              chart form
  toggle <id>                                             enable/disable a schedule
  delete <id>                                             remove a schedule
  new <greenhouse|field> <HH:MM> <minutes> <day,day,..> [notes]
  edit <id> [zone=..] [time=HH:MM] [min=..] [days=day,day,..] [notes=..]
  quit";

/// What a line typed on stdin asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forward to the dashboard's event bus.
    App(AppMessage),
    /// Run these actions through the schedule reducer, all or nothing.
    Schedule(Vec<ScheduleAction>),
    Help,
}

/// Parse one stdin line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let head = head.to_ascii_lowercase();

    if let Ok(g) = head.parse::<Granularity>() {
        return Ok(Some(Command::App(AppMessage::GranularitySelected(g))));
    }

    let cmd = match head.as_str() {
        "line" => Command::App(AppMessage::ChartKindSelected(ChartKind::Line)),
        "bar"  => Command::App(AppMessage::ChartKindSelected(ChartKind::Bar)),
        "quit" | "q" | "exit" => Command::App(AppMessage::Shutdown),
        "help" | "?" => Command::Help,
        "toggle" => Command::Schedule(vec![ScheduleAction::ToggleActive(id(words.next())?)]),
        "delete" => Command::Schedule(vec![ScheduleAction::Delete(id(words.next())?)]),
        "new" => Command::Schedule(new_schedule(words)?),
        "edit" => Command::Schedule(edit_schedule(words)?),
        other => return Err(DashError::Command(format!("unknown command '{other}'"))),
    };
    Ok(Some(cmd))
}

fn id(word: Option<&str>) -> Result<u64> {
    let word = word.ok_or_else(|| DashError::Command("missing schedule id".into()))?;
    word.trim_start_matches('#')
        .parse()
        .map_err(|_| DashError::Command(format!("'{word}' is not a schedule id")))
}

fn new_schedule<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<Vec<ScheduleAction>> {
    let usage = || DashError::Command("usage: new <zone> <HH:MM> <minutes> <days> [notes]".into());

    let zone: Zone = words
        .next()
        .ok_or_else(usage)?
        .parse()
        .map_err(DashError::Command)?;
    let time_word = words.next().ok_or_else(usage)?;
    let time = parse_time(time_word)
        .ok_or_else(|| DashError::Command(format!("'{time_word}' is not an HH:MM time")))?;
    let duration = minutes(words.next().ok_or_else(usage)?)?;
    let repeat = days(words.next().ok_or_else(usage)?)?;
    let notes = words.collect::<Vec<_>>().join(" ");

    let mut actions = vec![
        ScheduleAction::OpenNew(time),
        ScheduleAction::SetZone(zone),
        ScheduleAction::SetDuration(duration),
    ];
    actions.extend(repeat.into_iter().map(ScheduleAction::ToggleDay));
    if !notes.is_empty() {
        actions.push(ScheduleAction::SetNotes(notes));
    }
    actions.push(ScheduleAction::Save);
    Ok(actions)
}

/// `edit <id> key=value..`; `notes=` swallows the rest of the line.
fn edit_schedule<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<Vec<ScheduleAction>> {
    let mut actions = vec![ScheduleAction::OpenEdit(id(words.next())?)];

    while let Some(word) = words.next() {
        let (key, value) = word.split_once('=').ok_or_else(|| {
            DashError::Command(format!("expected key=value, got '{word}'"))
        })?;
        let action = match key.to_ascii_lowercase().as_str() {
            "zone" => ScheduleAction::SetZone(value.parse().map_err(DashError::Command)?),
            "time" => ScheduleAction::SetTime(
                parse_time(value)
                    .ok_or_else(|| DashError::Command(format!("'{value}' is not an HH:MM time")))?,
            ),
            "min" | "minutes" => ScheduleAction::SetDuration(minutes(value)?),
            "days" => ScheduleAction::SetDays(days(value)?),
            "notes" => {
                let rest = std::iter::once(value).chain(words.by_ref()).collect::<Vec<_>>();
                ScheduleAction::SetNotes(rest.join(" "))
            }
            other => return Err(DashError::Command(format!("unknown schedule field '{other}'"))),
        };
        actions.push(action);
    }

    if actions.len() == 1 {
        return Err(DashError::Command("usage: edit <id> key=value..".into()));
    }
    actions.push(ScheduleAction::Save);
    Ok(actions)
}

fn minutes(word: &str) -> Result<u32> {
    word.parse()
        .map_err(|_| DashError::Command(format!("'{word}' is not a number of minutes")))
}

fn days(word: &str) -> Result<Vec<Weekday>> {
    word.split(',')
        .filter(|d| !d.is_empty())
        .map(|d| parse_weekday(d).ok_or_else(|| DashError::Command(format!("'{d}' is not a weekday"))))
        .collect()
}
