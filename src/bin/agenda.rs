//! A terminal front-end for a task list.
//!
//! Usage: `agenda [today|tomorrow|week|month] [list | add <description> [YYYY-MM-DD] | done <id> | rm <id>] [--hide-done]`
//!
//! Set `AGENDA_SERVER_URL` to choose the task server, or `AGENDA_LOCAL_STORE` to use a local file instead.

use std::error::Error;

use chrono::{Local, NaiveDate, TimeZone, Utc};

use agenda_client::config::Settings;
use agenda_client::{Horizon, Provider, TaskId, TaskList};
use agenda_client::utils::print_list_view;

const USAGE: &str = "Usage: agenda [today|tomorrow|week|month] [list | add <description> [YYYY-MM-DD] | done <id> | rm <id>] [--hide-done]";

enum Command {
    List,
    Add { description: String, date: Option<NaiveDate> },
    Done(TaskId),
    Remove(TaskId),
}

struct Args {
    days_ahead: Option<u32>,
    command: Command,
    hide_done: bool,
}

fn parse_args(raw: Vec<String>) -> Result<Args, Box<dyn Error>> {
    let hide_done = raw.iter().any(|arg| arg == "--hide-done");
    let mut words: Vec<String> = raw.into_iter().filter(|arg| arg != "--hide-done").collect();

    let mut days_ahead = None;
    if let Some(first) = words.first() {
        if let Ok(horizon) = first.parse::<Horizon>() {
            days_ahead = Some(horizon.days_ahead());
            words.remove(0);
        }
    }

    let command = match words.first().map(String::as_str) {
        None | Some("list") => Command::List,
        Some("add") => {
            let description = words.get(1).ok_or(USAGE)?.clone();
            let date = match words.get(2) {
                None => None,
                Some(text) => Some(NaiveDate::parse_from_str(text, "%Y-%m-%d")?),
            };
            Command::Add { description, date }
        },
        Some("done") => Command::Done(TaskId::from(words.get(1).ok_or(USAGE)?.as_str())),
        Some("rm") => Command::Remove(TaskId::from(words.get(1).ok_or(USAGE)?.as_str())),
        Some(_) => return Err(USAGE.into()),
    };

    Ok(Args { days_ahead, command, hide_done })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = parse_args(std::env::args().skip(1).collect())?;
    let settings = Settings::from_env();
    let days_ahead = args.days_ahead.unwrap_or(settings.days_ahead);

    let provider = Provider::from_settings(&settings)?;
    let list = TaskList::new(provider, days_ahead);
    let mut view = list.subscribe();

    let success = match args.command {
        Command::List => list.reload().await,
        Command::Add { description, date } => {
            let date = match date {
                None => Utc::now(),
                Some(day) => Utc.from_utc_datetime(&day.and_hms(12, 0, 0)),
            };
            list.add(description, date).await
        },
        Command::Done(id) => list.toggle(&id).await,
        Command::Remove(id) => list.remove(&id).await,
    };
    if args.hide_done {
        list.set_show_done(false);
    }

    let current = view.borrow_and_update().clone();
    print_list_view(list.horizon().title(), Local::now(), &current);

    if success == false {
        return Err("The task list could not be updated, see the log for details".into());
    }
    Ok(())
}
