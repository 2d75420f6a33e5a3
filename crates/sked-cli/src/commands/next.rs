use anyhow::Result;
use sked_core::clock::Clock;
use sked_core::date::CalendarDate;
use sked_core::recurrence::next_date;

use crate::cli::NextCommand;

/// Prints the bare `YYYYMMDD` result, like `/api/nextdate`. Needs no database.
pub fn next(command: NextCommand, clock: &impl Clock) -> Result<()> {
    println!("{}", compute(&command, clock)?);
    Ok(())
}

fn compute(command: &NextCommand, clock: &impl Clock) -> Result<CalendarDate> {
    let now = match &command.now {
        Some(raw) => CalendarDate::parse(raw)?.at_midnight(),
        None => clock.now(),
    };
    Ok(next_date(now, &command.date, &command.repeat)?)
}
