use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::Write;

use crate::schedule::{Assignment, ScheduleWindow, DAYS};

pub const DAY_NAMES: [&str; DAYS] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Formats an hourly slot's time range for display, e.g. "09:00-10:00".
pub fn hour_label(window: &ScheduleWindow, hour_offset: usize) -> String {
    let start = window.start_hour + hour_offset as u32;
    format!("{:02}:00-{:02}:00", start % 24, (start + 1) % 24)
}

fn occupants_by_slot(assignments: &[Assignment]) -> HashMap<(usize, usize), Vec<&str>> {
    let mut by_slot: HashMap<(usize, usize), Vec<&str>> = HashMap::new();
    for a in assignments {
        by_slot
            .entry((a.day, a.hour_offset))
            .or_default()
            .push(&a.participant);
    }
    by_slot
}

/// Prints the full weekly grid, empty slots included.
pub fn print_week_schedule(window: &ScheduleWindow, assignments: &[Assignment]) {
    let by_slot = occupants_by_slot(assignments);

    println!("\n=== Weekly Schedule ===");
    println!("Total assignments: {}", assignments.len());

    for (day, day_name) in DAY_NAMES.iter().enumerate() {
        println!("\n{}", day_name);
        for offset in 0..window.hours_per_day() {
            match by_slot.get(&(day, offset)) {
                Some(names) => {
                    println!("  {} -> {}", hour_label(window, offset), names.join(", "))
                }
                None => println!("  {} -> [EMPTY]", hour_label(window, offset)),
            }
        }
    }
}

/// Writes the weekly grid to a text file, one slot per line.
pub fn write_schedule_to_file(
    window: &ScheduleWindow,
    assignments: &[Assignment],
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let by_slot = occupants_by_slot(assignments);
    let mut file = File::create(filename)?;

    for (day, day_name) in DAY_NAMES.iter().enumerate() {
        writeln!(file, "** {} **", day_name)?;
        for offset in 0..window.hours_per_day() {
            match by_slot.get(&(day, offset)) {
                Some(names) => {
                    writeln!(file, "{} {}", hour_label(window, offset), names.join(", "))?
                }
                None => writeln!(file, "{} [EMPTY]", hour_label(window, offset))?,
            }
        }
    }

    Ok(())
}

/// Writes the raw assignment list as pretty-printed JSON.
pub fn write_schedule_json(assignments: &[Assignment], filename: &str) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    serde_json::to_writer_pretty(file, assignments)?;
    Ok(())
}
