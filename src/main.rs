use std::process;

use shift_planner::display::{print_week_schedule, write_schedule_json, write_schedule_to_file};
use shift_planner::parser::{load_participants_csv, load_request, merge_participants};
use shift_planner::schedule::{optimize, PlannerError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: shift-planner <request.json> [participants.csv]");
        process::exit(1);
    }

    println!("Loading request from {}...", args[1]);
    let mut request = load_request(&args[1])?;

    if let Some(csv_path) = args.get(2) {
        let rows = load_participants_csv(csv_path)?;
        println!("Merging {} participant rows from {}", rows.len(), csv_path);
        merge_participants(&mut request.participants, rows);
    }

    println!(
        "Planning {} hourly slots for {} participants...",
        request.window().total_slots(),
        request.participants.len()
    );

    match optimize(request.window(), &request.options(), &request.participants) {
        Ok(assignments) => {
            print_week_schedule(&request.window(), &assignments);

            write_schedule_to_file(&request.window(), &assignments, "schedule_week.txt")?;
            write_schedule_json(&assignments, "schedule_week.json")?;
            println!("\nSchedules saved to:");
            println!("  - schedule_week.txt");
            println!("  - schedule_week.json");
            Ok(())
        }
        Err(err @ PlannerError::Infeasible(_)) => {
            eprintln!("No valid assignment exists: {}", err);
            process::exit(2);
        }
        Err(err) => Err(err.into()),
    }
}
