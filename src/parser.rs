use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::{Deserialize, Serialize};

use crate::schedule::{OptimizeOptions, ParticipantRequest, ScheduleWindow};

/// A full optimization request as supplied on the command line: the weekly
/// window, the global constraints and the participant availabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub start_hour: u32,
    pub end_hour: u32,
    #[serde(default = "default_capacity")]
    pub participants_per_slot: usize,
    #[serde(default)]
    pub min_hours_per_participant: Option<u32>,
    #[serde(default)]
    pub max_hours_per_participant: Option<u32>,
    #[serde(default)]
    pub consider_lecture_gap: bool,
    #[serde(default)]
    pub apply_travel_time_buffer: bool,
    #[serde(default)]
    pub participants: Vec<ParticipantRequest>,
}

fn default_capacity() -> usize {
    1
}

impl PlanRequest {
    pub fn window(&self) -> ScheduleWindow {
        ScheduleWindow {
            start_hour: self.start_hour,
            end_hour: self.end_hour,
        }
    }

    pub fn options(&self) -> OptimizeOptions {
        OptimizeOptions {
            participants_per_slot: self.participants_per_slot,
            min_hours_per_participant: self.min_hours_per_participant,
            max_hours_per_participant: self.max_hours_per_participant,
            consider_lecture_gap: self.consider_lecture_gap,
            apply_travel_time_buffer: self.apply_travel_time_buffer,
        }
    }
}

/// Loads a plan request from a JSON file.
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<PlanRequest, Box<dyn Error>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Loads participant rows from a CSV file with `name` and `availability`
/// columns.
pub fn load_participants_csv<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ParticipantRequest>, Box<dyn Error>> {
    participants_from_reader(File::open(path)?)
}

/// Reads participant rows from any CSV source. A later row for an
/// already-seen name is treated as a resubmission and replaces the earlier
/// availability; the participant keeps their original position in the list.
pub fn participants_from_reader<R: Read>(
    source: R,
) -> Result<Vec<ParticipantRequest>, Box<dyn Error>> {
    let mut reader = Reader::from_reader(source);
    let headers = reader.headers()?;
    let name_col = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("name"))
        .unwrap_or(0);
    let bits_col = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("availability"))
        .unwrap_or(1);

    let mut participants: Vec<ParticipantRequest> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in reader.records() {
        let record = record?;
        let name = record.get(name_col).unwrap_or("").trim().to_string();
        let bits = record.get(bits_col).unwrap_or("").trim().to_string();
        if name.is_empty() {
            continue;
        }

        match index.get(&name) {
            Some(&at) => participants[at].bits = bits,
            None => {
                index.insert(name.clone(), participants.len());
                participants.push(ParticipantRequest { name, bits });
            }
        }
    }

    Ok(participants)
}

/// Merges CSV rows into the request's inline participant list: rows for
/// known names override their availability, new names are appended.
pub fn merge_participants(base: &mut Vec<ParticipantRequest>, extra: Vec<ParticipantRequest>) {
    for incoming in extra {
        match base.iter_mut().find(|p| p.name == incoming.name) {
            Some(existing) => existing.bits = incoming.bits,
            None => base.push(incoming),
        }
    }
}
