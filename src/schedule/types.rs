use std::collections::VecDeque;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The week is always Monday through Friday.
pub const DAYS: usize = 5;

/// Working window of the week: the same `start_hour..end_hour` range applies
/// to every day. Hourly slots are numbered day-major, so slot `i` lives on
/// day `i / hours_per_day` at hour offset `i % hours_per_day`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl ScheduleWindow {
    pub fn hours_per_day(&self) -> usize {
        (self.end_hour - self.start_hour) as usize
    }

    pub fn total_slots(&self) -> usize {
        self.hours_per_day() * DAYS
    }

    /// Length of a half-hour availability string covering the whole week.
    pub fn half_slot_count(&self) -> usize {
        self.total_slots() * 2
    }

    pub fn day_of(&self, slot: usize) -> usize {
        slot / self.hours_per_day()
    }

    pub fn hour_offset_of(&self, slot: usize) -> usize {
        slot % self.hours_per_day()
    }
}

/// Global knobs for one optimization run. Quotas apply uniformly to every
/// participant; when `max_hours_per_participant` is absent the engine
/// fair-splits the week's capacity instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeOptions {
    pub participants_per_slot: usize,
    pub min_hours_per_participant: Option<u32>,
    pub max_hours_per_participant: Option<u32>,
    pub consider_lecture_gap: bool,
    pub apply_travel_time_buffer: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        OptimizeOptions {
            participants_per_slot: 1,
            min_hours_per_participant: None,
            max_hours_per_participant: None,
            consider_lecture_gap: false,
            apply_travel_time_buffer: false,
        }
    }
}

/// One participant as submitted by the caller: a name and a half-hour
/// resolution availability string ('1' = free), length `total_slots * 2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRequest {
    pub name: String,
    pub bits: String,
}

/// A maximal run of contiguous available hourly slots within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub len: usize,
}

/// Per-participant working state inside one optimization call. Built fresh
/// from the request every run; nothing survives across calls.
#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub min_quota: usize,
    pub max_quota: usize,
    pub slot_bits: Vec<bool>,
    pub scores: Vec<i32>,
    pub segments: VecDeque<Segment>,
    pub assigned: usize,
}

/// One participant occupying one hourly slot of the final schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub day: usize,
    pub hour_offset: usize,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub participant: String,
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("schedule window is invalid: start hour {start} and end hour {end} must satisfy 0 <= start < end <= 24")]
    InvalidWindow { start: u32, end: u32 },

    #[error("participants per slot must be at least 1")]
    InvalidCapacity,

    #[error("max hours per participant ({max}) is below min hours ({min})")]
    QuotaRange { min: u32, max: u32 },

    #[error("duplicate participant name: {0}")]
    DuplicateParticipant(String),

    #[error("availability for {name} has length {got}, expected {expected}")]
    BitmaskLength {
        name: String,
        got: usize,
        expected: usize,
    },

    #[error("availability for {name} contains characters other than '0' and '1'")]
    BitmaskCharacter { name: String },

    #[error("no feasible assignment: {} cannot reach the minimum hours", .0.join(", "))]
    Infeasible(Vec<String>),
}
