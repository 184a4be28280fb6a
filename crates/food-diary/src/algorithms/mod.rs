//! Algorithms module for the Food Diary
//!
//! Contains:
//! - Half-open time windows
//! - Two-week bucket counts
//! - N-day calorie average

pub mod windows;

pub use windows::{average_calories, entries_in_last_two_weeks, Window};
