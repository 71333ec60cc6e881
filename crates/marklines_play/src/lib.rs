//! Marklines Play - terminal front end for the marklines engine.
//!
//! # Architecture
//!
//! - **Settings**: TOML table of grid size, diagonal rule and seats
//! - **Seats**: line-oriented human input as a [`marklines::MoveSource`]
//! - **Render**: plain text board in numeric keypad layout
//! - **Session**: repeated rounds over one roster with a running scoreboard

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod render;
mod scoreboard;
mod seats;
mod session;
mod settings;

pub use render::{list_choices, render};
pub use scoreboard::Scoreboard;
pub use seats::{HumanSeat, ask_yes_no};
pub use session::{RoundReport, Session};
pub use settings::{COMPUTER_NAMES, SeatSettings, Settings, SettingsError};
