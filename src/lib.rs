//! Prints a GitHub user's recent public activity.
//!
//! The run is a straight pipeline: [`fetch`] retrieves the first page
//! of a user's events, [`format`] turns each [`event::Event`] into a
//! line of text, and [`commands`] ties both to the command line.

pub mod commands;
pub mod event;
pub mod fetch;
pub mod format;
