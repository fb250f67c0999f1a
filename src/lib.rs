//! Base-station processing for BeeMinder hive sensor captures.
//!
//! Turns a raw capture (12-byte sensor header followed by a PCM audio
//! segment) into a structured hive-health [`hive::Report`]: threshold flags
//! for temperature and humidity, plus acoustic biomarkers derived from a
//! cumulative magnitude spectrum of the recording.

pub mod hive;
