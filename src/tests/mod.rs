#![warn(clippy::all, clippy::pedantic)]

pub mod render_tests;
pub mod systems_tests;

pub mod test_utils;
