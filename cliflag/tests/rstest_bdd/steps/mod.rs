//! Step implementations grouped by feature.

mod help_steps;
mod normalization_steps;
