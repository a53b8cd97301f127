//! Cross-module scenario tests

mod chase_scenarios;
mod collision_scenarios;
