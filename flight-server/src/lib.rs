//! Flight planner server.
//!
//! A web service that answers: "given these flights, leaving no earlier
//! than this time, what is the earliest I can reach my destination?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod logging;
pub mod planner;
pub mod web;
