//! SpeedMED — clinic scheduling and records backend.
//!
//! HTTP JSON API over a SQLite database: patients, physicians,
//! appointments, consultations, reschedules, referrals and reporting
//! views. One router per resource, one connection per request;
//! multi-statement writes run in a single transaction.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
