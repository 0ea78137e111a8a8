//! Leave Request Tracking Engine
//!
//! This crate tracks employee leave balances and leave requests, validates
//! requests against per-type rules, drives the approval state machine and
//! persists state to flat files.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tracker;
pub mod validation;
