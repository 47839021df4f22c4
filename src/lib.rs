//! Rat Race - Financial Board Game Session Engine
//!
//! This crate implements the server side of a turn-based financial
//! simulation: game sessions, payday math, loans, investments, and an
//! append-only event log, exposed over HTTP JSON on PostgreSQL.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
