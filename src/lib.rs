//! Tools for analysing the result files of a multi-objective evolutionary algorithm (MOEA)
//! parameter sensitivity study.
//!
//! Each run of the study writes a "sets" file: blocks of candidate solutions separated by `#`
//! boundary lines, one block per snapshot of the run. An external evaluator turns each file
//! into one metrics row per solution set, but silently skips sets that contain no solutions,
//! which would desynchronise set indices across seeds. This crate provides the pieces that
//! close that gap and consume the results:
//!
//! - [`sets`] scans sets streams for empty sets ([`sets::SetScanner`]), strips decision
//!   variables before evaluation ([`sets::SetReducer`]) and collects per-objective extremes
//!   ([`sets::scan_extremes`]).
//! - [`aggregate`] merges per-seed evaluator output into one seed-tagged table, re-inserting a
//!   placeholder row for every empty set ([`aggregate::append_seed`],
//!   [`aggregate::aggregate_to_file`]).
//! - [`stats`] parses aggregate tables and computes grouped summary statistics
//!   ([`stats::AggregateTable`], [`stats::Statistic`]).
//! - [`sensitivity`] tabulates the text reports of the external Sobol' analysis tool
//!   ([`sensitivity::read_report`]).
//!
//! Invoking the external evaluator and analysis tools is out of scope; this crate only reads
//! what they write.
pub mod aggregate;
pub mod core;
pub mod sensitivity;
pub mod sets;
pub mod stats;
