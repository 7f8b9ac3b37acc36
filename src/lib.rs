//! Earthquake counts per city above a live magnitude threshold.
//!
//! The dataset is loaded and cleaned once ([`data`]), then every slider move
//! runs [`data::aggregate::count_by_city`] against the immutable table and
//! turns the ranking into a [`chart::ChartSpec`].  The desktop window and
//! the [`web`] router both render from that spec.

pub mod chart;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod web;
