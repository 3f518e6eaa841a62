//! Data structures shared between puzzle days

pub mod interval_set;
