//! Aggregation over loaded neighbourhood datasets.
//!
//! Totals and threshold filters live in [`totals`], per-neighbourhood count and
//! rate maps in [`rates`], and the join of the two datasets in [`combine`].

pub mod combine;
pub mod rates;
pub mod totals;
pub mod utility;
