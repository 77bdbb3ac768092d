//! trip-scheduler: collect per-day trip availability and rank the best 4-day windows.
//! Hexagonal layout: domain <- ports <- usecases, with adapters at the edge.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
