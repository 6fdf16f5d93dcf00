//! 经验分布模块

pub mod ecdf;

pub use ecdf::{ConfidenceBand, EmpiricalCdf};
