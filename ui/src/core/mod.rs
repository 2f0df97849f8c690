//! Platform-neutral logic: dial math, aggregation, chart layout and the
//! glue the components share.

pub mod aggregate;
pub mod chart;
pub mod dial;
pub mod format;
pub mod platform;
pub mod session;
pub mod timing;
