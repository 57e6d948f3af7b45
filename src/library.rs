//! Directory scanning into [`Track`](crate::track::Track) values.

mod scan;

pub use scan::scan;
