// Resume optimization engine.
// Implements: keyword vocabulary + extraction, item scoring, per-category selection.
// Everything below `handlers` is synchronous and free of I/O.

pub mod handlers;
pub mod keywords;
pub mod optimizer;
pub mod scoring;
