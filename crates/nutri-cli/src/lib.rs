//! Library side of the `nutrimart` CLI: logging setup and the end-to-end
//! pipeline run.

pub mod logging;
pub mod pipeline;
pub mod types;
