// Contract composition pipeline: record → Document Model → Layout Engine → Draw Instruction Stream.
// Handlers adapt HTTP requests onto the pipeline; delivery naming stays outside the core.

pub mod composer;
pub mod delivery;
pub mod handlers;
