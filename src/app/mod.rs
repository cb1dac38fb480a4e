// Presentation: projections of a session for the CLI. Never a source of state.

pub mod report;
