// Guidance flows: one module per family, each declaring its prompt, input
// checks and output contract. Dispatch behaviour is shared (see dispatch/).
// Routes live in handlers.rs.

pub mod assessment;
pub mod careers;
pub mod degree;
pub mod handlers;
pub mod prompts;
pub mod resume;
pub mod roadmap;
pub mod skill_gap;
pub mod stream;
