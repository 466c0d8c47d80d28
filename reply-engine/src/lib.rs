pub mod engine;
pub mod selector;
pub mod state;

pub use engine::{ReplyEngine, RunOutcome};
pub use selector::{build_candidates, rank, select, Candidate};
pub use state::{PersistOutcome, ReplyState};
