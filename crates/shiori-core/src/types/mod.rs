pub mod outcome;
pub mod phase;
pub mod record;

pub use outcome::{NOT_FOUND_MESSAGE, Outcome, Recommendation};
pub use phase::{SearchBy, SearchPhase};
pub use record::{RawRecord, Record};
