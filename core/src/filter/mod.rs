pub mod evaluate;
pub mod messages;
pub mod outcome;
pub mod signals;
mod vocabulary;

pub use evaluate::QueryGate;
pub use messages::{
    compose_rejection, ComposedRejection, OFF_DOMAIN_MESSAGE, REJECTED_ERROR_MESSAGE,
    SAFETY_BLOCKED_MESSAGE,
};
pub use outcome::{AdmissionOutcome, ClassificationSignal, SignalCategory};
pub use signals::{KeywordSet, PatternSet};
