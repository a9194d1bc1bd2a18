//! Shared-expense splits: share calculation, storage and settlement.

pub mod calculation;
pub mod error;
pub mod service;
pub mod store;
pub mod types;


pub use calculation::ShareCalculator;
pub use error::SplitError;
pub use service::SplitService;
pub use store::{InMemorySplitStore, SplitStore};
pub use types::{
    CreateSplitInput, NewSplit, Participant, ParticipantInput, Split, SplitStrategy,
    SplitSummary,
};
