pub mod average;
pub mod generation;

pub use average::{Average, AverageList, UserList, ALL_USERS};
pub use generation::{GenerationDetailsQuery, GenerationEvent, GenerationList};
