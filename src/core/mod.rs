pub mod corpus;
pub mod engine;
pub mod frequency;
pub mod ranking;
pub mod scorer;
pub mod types;
