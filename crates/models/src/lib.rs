//! Record types for the five services together with their construction-time
//! validation and normalization rules.
//!
//! Every `*Input` type is what a request body deserializes into; calling
//! `validate()` on it yields the normalized record that gets stored.

pub mod errors;
pub mod normalize;
pub mod application;
pub mod product;
pub mod cart;
pub mod note;
pub mod contact;
pub mod student;

#[cfg(test)]
mod tests;
