//! Service layer providing the CRUD operations of each record service.
//! - Separates business logic from data access.
//! - Reuses validation and record definitions in `models` crate.
//! - Every mutation is a whole-collection load, change and save under one lock.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod services;
#[cfg(test)]
pub mod test_support;
