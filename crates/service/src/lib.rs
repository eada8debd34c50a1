//! Service layer for the message board.
//! - `message::repository` is the persistence port with its SeaORM adapter.
//! - `message::memory` keeps messages in process, for tests and throwaway runs.
//! - `message::service` enforces the business rules on top of a repository.

pub mod errors;
pub mod pagination;
pub mod message;
#[cfg(test)]
pub mod test_support;
