//! Message resource: inputs, the persistence port and its adapters, and the
//! service that applies the business rules.

pub mod domain;
pub mod ids;
pub mod memory;
pub mod repository;
pub mod service;

pub use domain::{NewMessage, UpdateMessage};
pub use ids::{IdGenerator, SequenceIdGenerator, UuidV4Generator};
pub use memory::InMemoryMessageRepository;
pub use repository::{MessageRepository, SeaOrmMessageRepository};
pub use service::MessageService;
