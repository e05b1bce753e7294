pub mod cars;
pub mod mysql;
pub mod session;

pub use mysql::{create_lazy_pool, create_pool};
pub use session::{DbSession, SessionOptions};
