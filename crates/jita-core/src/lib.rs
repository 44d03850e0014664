pub mod error;
pub mod preprocess;
pub mod store;

pub use error::{Error, Result};
pub use store::DataStore;
