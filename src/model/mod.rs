mod aggregate;
mod configuration;
mod entities;
mod error;
mod request;
mod response;
mod state;

pub use aggregate::*;
pub use configuration::*;
pub use entities::*;
pub use error::*;
pub use request::*;
pub use response::*;
pub use state::*;
