pub mod puzzle;
pub mod response;
pub mod stock;

pub use puzzle::*;
pub use response::*;
pub use stock::*;
