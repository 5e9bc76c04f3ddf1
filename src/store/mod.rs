pub mod mem;
pub mod postgres;
#[cfg(test)]
pub mod testing;
pub mod traits;

pub use mem::*;
pub use postgres::*;
pub use traits::*;
