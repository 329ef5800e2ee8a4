pub mod identity;
pub mod order;
pub mod product;

pub use identity::*;
pub use order::*;
pub use product::*;
