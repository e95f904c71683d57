mod account;
mod expense;
mod money;

pub use account::*;
pub use expense::*;
pub use money::*;
