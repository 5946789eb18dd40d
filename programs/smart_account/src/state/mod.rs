mod config;
mod operation;
mod smart_account;

pub use config::*;
pub use operation::*;
pub use smart_account::*;
