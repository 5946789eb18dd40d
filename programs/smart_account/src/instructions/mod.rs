pub mod admin;
pub mod common;
pub mod create_account;
pub mod deposit;
pub mod execute;
pub mod fallback;
pub mod handle_operation;
pub mod is_valid_signature;
pub mod plugins;
pub mod update_modules;

pub use admin::*;
pub use common::*;
pub use create_account::*;
pub use deposit::*;
pub use execute::*;
pub use fallback::*;
pub use handle_operation::*;
pub use is_valid_signature::*;
pub use plugins::*;
pub use update_modules::*;
