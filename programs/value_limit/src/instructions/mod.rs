pub mod check_operation;
pub mod on_install;

pub use check_operation::*;
pub use on_install::*;
