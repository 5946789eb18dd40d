pub mod forward_call;
pub mod on_create;

pub use forward_call::*;
pub use on_create::*;
