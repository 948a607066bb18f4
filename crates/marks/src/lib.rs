pub mod mark;
pub mod memory;
pub mod session;
pub mod store;

pub use mark::*;
pub use memory::*;
pub use session::*;
pub use store::*;
