pub mod bounds;
pub mod intersection;
pub mod math;
pub mod rect;
pub mod viewport;

// Foundation crate: small, well-tested geometry primitives only.
pub use bounds::*;
pub use intersection::*;
pub use rect::*;
pub use viewport::*;
