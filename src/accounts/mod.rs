pub mod directory;
pub mod policy;

pub use directory::{Account, AccountDirectory};
pub use policy::{can_remediate, ACCESS_DENIED_MESSAGE};
