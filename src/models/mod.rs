pub mod protocol;
pub mod report;

pub use protocol::*;
pub use report::*;
