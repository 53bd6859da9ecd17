pub mod alert;
pub mod matcher;
pub mod policy;

pub use alert::*;
pub use matcher::*;
pub use policy::*;
