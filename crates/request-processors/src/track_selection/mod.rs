mod action_payload;
pub use action_payload::*;

mod traits;
pub use traits::*;

mod types;
pub use types::*;

mod processor;
pub use processor::*;
