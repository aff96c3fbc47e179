//! Application use cases (body conversion orchestration).

mod convert_body;
mod switch_representation;

pub use convert_body::*;
pub use switch_representation::*;
