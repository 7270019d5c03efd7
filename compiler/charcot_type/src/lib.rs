// Type tables shared by the analyzer and the code generator: IR value types,
// clinical record layouts and the runtime intrinsic signatures.
pub mod domain;
pub mod intrinsics;
pub mod types;

pub use domain::*;
pub use intrinsics::*;
pub use types::*;
