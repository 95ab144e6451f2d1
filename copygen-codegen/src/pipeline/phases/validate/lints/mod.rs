//! Built-in lints for manifest validation.

mod duplicate_interface;
mod empty_package;
mod opt_out_non_struct;

pub use duplicate_interface::DuplicateInterfaceLint;
pub use empty_package::EmptyPackageLint;
pub use opt_out_non_struct::OptOutNonStructLint;
