//! Generated file definitions.

mod deepcopy_go;

pub use deepcopy_go::DeepCopyGo;
