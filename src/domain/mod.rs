// Domain layer: catalog models and ports (interfaces). No dependencies on the pattern modules.

pub mod model;
pub mod ports;
