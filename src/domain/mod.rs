// Domain layer: response/outcome models and ports (interfaces) to the transport.

pub mod model;
pub mod ports;
