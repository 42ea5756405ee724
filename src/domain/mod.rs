// Domain layer: page models and the page-creation port. No I/O here.

pub mod model;
pub mod ports;
