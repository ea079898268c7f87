// Domain layer: the parsed INI model and the ports the pipeline talks through.

pub mod model;
pub mod ports;
