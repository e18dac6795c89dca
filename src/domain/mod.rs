// Domain layer: run models and the solver port. No filesystem or process access here.

pub mod model;
pub mod ports;
