// Domain layer: the sample's types and the iteration capability they share.

pub mod model;
pub mod ports;
