mod material;

pub use material::*;
