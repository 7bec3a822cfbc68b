pub mod comparison;
pub mod errors;
pub mod gate;

pub use comparison::Inequality;
pub use errors::CircuitEvalError;
pub use gate::{Circuit, Gate};
