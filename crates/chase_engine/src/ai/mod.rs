//! Agent behaviour

pub mod pursuit;

pub use pursuit::{PursuitController, PursuitStep};
