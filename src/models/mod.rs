pub mod alert;
pub mod crop;
pub mod health;
pub mod irrigation;
pub mod prediction;
pub mod sensor;

pub use alert::*;
pub use crop::*;
pub use health::*;
pub use irrigation::*;
pub use prediction::*;
pub use sensor::*;
