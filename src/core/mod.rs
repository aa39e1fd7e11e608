pub mod clock;
pub mod input_adapter;
pub mod timer;

pub use clock::Clock;
pub use input_adapter::WinitInput;
pub use timer::{Accumulator, EveryNTicks};
