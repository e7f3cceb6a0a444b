pub mod companion;
pub mod interrupt;

pub use companion::{run_with_companion, IsAlive};
pub use interrupt::Interrupt;
