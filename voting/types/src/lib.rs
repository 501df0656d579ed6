mod choice;
mod error;
mod format;
mod input;
mod proposal;

pub use {choice::*, error::*, format::*, input::*, proposal::*};

// -------------------------------- re-exports ---------------------------------

pub use alloy::primitives::{Address, TxHash};
