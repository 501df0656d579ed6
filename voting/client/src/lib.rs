mod contract;
mod facade;
mod gateway;
mod identity;
mod wallet;

pub use {contract::*, facade::*, gateway::*, identity::*, wallet::*};

// ---------------------------------- testing ----------------------------------

pub mod testing;
