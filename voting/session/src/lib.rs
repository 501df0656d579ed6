mod session;
mod state;

pub use {session::*, state::*};
