//! Session state: who is signed in, whether they have a profile, and which
//! screens they may see.

mod cache;
mod gate;
mod profile;
mod store;

pub use cache::*;
pub use gate::*;
pub use profile::*;
pub use store::*;
