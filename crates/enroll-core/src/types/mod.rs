mod envelope;
mod enrollment;
mod identity;
mod profile;

pub use envelope::*;
pub use enrollment::*;
pub use identity::*;
pub use profile::*;
