mod party_lock;

pub use party_lock::*;
