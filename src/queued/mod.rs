mod repository;

pub use repository::{Queueable, QueuedRepository, ReadOpts, Unlock};
