mod committable;
mod entity;
mod event_record;

pub use committable::Committable;
pub use entity::Entity;
pub use event_record::{EventRecord, PayloadError};
