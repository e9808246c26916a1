pub mod event;
pub mod registration;

pub use event::{Event, EventPatch, NewEvent};
pub use registration::{EventRef, NewRegistration, Registration};
