pub mod note_flow;

pub use note_flow::{NoteFlow, NoteOutcome, PublishedNote};
