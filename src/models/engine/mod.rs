pub mod chart;
pub mod difficulty;
pub mod hit_window;
pub mod note;
pub mod playfield;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use hit_window::HitWindow;
pub use note::{NoteCategory, NoteData, NoteId};
pub use playfield::PlayfieldConfig;
