pub mod lesson;
pub mod selection;
pub mod source;

pub use lesson::{color_for, Lesson, LESSON_COLORS};
pub use selection::Selection;
pub use source::{SourceDocument, SourceOrigin};
