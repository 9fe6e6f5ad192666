pub mod geometry;
pub mod note;
pub mod text;
pub mod todo;

pub use geometry::{Point, Region, WindowGeometry};
pub use note::Note;
pub use text::TextField;
pub use todo::{TodoItem, TodoList};
