use super::text::TextField;

/// Rows provisioned when a todo list opens. There is no "add row" action.
pub const INITIAL_TODO_ROWS: usize = 8;
pub const TODO_PLACEHOLDER: &str = "Add a todo…";

/// One checkbox row
#[derive(Debug, Clone, Default)]
pub struct TodoItem {
    pub checked: bool,
    pub text: TextField,
    /// Hint shown while the row is empty
    pub placeholder: Option<String>,
}

impl TodoItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(hint: &str) -> Self {
        Self {
            placeholder: Some(hint.to_string()),
            ..Self::default()
        }
    }

    /// Flip the checkbox. Checked rows render struck through.
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    pub fn is_struck_through(&self) -> bool {
        self.checked
    }
}

/// The in-memory rows of a todo window (not persisted)
#[derive(Debug, Clone)]
pub struct TodoList {
    pub items: Vec<TodoItem>,
}

impl TodoList {
    /// Fixed initial rows, first one carrying the placeholder hint
    pub fn initial() -> Self {
        let items = (0..INITIAL_TODO_ROWS)
            .map(|i| {
                if i == 0 {
                    TodoItem::with_placeholder(TODO_PLACEHOLDER)
                } else {
                    TodoItem::new()
                }
            })
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }
}
