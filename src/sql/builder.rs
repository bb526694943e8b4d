//! Builds parameterized statements against the `todo` table.

/// Table DDL, run once at startup.
pub const CREATE_TODO_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS todo (id INTEGER NOT NULL PRIMARY KEY, name TEXT, completed BOOLEAN)";

/// `completed` is coalesced so rows written by other tools with NULL still decode.
const SELECT_COLUMNS: &str = "id, name, COALESCE(completed, 0) AS completed";

pub const INSERT_TODO: &str = "INSERT INTO todo (id, name, completed) VALUES (?, ?, ?)";
pub const UPDATE_TODO: &str = "UPDATE todo SET name = ?, completed = ? WHERE id = ?";
pub const DELETE_TODO: &str = "DELETE FROM todo WHERE id = ?";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<i64>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: i64) -> &'static str {
        self.params.push(v);
        "?"
    }
}

/// SELECT every row, ordered by id.
pub fn select_all() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM todo ORDER BY id", SELECT_COLUMNS);
    q
}

/// SELECT rows whose id is in `ids`, one placeholder per id. Empty `ids` selects every row.
pub fn select_by_ids(ids: &[i64]) -> QueryBuf {
    if ids.is_empty() {
        return select_all();
    }
    let mut q = QueryBuf::new();
    let placeholders: Vec<&str> = ids.iter().map(|id| q.push_param(*id)).collect();
    q.sql = format!(
        "SELECT {} FROM todo WHERE id IN ({}) ORDER BY id",
        SELECT_COLUMNS,
        placeholders.join(", ")
    );
    q
}
