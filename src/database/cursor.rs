use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};

use crate::models::ModelError;

/// Read-only handle over one row of a relational result set
///
/// Model constructors hydrate from any cursor, so rows coming from SQLite and
/// hand-built rows in tests go through the same path.
pub trait Cursor {
    /// Index of the named column, or `None` when the row does not carry it
    fn column_index(&self, name: &str) -> Option<usize>;

    /// Text value at `index`; SQL NULL reads as `None`
    fn get_string(&self, index: usize) -> Result<Option<String>, ModelError>;

    /// Integer value at `index`; SQL NULL reads as 0
    fn get_int(&self, index: usize) -> Result<i64, ModelError>;
}

impl Cursor for SqliteRow {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|column| column.name() == name)
    }

    fn get_string(&self, index: usize) -> Result<Option<String>, ModelError> {
        // Unchecked so INTEGER cells read as their text form
        Ok(self.try_get_unchecked::<Option<String>, _>(index)?)
    }

    fn get_int(&self, index: usize) -> Result<i64, ModelError> {
        Ok(self.try_get_unchecked::<Option<i64>, _>(index)?.unwrap_or(0))
    }
}

/// Row built in memory, for exercising cursor hydration without a database
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryCursor {
    columns: Vec<(String, MemoryCell)>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) enum MemoryCell {
    Text(Option<String>),
    Int(i64),
}

#[cfg(test)]
impl MemoryCursor {
    pub(crate) fn text(mut self, name: &str, value: Option<&str>) -> Self {
        self.columns
            .push((name.to_string(), MemoryCell::Text(value.map(str::to_string))));
        self
    }

    pub(crate) fn int(mut self, name: &str, value: i64) -> Self {
        self.columns.push((name.to_string(), MemoryCell::Int(value)));
        self
    }
}

#[cfg(test)]
impl Cursor for MemoryCursor {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(column, _)| column == name)
    }

    fn get_string(&self, index: usize) -> Result<Option<String>, ModelError> {
        match &self.columns[index].1 {
            MemoryCell::Text(value) => Ok(value.clone()),
            MemoryCell::Int(value) => Ok(Some(value.to_string())),
        }
    }

    fn get_int(&self, index: usize) -> Result<i64, ModelError> {
        match &self.columns[index].1 {
            MemoryCell::Int(value) => Ok(*value),
            MemoryCell::Text(None) => Ok(0),
            MemoryCell::Text(Some(value)) => value
                .parse()
                .map_err(|_| ModelError::ParseError(format!("{} is not an integer", value))),
        }
    }
}
