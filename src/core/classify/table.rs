use serde_json::{Map, Value};

/// Rows and columns recovered from a JSON payload.
///
/// `index` holds one label per row: positional (`"0"`, `"1"`, ...) for
/// record and column-array layouts, or the inner keys for column-keyed
/// objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub index: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Interpret a parsed JSON value as a table, or `None` when the value
    /// has no row/column reading.
    pub fn from_value(value: &Value) -> Option<Table> {
        match value {
            Value::Array(items) => from_array(items),
            Value::Object(map) => from_object(map),
            _ => None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    fn positional(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Table {
        let index = (0..rows.len()).map(|i| i.to_string()).collect();
        Table {
            columns,
            index,
            rows,
        }
    }
}

/// Display text for a single cell: strings without quotes, `null` as blank,
/// nested values as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn push_unique(keys: &mut Vec<String>, key: &str) {
    if !keys.iter().any(|existing| existing == key) {
        keys.push(key.to_string());
    }
}

fn from_array(items: &[Value]) -> Option<Table> {
    if items.is_empty() {
        return Some(Table::positional(Vec::new(), Vec::new()));
    }

    if items.iter().all(Value::is_object) {
        let mut columns = Vec::new();
        for item in items {
            if let Value::Object(record) = item {
                for key in record.keys() {
                    push_unique(&mut columns, key);
                }
            }
        }
        let rows = items
            .iter()
            .filter_map(Value::as_object)
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        return Some(Table::positional(columns, rows));
    }

    if items.iter().all(Value::is_array) {
        let width = items
            .iter()
            .filter_map(Value::as_array)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        let columns = (0..width).map(|i| i.to_string()).collect();
        let rows = items
            .iter()
            .filter_map(Value::as_array)
            .map(|cells| {
                let mut row = cells.clone();
                row.resize(width, Value::Null);
                row
            })
            .collect();
        return Some(Table::positional(columns, rows));
    }

    if items.iter().all(is_scalar) {
        let rows = items.iter().map(|item| vec![item.clone()]).collect();
        return Some(Table::positional(vec!["0".to_string()], rows));
    }

    None
}

fn from_object(map: &Map<String, Value>) -> Option<Table> {
    if map.is_empty() {
        return Some(Table::positional(Vec::new(), Vec::new()));
    }

    let has_objects = map.values().any(Value::is_object);
    let has_arrays = map.values().any(Value::is_array);

    match (has_objects, has_arrays) {
        (true, false) => from_keyed_columns(map),
        (false, true) => from_array_columns(map),
        // Only scalars: no index to lay them out against.
        (false, false) => None,
        // Mixing keyed and positional columns has no unambiguous row order.
        (true, true) => None,
    }
}

fn from_keyed_columns(map: &Map<String, Value>) -> Option<Table> {
    let mut index = Vec::new();
    for value in map.values() {
        if let Value::Object(inner) = value {
            for key in inner.keys() {
                push_unique(&mut index, key);
            }
        }
    }

    let columns: Vec<String> = map.keys().cloned().collect();
    let rows = index
        .iter()
        .map(|label| {
            map.values()
                .map(|value| match value {
                    Value::Object(inner) => inner.get(label).cloned().unwrap_or(Value::Null),
                    scalar => scalar.clone(),
                })
                .collect()
        })
        .collect();

    Some(Table {
        columns,
        index,
        rows,
    })
}

fn from_array_columns(map: &Map<String, Value>) -> Option<Table> {
    let mut lengths = map.values().filter_map(Value::as_array).map(Vec::len);
    let height = lengths.next()?;
    if lengths.any(|len| len != height) {
        return None;
    }

    let columns: Vec<String> = map.keys().cloned().collect();
    let rows = (0..height)
        .map(|row| {
            map.values()
                .map(|value| match value {
                    Value::Array(cells) => cells[row].clone(),
                    scalar => scalar.clone(),
                })
                .collect()
        })
        .collect();

    Some(Table::positional(columns, rows))
}
