use std::collections::HashMap;
use crate::core::library::{LibraryError, LibraryResult};

// SqlValue is a positional parameter value for dynamically built statements
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
}

/// Parameterized `SET` clause with the values to bind, in order.
#[derive(Debug, PartialEq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    // next_index is the placeholder number available to the caller, e.g. for the row key
    pub fn next_index(&self) -> usize {
        self.values.len() + 1
    }
}

/// Builds the `SET` clause of a partial update.
///
/// `{title: "t", pages: 3}` => `title=$1, pages=$2` with values `["t", 3]`.
/// Field names must belong to `allowed`; `aliases` maps a field to the
/// column it is stored in. Input order is preserved.
pub fn sql_for_partial_update(data: Vec<(&str, SqlValue)>,
                              allowed: &[&str],
                              aliases: &HashMap<&str, &str>) -> LibraryResult<PartialUpdate> {
    if data.is_empty() {
        return Err(LibraryError::validation("No data", None));
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.into_iter().enumerate() {
        if !allowed.contains(&field) {
            return Err(LibraryError::validation(
                format!("field '{}' cannot be updated", field).as_str(), None));
        }
        let col = aliases.get(field).copied().unwrap_or(field);
        cols.push(format!("{}=${}", col, idx + 1));
        values.push(value);
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::library::LibraryError;
    use crate::utils::sql::{sql_for_partial_update, SqlValue};

    const ALLOWED: [&str; 3] = ["first_name", "age", "title"];

    #[tokio::test]
    async fn test_should_build_set_clause_in_order() {
        let data = vec![
            ("title", SqlValue::Text("Power-Up".to_string())),
            ("age", SqlValue::Integer(32)),
        ];
        let res = sql_for_partial_update(data, &ALLOWED, &HashMap::new()).expect("should build clause");
        assert_eq!("title=$1, age=$2", res.set_cols);
        assert_eq!(vec![SqlValue::Text("Power-Up".to_string()), SqlValue::Integer(32)], res.values);
        assert_eq!(3, res.next_index());
    }

    #[tokio::test]
    async fn test_should_use_column_aliases() {
        let data = vec![
            ("first_name", SqlValue::Text("Aliya".to_string())),
            ("age", SqlValue::Integer(32)),
        ];
        let aliases = HashMap::from([("first_name", "\"firstName\"")]);
        let res = sql_for_partial_update(data, &ALLOWED, &aliases).expect("should build clause");
        assert_eq!("\"firstName\"=$1, age=$2", res.set_cols);
    }

    #[tokio::test]
    async fn test_should_reject_empty_data() {
        let res = sql_for_partial_update(vec![], &ALLOWED, &HashMap::new());
        assert_eq!(Err(LibraryError::validation("No data", None)), res);
    }

    #[tokio::test]
    async fn test_should_reject_unknown_fields() {
        let data = vec![
            ("title", SqlValue::Text("t".to_string())),
            ("isbn = 'x'; --", SqlValue::Integer(1)),
        ];
        let res = sql_for_partial_update(data, &ALLOWED, &HashMap::new());
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }
}
