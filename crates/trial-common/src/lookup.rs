use std::collections::HashMap;

use polars::prelude::{Column, DataFrame};

/// Case-insensitive view over the column names of a `DataFrame`.
///
/// Source extracts are not consistent about case (`SUBJECT_ID` vs
/// `subject_id`), so lookups normalize to upper case. When two columns differ
/// only by case the first one wins.
#[derive(Debug, Clone)]
pub struct ColumnLookup {
    map: HashMap<String, String>,
}

impl ColumnLookup {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(name.to_ascii_uppercase())
                .or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    pub fn from_frame(df: &DataFrame) -> Self {
        Self::new(df.get_column_names().into_iter().map(|name| name.as_str()))
    }

    /// Actual column name for `name`, if present in any case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_uppercase())
    }

    /// Resolve `name` and borrow the matching column from `df`.
    pub fn column<'a>(&self, df: &'a DataFrame, name: &str) -> Option<&'a Column> {
        self.get(name).and_then(|actual| df.column(actual).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn resolves_names_regardless_of_case() {
        let lookup = ColumnLookup::new(["SUBJECT_ID", "dob"]);
        assert_eq!(lookup.get("subject_id"), Some("SUBJECT_ID"));
        assert_eq!(lookup.get("DOB"), Some("dob"));
        assert!(!lookup.contains("gender"));
    }

    #[test]
    fn first_spelling_wins() {
        let lookup = ColumnLookup::new(["Gender", "GENDER"]);
        assert_eq!(lookup.get("gender"), Some("Gender"));
    }

    #[test]
    fn borrows_column_from_frame() {
        let df = df! {
            "Subject_Id" => &[1i64, 2, 3],
        }
        .unwrap();
        let lookup = ColumnLookup::from_frame(&df);
        let column = lookup.column(&df, "subject_id").unwrap();
        assert_eq!(column.len(), 3);
        assert!(lookup.column(&df, "dob").is_none());
    }
}
