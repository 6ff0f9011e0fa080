//! Inner-join engine
//!
//! Hash join: the right side is indexed by key, the left side is
//! scanned in order. A left row joins every matching right row (full
//! cross product), so the output order is left order, with right
//! matches in their own table order. Null or absent keys never match.

use std::collections::HashMap;

use crate::normalizer::{NormalizedTable, Row, TableRole};
use serde_json::Value;

use super::errors::{PipelineError, PipelineResult};

/// One equality join between two tables.
#[derive(Debug, Clone)]
pub struct JoinSpec {
    /// Key column on the accumulated left side
    pub left_key: String,
    /// Key column on the reference table being joined in
    pub right_key: String,
}

impl JoinSpec {
    pub fn new(left_key: impl Into<String>, right_key: impl Into<String>) -> Self {
        Self {
            left_key: left_key.into(),
            right_key: right_key.into(),
        }
    }
}

/// The two joins that produce the final record set.
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// Registration to engine reference
    pub engine: JoinSpec,
    /// Intermediate result to airframe reference
    pub airframe: JoinSpec,
}

impl MergePlan {
    /// The aircraft-registry plan: registration joins the engine table
    /// on `eng-mfr-mdl = eng_code`, then the airframe table on
    /// `mfr-mdl-code = acft_code`.
    pub fn aircraft_registry() -> Self {
        Self {
            engine: JoinSpec::new("eng-mfr-mdl", "eng_code"),
            airframe: JoinSpec::new("mfr-mdl-code", "acft_code"),
        }
    }

    /// All key columns, dropped from the output after both joins. They
    /// only express the relationship and carry no business meaning.
    fn key_columns(&self) -> [&str; 4] {
        [
            &self.engine.left_key,
            &self.engine.right_key,
            &self.airframe.left_key,
            &self.airframe.right_key,
        ]
    }
}

/// Joins the three normalized tables into the merged record set.
pub struct MergeEngine {
    plan: MergePlan,
}

impl MergeEngine {
    pub fn new(plan: MergePlan) -> Self {
        Self { plan }
    }

    /// Produce the ordered sequence of merged records.
    ///
    /// Fails with `PipelineError` if a table is absent or lacks its
    /// join-key column; no output is produced in that case.
    pub fn merge(
        &self,
        mut tables: HashMap<TableRole, NormalizedTable>,
    ) -> PipelineResult<Vec<Row>> {
        let registration = take(&mut tables, TableRole::Registration)?;
        let engine = take(&mut tables, TableRole::Engine)?;
        let airframe = take(&mut tables, TableRole::AirframeReference)?;

        require_column(&registration, TableRole::Registration, &self.plan.engine.left_key)?;
        require_column(&engine, TableRole::Engine, &self.plan.engine.right_key)?;
        require_column(
            &registration,
            TableRole::Registration,
            &self.plan.airframe.left_key,
        )?;
        require_column(
            &airframe,
            TableRole::AirframeReference,
            &self.plan.airframe.right_key,
        )?;

        let merged = inner_join(registration.into_rows(), engine.rows(), &self.plan.engine);
        let mut merged = inner_join(merged, airframe.rows(), &self.plan.airframe);

        for row in &mut merged {
            for key in self.plan.key_columns() {
                row.remove(key);
            }
        }

        Ok(merged)
    }
}

fn take(
    tables: &mut HashMap<TableRole, NormalizedTable>,
    role: TableRole,
) -> PipelineResult<NormalizedTable> {
    tables.remove(&role).ok_or(PipelineError::MissingTable(role))
}

fn require_column(
    table: &NormalizedTable,
    role: TableRole,
    column: &str,
) -> PipelineResult<()> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(PipelineError::MissingKeyColumn {
            table: role,
            column: column.to_string(),
        })
    }
}

fn inner_join(left: Vec<Row>, right: &[Row], spec: &JoinSpec) -> Vec<Row> {
    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, row) in right.iter().enumerate() {
        if let Some(key) = string_key(row, &spec.right_key) {
            index.entry(key).or_default().push(i);
        }
    }

    let mut output = Vec::new();
    for left_row in left {
        let Some(key) = string_key(&left_row, &spec.left_key) else {
            continue;
        };
        let Some(matches) = index.get(key) else {
            continue;
        };
        for &i in matches {
            let mut merged = left_row.clone();
            for (column, value) in &right[i] {
                merged.insert(column.clone(), value.clone());
            }
            output.push(merged);
        }
    }
    output
}

fn string_key<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    match row.get(key) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn registration(rows: Vec<Row>) -> NormalizedTable {
        NormalizedTable::from_parts(
            vec![
                "n-number".to_string(),
                "eng-mfr-mdl".to_string(),
                "mfr-mdl-code".to_string(),
            ],
            rows,
        )
    }

    fn engine_table(rows: Vec<Row>) -> NormalizedTable {
        NormalizedTable::from_parts(
            vec!["eng_code".to_string(), "eng_model".to_string()],
            rows,
        )
    }

    fn airframe_table(rows: Vec<Row>) -> NormalizedTable {
        NormalizedTable::from_parts(
            vec!["acft_code".to_string(), "acft_model".to_string()],
            rows,
        )
    }

    fn all_tables() -> HashMap<TableRole, NormalizedTable> {
        let mut tables = HashMap::new();
        tables.insert(
            TableRole::Registration,
            registration(vec![row(&[
                ("n-number", json!("N12345")),
                ("eng-mfr-mdl", json!("E1")),
                ("mfr-mdl-code", json!("A1")),
            ])]),
        );
        tables.insert(
            TableRole::Engine,
            engine_table(vec![row(&[
                ("eng_code", json!("E1")),
                ("eng_model", json!("Turbo")),
            ])]),
        );
        tables.insert(
            TableRole::AirframeReference,
            airframe_table(vec![row(&[
                ("acft_code", json!("A1")),
                ("acft_model", json!("Cessna")),
            ])]),
        );
        tables
    }

    #[test]
    fn test_merge_joins_and_drops_keys() {
        let engine = MergeEngine::new(MergePlan::aircraft_registry());
        let merged = engine.merge(all_tables()).unwrap();

        assert_eq!(merged.len(), 1);
        let record = &merged[0];
        assert_eq!(record.get("n-number"), Some(&json!("N12345")));
        assert_eq!(record.get("eng_model"), Some(&json!("Turbo")));
        assert_eq!(record.get("acft_model"), Some(&json!("Cessna")));
        // Key columns exist only to express the relationship.
        assert!(record.get("eng-mfr-mdl").is_none());
        assert!(record.get("mfr-mdl-code").is_none());
        assert!(record.get("eng_code").is_none());
        assert!(record.get("acft_code").is_none());
    }

    #[test]
    fn test_unmatched_registration_rows_dropped_silently() {
        let mut tables = all_tables();
        tables.insert(
            TableRole::Registration,
            registration(vec![
                row(&[
                    ("n-number", json!("N12345")),
                    ("eng-mfr-mdl", json!("E1")),
                    ("mfr-mdl-code", json!("A1")),
                ]),
                row(&[
                    ("n-number", json!("N99999")),
                    ("eng-mfr-mdl", json!("NO-SUCH-ENGINE")),
                    ("mfr-mdl-code", json!("A1")),
                ]),
            ]),
        );

        let engine = MergeEngine::new(MergePlan::aircraft_registry());
        let merged = engine.merge(tables).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].get("n-number"), Some(&json!("N12345")));
    }

    #[test]
    fn test_multiple_matches_produce_cross_product() {
        let mut tables = all_tables();
        tables.insert(
            TableRole::Engine,
            engine_table(vec![
                row(&[("eng_code", json!("E1")), ("eng_model", json!("Turbo"))]),
                row(&[("eng_code", json!("E1")), ("eng_model", json!("Piston"))]),
            ]),
        );

        let engine = MergeEngine::new(MergePlan::aircraft_registry());
        let merged = engine.merge(tables).unwrap();

        assert_eq!(merged.len(), 2);
        // Records differ only in the engine-derived fields.
        assert_eq!(merged[0].get("eng_model"), Some(&json!("Turbo")));
        assert_eq!(merged[1].get("eng_model"), Some(&json!("Piston")));
        assert_eq!(merged[0].get("n-number"), merged[1].get("n-number"));
        assert_eq!(merged[0].get("acft_model"), merged[1].get("acft_model"));
    }

    #[test]
    fn test_left_order_preserved() {
        let mut tables = all_tables();
        tables.insert(
            TableRole::Registration,
            registration(vec![
                row(&[
                    ("n-number", json!("N3")),
                    ("eng-mfr-mdl", json!("E1")),
                    ("mfr-mdl-code", json!("A1")),
                ]),
                row(&[
                    ("n-number", json!("N1")),
                    ("eng-mfr-mdl", json!("E1")),
                    ("mfr-mdl-code", json!("A1")),
                ]),
                row(&[
                    ("n-number", json!("N2")),
                    ("eng-mfr-mdl", json!("E1")),
                    ("mfr-mdl-code", json!("A1")),
                ]),
            ]),
        );

        let engine = MergeEngine::new(MergePlan::aircraft_registry());
        let merged = engine.merge(tables).unwrap();

        let order: Vec<Value> = merged
            .iter()
            .map(|r| r.get("n-number").cloned().unwrap())
            .collect();
        assert_eq!(order, vec![json!("N3"), json!("N1"), json!("N2")]);
    }

    #[test]
    fn test_null_keys_never_match() {
        let mut tables = all_tables();
        tables.insert(
            TableRole::Registration,
            registration(vec![row(&[
                ("n-number", json!("N1")),
                ("eng-mfr-mdl", Value::Null),
                ("mfr-mdl-code", json!("A1")),
            ])]),
        );
        tables.insert(
            TableRole::Engine,
            engine_table(vec![row(&[
                ("eng_code", Value::Null),
                ("eng_model", json!("Turbo")),
            ])]),
        );

        let engine = MergeEngine::new(MergePlan::aircraft_registry());
        let merged = engine.merge(tables).unwrap();

        assert!(merged.is_empty());
    }

    #[test]
    fn test_missing_reference_table_fails() {
        let mut tables = all_tables();
        tables.remove(&TableRole::Engine);

        let engine = MergeEngine::new(MergePlan::aircraft_registry());
        let err = engine.merge(tables).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::MissingTable(TableRole::Engine)
        ));
    }

    #[test]
    fn test_missing_key_column_fails() {
        let mut tables = all_tables();
        tables.insert(
            TableRole::Engine,
            NormalizedTable::from_parts(
                vec!["eng_model".to_string()],
                vec![row(&[("eng_model", json!("Turbo"))])],
            ),
        );

        let engine = MergeEngine::new(MergePlan::aircraft_registry());
        let err = engine.merge(tables).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::MissingKeyColumn {
                table: TableRole::Engine,
                ..
            }
        ));
    }

    #[test]
    fn test_merge_is_deterministic() {
        let engine = MergeEngine::new(MergePlan::aircraft_registry());
        let first = engine.merge(all_tables()).unwrap();
        let second = engine.merge(all_tables()).unwrap();
        assert_eq!(first, second);
    }
}
