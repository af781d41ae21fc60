//! Output formatting tests for validate command.

#[cfg(test)]
mod tests {
    use super::super::execute::{EntitySummary, ValidateResult};
    use rstest::{fixture, rstest};

    const TABLE: &str = "\
Schema OK: schema.json

Entities (2):
  City (cities): 2 attributes, 1 searchable, 0 belongs-to, 1 has-many
  User (users): 3 attributes, 1 searchable, 1 belongs-to, 0 has-many";

    const EMPTY_TABLE: &str = "\
Schema OK: empty.json

Entities: none";

    #[fixture]
    fn result() -> ValidateResult {
        ValidateResult {
            schema: "schema.json".to_string(),
            entities: vec![
                EntitySummary {
                    name: "City".to_string(),
                    table: "cities".to_string(),
                    attributes: 2,
                    searchable: 1,
                    belongs_to: 0,
                    has_many: 1,
                },
                EntitySummary {
                    name: "User".to_string(),
                    table: "users".to_string(),
                    attributes: 3,
                    searchable: 1,
                    belongs_to: 1,
                    has_many: 0,
                },
            ],
        }
    }

    #[fixture]
    fn empty_result() -> ValidateResult {
        ValidateResult {
            schema: "empty.json".to_string(),
            entities: vec![],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: result,
        fixture_type: ValidateResult,
        expected: TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: ValidateResult,
        expected: EMPTY_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: result,
        fixture_type: ValidateResult,
        assertions: {
            "schema": "schema.json",
        },
    }

    #[rstest]
    fn test_format_json_entities(result: ValidateResult) {
        use crate::output::{OutputFormat, Outputable};
        let parsed: serde_json::Value =
            serde_json::from_str(&result.format(OutputFormat::Json)).unwrap();
        assert_eq!(parsed["entities"][1]["name"], "User");
        assert_eq!(parsed["entities"][1]["belongs_to"], 1);
    }
}
