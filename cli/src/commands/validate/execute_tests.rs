//! Execute tests for validate command.

#[cfg(test)]
mod tests {
    use super::super::ValidateCmd;
    use rstest::rstest;

    crate::execute_test! {
        test_name: test_validate_lists_entities_in_order,
        dialect: MySql,
        cmd: ValidateCmd {},
        assertions: |result| {
            assert_eq!(result.schema, "shop.json");
            let names: Vec<_> = result.entities.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["User", "City", "Order", "Product", "Supplier"]);
        },
    }

    crate::execute_test! {
        test_name: test_validate_counts,
        dialect: MySql,
        cmd: ValidateCmd {},
        assertions: |result| {
            let user = &result.entities[0];
            assert_eq!(user.table, "users");
            assert_eq!(user.attributes, 6);
            // id and city_id are keys
            assert_eq!(user.searchable, 4);
            assert_eq!(user.belongs_to, 1);
            assert_eq!(user.has_many, 1);

            let product = &result.entities[3];
            assert_eq!(product.belongs_to, 2);
            assert_eq!(product.searchable, 2);
        },
    }
}
