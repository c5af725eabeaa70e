//! Tests for the SQL statement builders
//! Run with: cargo test --test builders_test

use sqlite_kit::{
    Column, CreateTable, Delete, DropTable, Error, Insert, JoinType, QueryBuilder, Select,
    SqliteType, Update,
};

mod select_tests {
    use super::*;

    #[test]
    fn test_documented_example() {
        let sql = Select::new()
            .columns(["id", "name"])
            .table_name("users")
            .where_clause("id = 1")
            .build()
            .unwrap();
        assert_eq!(sql, "SELECT id,name FROM users WHERE id = 1;");
    }

    #[test]
    fn test_shape_of_valid_selects() {
        let variants = vec![
            Select::new().column("*").table_name("t"),
            Select::new().column("a").table_name("t").distinct(),
            Select::new().columns(["a", "b"]).table_name("t").limit(3),
            Select::new()
                .column("a")
                .table_name("t")
                .add_join(JoinType::Cross, "u", "t.id", "u.id")
                .where_clause("a > 1")
                .order_by("a"),
            Select::new().column("a").table_name("t").where_clause("").order_by(""),
        ];
        for select in variants {
            let sql = select.build().unwrap();
            assert!(sql.starts_with("SELECT "), "{}", sql);
            assert_eq!(sql.matches(" FROM ").count(), 1, "{}", sql);
            assert!(sql.ends_with(';'), "{}", sql);
            assert!(!sql.ends_with(" ;") && !sql.ends_with(",;"), "{}", sql);
        }
    }

    #[test]
    fn test_missing_columns() {
        assert!(matches!(
            Select::new().table_name("t").build(),
            Err(Error::MalformedQuery(_))
        ));
        assert!(matches!(
            Select::new().columns(Vec::<String>::new()).table_name("t").build(),
            Err(Error::MalformedQuery(_))
        ));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let base = Select::new().column("id").table_name("users");
        let filtered = base.duplicate().where_clause("id > 5").limit(2);

        assert_eq!(base.build().unwrap(), "SELECT id FROM users;");
        assert_eq!(
            filtered.build().unwrap(),
            "SELECT id FROM users WHERE id > 5 LIMIT 2;"
        );

        let base = base.add_raw_join("INNER JOIN orders ON orders.user_id = users.id");
        assert_eq!(
            filtered.build().unwrap(),
            "SELECT id FROM users WHERE id > 5 LIMIT 2;"
        );
        assert!(base.build().unwrap().contains("INNER JOIN orders"));
    }
}

mod create_table_tests {
    use super::*;

    #[test]
    fn test_documented_example() {
        let sql = CreateTable::new()
            .table_name("t")
            .add_column(Column::new().name("id").data_type("INTEGER").primary_key())
            .build()
            .unwrap();
        assert_eq!(sql, "CREATE TABLE t (id INTEGER PRIMARY KEY);");
    }

    #[test]
    fn test_no_comma_before_closing_paren() {
        let sql = CreateTable::new()
            .table_name("t")
            .add_column(Column::new().name("a").data_type(SqliteType::Integer))
            .add_column(Column::new().name("b").data_type(SqliteType::Text))
            .add_column(Column::new().name("c").data_type(SqliteType::Real))
            .build()
            .unwrap();
        assert_eq!(sql, "CREATE TABLE t (a INTEGER,b TEXT,c REAL);");
        assert!(!sql.contains(",)"));
        assert!(!sql.contains(",;"));
    }

    #[test]
    fn test_missing_fields() {
        let column = Column::new().name("id").data_type("INTEGER");
        assert!(matches!(
            CreateTable::new().add_column(column).build(),
            Err(Error::MalformedQuery(_))
        ));
        assert!(matches!(
            CreateTable::new().table_name("t").build(),
            Err(Error::MalformedQuery(_))
        ));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let base = CreateTable::new()
            .table_name("t")
            .add_column(Column::new().name("id").data_type("INTEGER"));
        let extended = base
            .duplicate()
            .if_not_exists()
            .add_column(Column::new().name("name").data_type("TEXT"));

        assert_eq!(base.build().unwrap(), "CREATE TABLE t (id INTEGER);");
        assert_eq!(
            extended.build().unwrap(),
            "CREATE TABLE IF NOT EXISTS t (id INTEGER,name TEXT);"
        );
    }
}

mod column_tests {
    use super::*;

    #[test]
    fn test_duplicate_is_independent() {
        let base = Column::new().name("score").data_type(SqliteType::Real);
        let copy = base.duplicate().default_value(1.5).not_null();
        let base = base.primary_key().data_type(SqliteType::Integer);

        assert_eq!(base.build().unwrap(), "score INTEGER PRIMARY KEY,");
        assert_eq!(copy.build().unwrap(), "score REAL DEFAULT 1.5 NOT NULL,");
    }

    #[test]
    fn test_non_finite_defaults_stay_valid_sql() {
        let nan = Column::new().name("r").data_type("REAL").default_value(f64::NAN);
        assert_eq!(nan.build().unwrap(), "r REAL DEFAULT NULL,");

        let inf = Column::new().name("r").data_type("REAL").default_value(f64::NEG_INFINITY);
        assert_eq!(inf.build().unwrap(), "r REAL DEFAULT -9e999,");
    }
}

mod insert_tests {
    use super::*;

    #[test]
    fn test_documented_example() {
        let sql = Insert::new()
            .table_name("t")
            .add_value("x", 5)
            .add_value("y", "hi")
            .build()
            .unwrap();
        assert_eq!(sql, "INSERT INTO t (x,y) VALUES (5,\"hi\");");
    }

    #[test]
    fn test_order_and_overwrite() {
        let sql = Insert::new()
            .table_name("t")
            .add_value("c", 3)
            .add_value("a", 1)
            .add_value("b", 2)
            .add_value("a", 10)
            .build()
            .unwrap();
        assert_eq!(sql, "INSERT INTO t (c,a,b) VALUES (3,10,2);");
        assert_eq!(sql.matches("a").count(), 1);
    }

    #[test]
    fn test_numeric_kinds() {
        let sql = Insert::new()
            .table_name("t")
            .add_value("small", 3_i16)
            .add_value("big", 9_000_000_000_i64)
            .add_value("ratio", 0.25_f32)
            .add_value("flag", true)
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO t (small,big,ratio,flag) VALUES (3,9000000000,0.25,1);"
        );
    }

    #[test]
    fn test_duplicate_is_independent() {
        let base = Insert::new().table_name("t").add_prepared_value("a");
        let copy = base.duplicate().add_value("b", 2);
        let base = base.add_value("a", 1);

        assert_eq!(base.build().unwrap(), "INSERT INTO t (a) VALUES (1);");
        assert_eq!(copy.build().unwrap(), "INSERT INTO t (a,b) VALUES (?,2);");
    }
}

mod update_delete_drop_tests {
    use super::*;

    #[test]
    fn test_update() {
        let sql = Update::new()
            .table_name("t")
            .add_value("name", "x")
            .add_prepared_value("n")
            .where_clause("id = ?")
            .build()
            .unwrap();
        assert_eq!(sql, "UPDATE t SET name = \"x\",n = ? WHERE id = ?;");
    }

    #[test]
    fn test_update_requires_values() {
        assert!(matches!(
            Update::new().table_name("t").build(),
            Err(Error::MalformedQuery(_))
        ));
        assert!(matches!(
            Update::new().add_value("a", 1).build(),
            Err(Error::MalformedQuery(_))
        ));
    }

    #[test]
    fn test_update_duplicate_is_independent() {
        let base = Update::new().table_name("t").add_value("a", 1);
        let copy = base.duplicate().add_value("a", 2).where_clause("id = 1");
        let base = base.add_prepared_value("b").limit(3);

        assert_eq!(base.build().unwrap(), "UPDATE t SET a = 1,b = ? LIMIT 3;");
        assert_eq!(copy.build().unwrap(), "UPDATE t SET a = 2 WHERE id = 1;");
    }

    #[test]
    fn test_delete() {
        assert_eq!(
            Delete::new().table_name("t").limit(2).build().unwrap(),
            "DELETE FROM t LIMIT 2;"
        );
        let base = Delete::new().table_name("t");
        let narrowed = base.duplicate().where_clause("id = 3");
        assert_eq!(base.build().unwrap(), "DELETE FROM t;");
        assert_eq!(narrowed.build().unwrap(), "DELETE FROM t WHERE id = 3;");
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(
            DropTable::new().table_name("t").set_if_exists(true).build().unwrap(),
            "DROP TABLE IF EXISTS t;"
        );
        assert!(matches!(
            DropTable::new().build(),
            Err(Error::MalformedQuery(cause)) if cause.contains("table name")
        ));
    }

    #[test]
    fn test_drop_table_duplicate_is_independent() {
        let base = DropTable::new().table_name("t");
        let copy = base.duplicate().if_exists();
        let base = base.table_name("u");

        assert_eq!(base.build().unwrap(), "DROP TABLE u;");
        assert_eq!(copy.build().unwrap(), "DROP TABLE IF EXISTS t;");
    }
}
