use sqlite_accessor::StatementKind;

#[test]
fn test_leading_keyword() {
    assert_eq!(StatementKind::classify("SELECT * FROM banks"), StatementKind::Select);
    assert_eq!(StatementKind::classify("values (1), (2)"), StatementKind::Select);
    assert_eq!(StatementKind::classify("insert into banks(name) values ('x')"), StatementKind::Insert);
    assert_eq!(StatementKind::classify("REPLACE INTO banks(id, name) VALUES (1, 'x')"), StatementKind::Insert);
    assert_eq!(StatementKind::classify("Update banks SET name = 'y'"), StatementKind::Update);
    assert_eq!(StatementKind::classify("DELETE FROM banks"), StatementKind::Delete);
    assert_eq!(StatementKind::classify("CREATE TABLE t (a)"), StatementKind::Ddl);
    assert_eq!(StatementKind::classify("drop index idx"), StatementKind::Ddl);
    assert_eq!(StatementKind::classify("ALTER TABLE t ADD COLUMN b"), StatementKind::Ddl);
    assert_eq!(StatementKind::classify("PRAGMA user_version = 3"), StatementKind::Other);
    assert_eq!(StatementKind::classify(""), StatementKind::Other);
    assert_eq!(StatementKind::classify("   ;"), StatementKind::Other);
}

#[test]
fn test_comments_are_skipped() {
    let sql = "-- seed data\n/* bulk\n load */ INSERT INTO banks(name) VALUES ('x')";
    assert_eq!(StatementKind::classify(sql), StatementKind::Insert);
}

#[test]
fn test_with_clause_resolves_main_statement() {
    let sql = "WITH RECURSIVE closed(id) AS (SELECT id FROM banks WHERE closed IS NOT NULL) \
               DELETE FROM banks WHERE id IN closed";
    assert_eq!(StatementKind::classify(sql), StatementKind::Delete);

    let sql = "WITH a AS (SELECT 1), b AS (SELECT 2) UPDATE banks SET name = 'z'";
    assert_eq!(StatementKind::classify(sql), StatementKind::Update);

    let sql = "WITH \"insert\" AS (SELECT 1) SELECT * FROM \"insert\"";
    assert_eq!(StatementKind::classify(sql), StatementKind::Select);
}

#[test]
fn test_cte_names_are_not_keywords() {
    let sql = "WITH replace AS (SELECT 1) UPDATE t SET n = 1";
    assert_eq!(StatementKind::classify(sql), StatementKind::Update);

    let sql = "WITH select(a, b) AS (VALUES (1, 2)), insert AS (SELECT a FROM select) DELETE FROM t";
    assert_eq!(StatementKind::classify(sql), StatementKind::Delete);

    let sql = "WITH delete AS NOT MATERIALIZED (SELECT 1) SELECT * FROM delete";
    assert_eq!(StatementKind::classify(sql), StatementKind::Select);

    assert_eq!(StatementKind::classify("WITH replace AS (SELECT 1)"), StatementKind::Other);
}

#[test]
fn test_literals_do_not_leak_keywords() {
    let sql = "WITH x AS (SELECT 'it''s a DELETE') INSERT INTO log SELECT * FROM x";
    assert_eq!(StatementKind::classify(sql), StatementKind::Insert);

    let sql = "WITH [update] AS (SELECT 1) SELECT * FROM [update]";
    assert_eq!(StatementKind::classify(sql), StatementKind::Select);
}

#[test]
fn test_is_dml() {
    assert!(StatementKind::Insert.is_dml());
    assert!(StatementKind::Update.is_dml());
    assert!(StatementKind::Delete.is_dml());
    assert!(!StatementKind::Select.is_dml());
    assert!(!StatementKind::Ddl.is_dml());
    assert!(!StatementKind::Other.is_dml());
}
