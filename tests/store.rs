mod common;

use common::{people_config, people_store};
use serde_json::{json, Map, Value};
use sqcrud::{AppError, ConfigError, Predicate, QueryOptions, RecordStore};

fn record(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => panic!("object expected"),
    }
}

#[tokio::test]
async fn post_get_put_list_end_to_end() {
    let store = people_store().await;

    let created = store.post(record(json!({"name": "Ana", "age": 30}))).await.unwrap();
    let id = created["_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 32);
    assert_eq!(created["name"], json!("Ana"));
    assert_eq!(created["age"], json!(30));

    let filter = Predicate::from_json(&json!({"age": {">": 20}})).unwrap();
    let rows = store.list(&QueryOptions::new().filter(filter)).await.unwrap();
    assert!(rows.iter().any(|r| r["_id"] == json!(id)));

    assert!(store.put(&id, &record(json!({"age": 31}))).await.unwrap());
    let fetched = store.get(&id, None).await.unwrap().unwrap();
    assert_eq!(fetched["age"], json!(31));
    assert_eq!(fetched["name"], json!("Ana"));

    assert!(!store.put("nonexistent", &record(json!({"age": 1}))).await.unwrap());
}

#[tokio::test]
async fn post_keeps_caller_id_and_round_trips() {
    let store = people_store().await;
    let created = store
        .post(record(json!({"_id": "p-1", "name": "O'Hara", "age": 44})))
        .await
        .unwrap();
    assert_eq!(created["_id"], json!("p-1"));

    let fetched = store.get("p-1", None).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn post_replaces_falsy_ids() {
    let store = people_store().await;
    for falsy in [json!(null), json!(""), json!(0), json!(false)] {
        let created = store
            .post(record(json!({"_id": falsy.clone(), "name": "F"})))
            .await
            .unwrap();
        assert_eq!(created["_id"].as_str().map(str::len), Some(32), "for {falsy}");
    }
    assert_eq!(store.count(None).await.unwrap().count, 4);
}

#[tokio::test]
async fn post_rejects_single_field_body() {
    let store = people_store().await;
    // Only the generated `_id` matches the schema.
    let err = store.post(record(json!({"unknown": 1}))).await.unwrap_err();
    assert!(matches!(err, AppError::NoDataToInsert));

    let err = store.post(record(json!({"_id": "solo"}))).await.unwrap_err();
    assert!(matches!(err, AppError::NoDataToInsert));
}

#[tokio::test]
async fn post_surfaces_constraint_errors() {
    let store = people_store().await;
    store.post(record(json!({"_id": "dup", "name": "A"}))).await.unwrap();

    let err = store.post(record(json!({"_id": "dup", "name": "B"}))).await.unwrap_err();
    assert!(matches!(err, AppError::Db(_)), "got {err:?}");

    // name is NOT NULL
    let err = store.post(record(json!({"_id": "x", "age": 3}))).await.unwrap_err();
    assert!(matches!(err, AppError::Db(_)), "got {err:?}");
}

#[tokio::test]
async fn get_missing_and_empty_id() {
    let store = people_store().await;
    assert_eq!(store.get("nope", None).await.unwrap(), None);
    assert!(matches!(store.get("", None).await, Err(AppError::MissingId)));
    assert!(matches!(store.delete("").await, Err(AppError::MissingId)));
    assert!(matches!(
        store.put("", &record(json!({"age": 1}))).await,
        Err(AppError::MissingId)
    ));
}

#[tokio::test]
async fn get_with_select() {
    let store = people_store().await;
    store.post(record(json!({"_id": "s1", "name": "Sel", "age": 9}))).await.unwrap();
    let row = store.get("s1", Some("name,bogus")).await.unwrap().unwrap();
    assert_eq!(row.len(), 1);
    assert_eq!(row["name"], json!("Sel"));
}

#[tokio::test]
async fn put_requires_a_settable_field() {
    let store = people_store().await;
    store.post(record(json!({"_id": "u1", "name": "U"}))).await.unwrap();
    let err = store.put("u1", &record(json!({"_id": "u2"}))).await.unwrap_err();
    assert!(matches!(err, AppError::NoFieldToUpdate));
    assert!(store.get("u1", None).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_twice_resolves_false() {
    let store = people_store().await;
    store.post(record(json!({"_id": "d1", "name": "D"}))).await.unwrap();
    assert!(store.delete("d1").await.unwrap());
    assert!(!store.delete("d1").await.unwrap());
    assert_eq!(store.get("d1", None).await.unwrap(), None);
}

#[tokio::test]
async fn list_sorts_pages_and_counts() {
    let store = people_store().await;
    for (i, name) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        store
            .post(record(json!({"_id": format!("id{i}"), "name": name, "age": i * 10})))
            .await
            .unwrap();
    }

    let rows = store.list(&QueryOptions::new().sort("-age").count(2).page(2)).await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r["name"].clone()).collect();
    assert_eq!(names, vec![json!("c"), json!("b")]);

    let all = store.list(&QueryOptions::new().count(-1)).await.unwrap();
    assert_eq!(all.len(), 5);

    let selected = store.list(&QueryOptions::new().select("name").sort("name")).await.unwrap();
    assert_eq!(selected[0].len(), 1);
    assert_eq!(selected[0]["name"], json!("a"));

    assert_eq!(store.count(None).await.unwrap().count, 5);
    let over_15 = Predicate::from_json(&json!({"age": {"$gte": 20}})).unwrap();
    assert_eq!(store.count(Some(&over_15)).await.unwrap().count, 3);
    let either = Predicate::from_json(&json!({"$or": [{"name": "a"}, {"name": {"$in": ["e"]}}]})).unwrap();
    assert_eq!(store.count(Some(&either)).await.unwrap().count, 2);
}

#[tokio::test]
async fn list_defaults_to_thirty_rows() {
    let store = people_store().await;
    for i in 0..35 {
        store
            .post(record(json!({"name": format!("n{i}"), "age": i})))
            .await
            .unwrap();
    }
    assert_eq!(store.list(&QueryOptions::default()).await.unwrap().len(), 30);
    assert_eq!(store.list(&QueryOptions::new().page(2)).await.unwrap().len(), 5);
}

#[tokio::test]
async fn filter_values_are_bound_not_interpolated() {
    let store = people_store().await;
    store.post(record(json!({"_id": "q1", "name": "x' OR '1'='1", "age": 1}))).await.unwrap();
    store.post(record(json!({"_id": "q2", "name": "other", "age": 2}))).await.unwrap();

    let f = Predicate::from_json(&json!({"name": "x' OR '1'='1"})).unwrap();
    let rows = store.list(&QueryOptions::new().filter(f)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["_id"], json!("q1"));
}

#[tokio::test]
async fn open_rejects_bad_config() {
    let mut config = people_config();
    config.table_name.clear();
    let err = RecordStore::open_in_memory(&config).await.unwrap_err();
    assert!(matches!(err, AppError::Config(ConfigError::MissingTableName)));
}

#[tokio::test]
async fn file_store_creates_directory_and_persists() {
    let dir = std::env::temp_dir().join(format!("sqcrud-test-{}", uuid::Uuid::new_v4().simple()));
    let mut config = people_config();
    config.db_path = Some(dir.join("nested"));

    {
        let store = RecordStore::open(&config).await.unwrap();
        store.post(record(json!({"_id": "f1", "name": "File"}))).await.unwrap();
        store.pool().close().await;
    }
    assert!(dir.join("nested").join("test.db").exists());

    // Reopening runs CREATE TABLE IF NOT EXISTS again and sees the old row.
    let store = RecordStore::open(&config).await.unwrap();
    let row = store.get("f1", None).await.unwrap().unwrap();
    assert_eq!(row["name"], json!("File"));
    store.pool().close().await;
    let _ = std::fs::remove_dir_all(&dir);
}
