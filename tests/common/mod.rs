use sqcrud::{FieldConfig, FieldType, RecordStore, TableConfig};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn people_config() -> TableConfig {
    TableConfig {
        db_path: None,
        db_name: "test".into(),
        table_name: "people".into(),
        fields: vec![
            FieldConfig::new("_id", FieldType::Text).primary_key(),
            FieldConfig::new("name", FieldType::Text).required(),
            FieldConfig::new("age", FieldType::Number),
        ],
    }
}

pub async fn people_store() -> RecordStore {
    init_tracing();
    RecordStore::open_in_memory(&people_config())
        .await
        .expect("in-memory store")
}
