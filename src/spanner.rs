use anyhow::{Context, Result};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::{all_keys, Key};
use gcloud_spanner::mutation::{delete, insert, update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use gcloud_googleapis::spanner::v1::Mutation;
use std::sync::Arc;

use crate::config::SpannerConfig;
use crate::models::HerbRecord;
use crate::store::{StoreError, StoreResult};

const HERBS_TABLE: &str = "herbs";

const CREATE_HERBS_TABLE: &str = r#"
CREATE TABLE herbs (
    name STRING(MAX) NOT NULL,
    data JSON NOT NULL,
    created_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
    updated_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (name)
"#;

/// Herb collection stored in a Cloud Spanner table
///
/// Each herb is one row keyed by its name, with the full document in a JSON
/// column. Rows are listed in commit order of their creation.
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
}

impl SpannerStore {
    /// Provision the database if needed and connect to it
    ///
    /// The gcloud-spanner library picks up SPANNER_EMULATOR_HOST on its own,
    /// so the same code path serves the emulator and production.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        Provisioner::connect(config).await?.run().await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!("Connected to Spanner database: {}", database_path);

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Run a query in a single-use read-only transaction and decode every row
    async fn query_herbs(&self, statement: Statement) -> Result<Vec<HerbRecord>> {
        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query herbs from Spanner")?;

        let mut herbs = Vec::new();
        while let Some(row) = result_set.next().await.context("Failed to read herb row")? {
            herbs.push(decode_row(&row)?);
        }
        Ok(herbs)
    }

    async fn apply(&self, mutations: Vec<Mutation>) -> Result<()> {
        self.inner
            .apply(mutations)
            .await
            .context("Failed to apply mutations to Spanner")?;
        Ok(())
    }

    pub async fn find_all(&self) -> StoreResult<Vec<HerbRecord>> {
        let statement = Statement::new("SELECT data FROM herbs ORDER BY created_at ASC, name ASC");
        let herbs = self.query_herbs(statement).await?;
        tracing::debug!("Listed {} herbs", herbs.len());
        Ok(herbs)
    }

    pub async fn find_by_name(&self, name: &str) -> StoreResult<Option<HerbRecord>> {
        let mut statement = Statement::new("SELECT data FROM herbs WHERE name = @name");
        statement.add_param("name", &name.to_string());

        let herb = self.query_herbs(statement).await?.into_iter().next();
        if herb.is_none() {
            tracing::debug!("Herb not found: {}", name);
        }
        Ok(herb)
    }

    /// Insert a new row
    ///
    /// The existence check gives callers a typed conflict; the `insert`
    /// mutation still rejects a duplicate key that slips in between.
    pub async fn insert(&self, record: HerbRecord) -> StoreResult<()> {
        if self.find_by_name(&record.name).await?.is_some() {
            return Err(StoreError::Conflict(record.name));
        }

        self.apply(vec![insert_mutation(&record)?]).await?;
        tracing::debug!("Inserted herb: {}", record.name);
        Ok(())
    }

    pub async fn replace_by_name(&self, name: &str, record: HerbRecord) -> StoreResult<()> {
        if self.find_by_name(name).await?.is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        let mutations = if record.name == name {
            let data = encode_record(&record)?;
            vec![update(
                HERBS_TABLE,
                &["name", "data", "updated_at"],
                &[&record.name, &data, &CommitTimestamp::new()],
            )]
        } else {
            // The primary key cannot change in place: move the row.
            if self.find_by_name(&record.name).await?.is_some() {
                return Err(StoreError::Conflict(record.name));
            }
            vec![
                delete(HERBS_TABLE, Key::new(&name.to_string())),
                insert_mutation(&record)?,
            ]
        };

        self.apply(mutations).await?;
        tracing::debug!("Replaced herb: {} -> {}", name, record.name);
        Ok(())
    }

    pub async fn delete_all(&self) -> StoreResult<u64> {
        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction for count")?;

        let mut count_result = tx
            .query(Statement::new("SELECT COUNT(*) AS count FROM herbs"))
            .await
            .context("Failed to execute count query")?;

        let count: i64 = match count_result.next().await.context("Failed to read count row")? {
            Some(row) => row.column_by_name("count").context("Failed to decode count")?,
            None => 0,
        };

        self.apply(vec![delete(HERBS_TABLE, all_keys())]).await?;
        tracing::debug!("Deleted all {} herbs", count);
        Ok(count.max(0) as u64)
    }

    pub async fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        if self.find_by_name(name).await?.is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        self.apply(vec![delete(HERBS_TABLE, Key::new(&name.to_string()))])
            .await?;
        tracing::debug!("Deleted herb: {}", name);
        Ok(())
    }

    /// Verify the database answers a trivial query
    pub async fn health_check(&self) -> StoreResult<()> {
        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(Statement::new("SELECT 1"))
            .await
            .context("Failed to execute health check query")?;

        match result_set.next().await.context("Failed to read health check row")? {
            Some(_) => {
                tracing::debug!("Health check query succeeded");
                Ok(())
            }
            None => Err(anyhow::anyhow!("Health check query returned no results").into()),
        }
    }

    /// Close the session pool once no other handle refers to it
    pub async fn close(self) {
        match Arc::try_unwrap(self.inner) {
            Ok(client) => {
                client.close().await;
                tracing::info!("Spanner client closed");
            }
            Err(_) => tracing::warn!("Spanner client still shared at shutdown; leaving it to drop"),
        }
    }
}

fn encode_record(record: &HerbRecord) -> Result<String> {
    serde_json::to_string(record).context("Failed to serialize herb document")
}

fn decode_row(row: &Row) -> Result<HerbRecord> {
    let data: String = row
        .column_by_name("data")
        .context("Failed to read herb document column")?;
    serde_json::from_str(&data).context("Failed to deserialize herb document")
}

fn insert_mutation(record: &HerbRecord) -> Result<Mutation> {
    let data = encode_record(record)?;
    Ok(insert(
        HERBS_TABLE,
        &["name", "data", "created_at", "updated_at"],
        &[&record.name, &data, &CommitTimestamp::new(), &CommitTimestamp::new()],
    ))
}

/// Creates the instance, database and `herbs` table when they are missing,
/// so a fresh emulator needs no manual setup.
struct Provisioner<'a> {
    admin: AdminClient,
    config: &'a SpannerConfig,
    project_path: String,
    instance_path: String,
    database_path: String,
}

impl<'a> Provisioner<'a> {
    async fn connect(config: &'a SpannerConfig) -> Result<Self> {
        let admin = AdminClient::new(AdminClientConfig::default())
            .await
            .context("Failed to create Spanner admin client")?;

        let project_path = format!("projects/{}", config.project);
        let instance_path = format!("{}/instances/{}", project_path, config.instance);
        let database_path = config.database_path();

        Ok(Self {
            admin,
            config,
            project_path,
            instance_path,
            database_path,
        })
    }

    async fn run(&self) -> Result<()> {
        tracing::info!("Checking Spanner resources...");
        self.ensure_instance().await?;
        self.ensure_database().await?;
        self.ensure_herbs_table().await?;
        tracing::info!("Spanner resources ready");
        Ok(())
    }

    async fn ensure_instance(&self) -> Result<()> {
        let request = GetInstanceRequest {
            name: self.instance_path.clone(),
            field_mask: None,
        };

        match self.admin.instance().get_instance(request, None).await {
            Ok(_) => {
                tracing::info!("Instance exists: {}", self.instance_path);
                Ok(())
            }
            Err(status) if status.code() == Code::NotFound => {
                tracing::info!("Creating instance: {}", self.instance_path);

                let instance_config = match self.config.emulator_host {
                    Some(_) => format!("{}/instanceConfigs/emulator-config", self.project_path),
                    None => format!("{}/instanceConfigs/regional-us-central1", self.project_path),
                };

                let request = CreateInstanceRequest {
                    parent: self.project_path.clone(),
                    instance_id: self.config.instance.clone(),
                    instance: Some(Instance {
                        name: self.instance_path.clone(),
                        config: instance_config,
                        display_name: format!("{} instance", self.config.instance),
                        node_count: 1,
                        ..Default::default()
                    }),
                };

                self.admin
                    .instance()
                    .create_instance(request, None)
                    .await
                    .context("Failed to start instance creation")?
                    .wait(None)
                    .await
                    .context("Failed to create instance")?;

                tracing::info!("Instance created: {}", self.instance_path);
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to check instance existence: {}",
                e.message()
            )),
        }
    }

    async fn ensure_database(&self) -> Result<()> {
        let request = GetDatabaseRequest {
            name: self.database_path.clone(),
        };

        match self.admin.database().get_database(request, None).await {
            Ok(_) => {
                tracing::info!("Database exists: {}", self.database_path);
                Ok(())
            }
            Err(status) if status.code() == Code::NotFound => {
                tracing::info!("Creating database: {}", self.database_path);

                let request = CreateDatabaseRequest {
                    parent: self.instance_path.clone(),
                    create_statement: format!("CREATE DATABASE `{}`", self.config.database),
                    extra_statements: vec![],
                    encryption_config: None,
                    database_dialect: 1, // Google Standard SQL
                    proto_descriptors: vec![],
                };

                self.admin
                    .database()
                    .create_database(request, None)
                    .await
                    .context("Failed to start database creation")?
                    .wait(None)
                    .await
                    .context("Failed to create database")?;

                tracing::info!("Database created: {}", self.database_path);
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to check database existence: {}",
                e.message()
            )),
        }
    }

    async fn ensure_herbs_table(&self) -> Result<()> {
        let request = GetDatabaseDdlRequest {
            database: self.database_path.clone(),
        };

        let statements = self
            .admin
            .database()
            .get_database_ddl(request, None)
            .await
            .context("Failed to get database DDL")?
            .into_inner()
            .statements;

        if statements.iter().any(|stmt| declares_herbs_table(stmt)) {
            tracing::info!("Table '{}' exists", HERBS_TABLE);
            return Ok(());
        }

        tracing::info!("Creating table '{}'", HERBS_TABLE);

        let request = UpdateDatabaseDdlRequest {
            database: self.database_path.clone(),
            statements: vec![CREATE_HERBS_TABLE.trim().to_string()],
            operation_id: String::new(),
            proto_descriptors: vec![],
            throughput_mode: false,
        };

        self.admin
            .database()
            .update_database_ddl(request, None)
            .await
            .context("Failed to start table creation")?
            .wait(None)
            .await
            .context("Failed to create table")?;

        tracing::info!("Table '{}' created", HERBS_TABLE);
        Ok(())
    }
}

fn declares_herbs_table(ddl: &str) -> bool {
    ddl.contains("CREATE TABLE herbs ") || ddl.contains("CREATE TABLE `herbs`")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{basil, HerbPatch};
    use crate::store::HerbStore;

    fn emulator_config(instance: &str) -> SpannerConfig {
        SpannerConfig {
            emulator_host: Some("localhost:9010".to_string()),
            project: "test-project".to_string(),
            instance: instance.to_string(),
            database: format!("{}-db", instance),
        }
    }

    #[test]
    fn test_store_is_clonable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<SpannerStore>();
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpannerStore>();
    }

    #[test]
    fn test_table_ddl_is_recognized() {
        assert!(declares_herbs_table(CREATE_HERBS_TABLE.trim()));
        assert!(declares_herbs_table("CREATE TABLE `herbs` (\n  name STRING(MAX)) PRIMARY KEY (name)"));
        assert!(!declares_herbs_table("CREATE TABLE herbs_archive (\n  name STRING(MAX)) PRIMARY KEY (name)"));
    }

    #[test]
    fn test_documents_survive_encoding() {
        let encoded = encode_record(&basil()).unwrap();
        let decoded: HerbRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, basil());
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator on localhost:9010"]
    async fn test_crud_against_emulator() {
        unsafe {
            std::env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
        }

        let store = HerbStore::Spanner(
            SpannerStore::from_config(&emulator_config("herb-crud-test"))
                .await
                .expect("Failed to connect to the Spanner emulator"),
        );

        store.delete_all().await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());

        store.insert(basil()).await.unwrap();
        assert!(matches!(store.insert(basil()).await, Err(StoreError::Conflict(_))));
        assert_eq!(store.find_by_name("Basil").await.unwrap(), Some(basil()));

        let updated = store
            .update_by_name(
                "Basil",
                HerbPatch {
                    name: Some("Thai Basil".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Thai Basil");
        assert!(store.find_by_name("Basil").await.unwrap().is_none());

        store.delete_by_name("Thai Basil").await.unwrap();
        assert!(matches!(
            store.delete_by_name("Thai Basil").await,
            Err(StoreError::NotFound(_))
        ));

        store.health_check().await.unwrap();
        store.close().await;
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator on localhost:9010"]
    async fn test_provisioning_is_idempotent() {
        unsafe {
            std::env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
        }

        let config = emulator_config("herb-idempotent-test");
        SpannerStore::from_config(&config).await.unwrap();
        assert!(SpannerStore::from_config(&config).await.is_ok());
    }
}
