//! Creates the Spanner instance, database and notes table when missing, so a
//! fresh emulator needs no manual setup.

use anyhow::{Context, Result, anyhow};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::admin::client::Client as AdminClient;

use super::spanner::NOTES_TABLE;
use crate::config::SpannerConfig;

const CREATE_NOTES_TABLE: &str = "CREATE TABLE notes (
    id STRING(36) NOT NULL,
    title STRING(MAX) NOT NULL,
    description STRING(MAX) NOT NULL,
    created_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
    updated_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)";

struct Provisioner<'a> {
    admin: AdminClient,
    config: &'a SpannerConfig,
    project_path: String,
    instance_path: String,
    database_path: String,
}

pub(super) async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let provisioner = Provisioner {
        admin,
        config,
        database_path: config.database_path(),
        project_path,
        instance_path,
    };

    provisioner.instance().await?;
    provisioner.database().await?;
    provisioner.notes_table().await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

impl Provisioner<'_> {
    async fn instance(&self) -> Result<()> {
        let request = GetInstanceRequest {
            name: self.instance_path.clone(),
            field_mask: None,
        };

        match self.admin.instance().get_instance(request, None).await {
            Ok(_) => {
                tracing::info!("Instance already exists: {}", self.instance_path);
                return Ok(());
            }
            Err(status) if status.code() == Code::NotFound => {}
            Err(e) => return Err(anyhow!("Failed to check instance existence: {}", e.message())),
        }

        tracing::info!("Instance not found, creating: {}", self.instance_path);

        let instance_config = if self.config.emulator_host.is_some() {
            format!("{}/instanceConfigs/emulator-config", self.project_path)
        } else {
            format!("{}/instanceConfigs/regional-us-central1", self.project_path)
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

        tracing::info!("Instance created successfully: {}", self.instance_path);
        Ok(())
    }

    async fn database(&self) -> Result<()> {
        let request = GetDatabaseRequest {
            name: self.database_path.clone(),
        };

        match self.admin.database().get_database(request, None).await {
            Ok(_) => {
                tracing::info!("Database already exists: {}", self.database_path);
                return Ok(());
            }
            Err(status) if status.code() == Code::NotFound => {}
            Err(e) => return Err(anyhow!("Failed to check database existence: {}", e.message())),
        }

        tracing::info!("Database not found, creating: {}", self.database_path);

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

        tracing::info!("Database created successfully: {}", self.database_path);
        Ok(())
    }

    async fn notes_table(&self) -> Result<()> {
        let request = GetDatabaseDdlRequest {
            database: self.database_path.clone(),
        };

        let ddl = self
            .admin
            .database()
            .get_database_ddl(request, None)
            .await
            .context("Failed to get database DDL")?
            .into_inner();

        if ddl.statements.iter().any(|stmt| declares_notes_table(stmt)) {
            tracing::info!("Table '{}' already exists", NOTES_TABLE);
            return Ok(());
        }

        tracing::info!("Table '{}' not found, creating...", NOTES_TABLE);

        let request = UpdateDatabaseDdlRequest {
            database: self.database_path.clone(),
            statements: vec![CREATE_NOTES_TABLE.to_string()],
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

        tracing::info!("Table '{}' created successfully", NOTES_TABLE);
        Ok(())
    }
}

fn declares_notes_table(statement: &str) -> bool {
    statement.contains("CREATE TABLE notes ") || statement.contains("CREATE TABLE `notes`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_notes_table() {
        assert!(declares_notes_table(CREATE_NOTES_TABLE));
        assert!(declares_notes_table("CREATE TABLE `notes` (\n id STRING(36)"));
        assert!(!declares_notes_table("CREATE TABLE notes_archive (id STRING(36))"));
        assert!(!declares_notes_table("CREATE TABLE kv_store (id STRING(36))"));
    }
}
