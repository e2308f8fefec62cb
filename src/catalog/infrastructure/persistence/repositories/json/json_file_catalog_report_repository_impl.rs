use std::{
    collections::BTreeSet,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::catalog::{
    domain::model::{
        entities::{
            table_metadata::TableMetadata,
            table_quality_report::{QUALITY_RECORD_SUFFIX, TableQualityReport},
        },
        enums::catalog_domain_error::CatalogDomainError,
        value_objects::table_name::TableName,
    },
    infrastructure::persistence::repositories::catalog_report_repository::CatalogReportRepository,
};

const METADATA_SUFFIX: &str = ".json";
const DOCUMENTATION_SUFFIX: &str = ".md";

pub struct JsonFileCatalogReportRepositoryImpl {
    metadata_dir: PathBuf,
    docs_dir: PathBuf,
}

impl JsonFileCatalogReportRepositoryImpl {
    pub fn new(metadata_dir: PathBuf, docs_dir: PathBuf) -> Self {
        Self {
            metadata_dir,
            docs_dir,
        }
    }

    fn metadata_path(&self, table_name: &TableName) -> PathBuf {
        self.metadata_dir
            .join(format!("{}{}", table_name.value(), METADATA_SUFFIX))
    }

    fn quality_path(&self, table_name: &TableName) -> PathBuf {
        self.metadata_dir
            .join(format!(
                "{}{}{}",
                table_name.value(),
                QUALITY_RECORD_SUFFIX,
                METADATA_SUFFIX
            ))
    }

    fn documentation_path(&self, table_name: &TableName) -> PathBuf {
        self.docs_dir
            .join(format!("{}{}", table_name.value(), DOCUMENTATION_SUFFIX))
    }

    fn storage_key(table_name: &str) -> Result<TableName, CatalogDomainError> {
        TableName::new(table_name.to_string())
            .map_err(|e| CatalogDomainError::storage(table_name, e))
    }

    fn to_pretty_json<T: Serialize>(
        table_name: &str,
        value: &T,
    ) -> Result<Vec<u8>, CatalogDomainError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value
            .serialize(&mut serializer)
            .map_err(|e| CatalogDomainError::storage(table_name, e))?;
        buffer.push(b'\n');
        Ok(buffer)
    }

    async fn write_atomically(
        &self,
        table_name: &str,
        path: &Path,
        contents: Vec<u8>,
    ) -> Result<(), CatalogDomainError> {
        fs::create_dir_all(&self.metadata_dir)
            .await
            .map_err(|e| CatalogDomainError::storage(table_name, e))?;

        let mut temp_path = path.as_os_str().to_owned();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        fs::write(&temp_path, contents)
            .await
            .map_err(|e| CatalogDomainError::storage(table_name, e))?;
        fs::rename(&temp_path, path)
            .await
            .map_err(|e| CatalogDomainError::storage(table_name, e))
    }

    async fn read_optional(
        table_name: &TableName,
        path: &Path,
    ) -> Result<Option<String>, CatalogDomainError> {
        match fs::read_to_string(path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CatalogDomainError::storage(table_name.value(), e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(
        table_name: &TableName,
        path: &Path,
    ) -> Result<Option<T>, CatalogDomainError> {
        let Some(contents) = Self::read_optional(table_name, path).await? else {
            return Ok(None);
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| CatalogDomainError::storage(table_name.value(), e))
    }
}

#[async_trait]
impl CatalogReportRepository for JsonFileCatalogReportRepositoryImpl {
    async fn save_table_metadata(&self, metadata: &TableMetadata) -> Result<(), CatalogDomainError> {
        let key = Self::storage_key(&metadata.table_name)?;
        let contents = Self::to_pretty_json(key.value(), metadata)?;
        self.write_atomically(key.value(), &self.metadata_path(&key), contents)
            .await
    }

    async fn save_quality_report(
        &self,
        table_name: &str,
        report: &TableQualityReport,
    ) -> Result<(), CatalogDomainError> {
        let key = Self::storage_key(table_name)?;
        let contents = Self::to_pretty_json(key.value(), report)?;
        self.write_atomically(key.value(), &self.quality_path(&key), contents)
            .await
    }

    async fn find_table_metadata(
        &self,
        table_name: &TableName,
    ) -> Result<Option<TableMetadata>, CatalogDomainError> {
        Self::read_json(table_name, &self.metadata_path(table_name)).await
    }

    async fn find_quality_report(
        &self,
        table_name: &TableName,
    ) -> Result<Option<TableQualityReport>, CatalogDomainError> {
        Self::read_json(table_name, &self.quality_path(table_name)).await
    }

    async fn list_table_names(&self) -> Result<Vec<String>, CatalogDomainError> {
        let mut entries = match fs::read_dir(&self.metadata_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CatalogDomainError::InfrastructureError(e.to_string())),
        };

        let mut stems = BTreeSet::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CatalogDomainError::InfrastructureError(e.to_string()))?
        {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };

            if let Some(stem) = file_name.strip_suffix(METADATA_SUFFIX) {
                if !stem.is_empty() {
                    stems.insert(stem.to_string());
                }
            }
        }

        let is_quality_record = |stem: &String| {
            stem.strip_suffix(QUALITY_RECORD_SUFFIX)
                .is_some_and(|owner| stems.contains(owner))
        };
        Ok(stems
            .iter()
            .filter(|stem| !is_quality_record(*stem))
            .cloned()
            .collect())
    }

    async fn find_table_documentation(
        &self,
        table_name: &TableName,
    ) -> Result<Option<String>, CatalogDomainError> {
        Self::read_optional(table_name, &self.documentation_path(table_name)).await
    }
}
