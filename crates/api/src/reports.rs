//! CSV files for the monthly revenue report.
//!
//! Files are `;`-separated without a header, one `service_id;amount` row per
//! service, and are named by a random UUID under the configured directory.

use std::io;
use std::path::PathBuf;

use balance_core::reservation::ServiceRevenue;
use balance_shared::config::ReportsConfig;
use uuid::Uuid;

/// Errors that can occur while writing or reading reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The requested report does not exist.
    #[error("report not found")]
    NotFound,

    /// CSV encoding failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Report file storage.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
    public_base_url: Option<String>,
}

impl ReportStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    /// Creates a store from configuration.
    pub fn from_config(config: &ReportsConfig) -> Self {
        Self::new(&config.dir, config.public_base_url.clone())
    }

    /// Encodes the summary as CSV.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Csv` if encoding fails.
    pub fn encode(rows: &[ServiceRevenue]) -> Result<Vec<u8>, ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_writer(Vec::new());

        for row in rows {
            let amount = format!("{:.2}", row.total);
            writer.write_record([row.service_id.as_str(), amount.as_str()])?;
        }

        writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))
    }

    /// Writes a new report and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub async fn write(&self, rows: &[ServiceRevenue]) -> Result<Uuid, ReportError> {
        let bytes = Self::encode(rows)?;
        let id = Uuid::new_v4();

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path(id), bytes).await?;
        Ok(id)
    }

    /// Reads a report by its id as given in the URL.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NotFound` if the id is not a UUID or no such
    /// file exists.
    pub async fn read(&self, file_id: &str) -> Result<Vec<u8>, ReportError> {
        let id = Uuid::parse_str(file_id).map_err(|_| ReportError::NotFound)?;
        match tokio::fs::read(self.path(id)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ReportError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Public link to a report. Falls back to the request host when no base
    /// URL is configured.
    pub fn link(&self, id: Uuid, host: Option<&str>) -> String {
        let base = self.public_base_url.clone().unwrap_or_else(|| {
            format!("http://{}", host.unwrap_or("localhost"))
        });
        format!("{base}/api/v1/reports/{id}")
    }

    fn path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.csv"))
    }
}
