//! Startup ingestion: CSV rows -> drafts -> enrichment -> store.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use pokedex_utils_readiness::Readiness;
use pokedex_utils_readiness::ReadinessFlag;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::task::JoinSet;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::enrich::Enricher;
use crate::enrich::enrich_or_synthesize;
use crate::model::PokemonDraft;
use crate::store::PokemonStore;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset header has no `{0}` column")]
    MissingColumn(&'static str),
    #[error("failed to read dataset: {0}")]
    Read(#[from] csv::Error),
    #[error("ingestion task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// One row of the source dataset. Columns beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub id: String,
    pub name: String,
    pub type1: Option<String>,
    pub type2: Option<String>,
}

impl CsvRow {
    /// Builds the identity fields. Returns `None` when the id is not a
    /// positive integer.
    pub fn to_draft(&self, asset_base_url: &str) -> Option<PokemonDraft> {
        let id: u32 = self.id.trim().parse().ok().filter(|id| *id > 0)?;
        let types = [&self.type1, &self.type2]
            .into_iter()
            .flatten()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();
        Some(PokemonDraft {
            id,
            name: self.name.to_lowercase(),
            types,
            url: image_url(asset_base_url, id),
        })
    }
}

pub fn image_url(asset_base_url: &str, id: u32) -> String {
    format!("{}/{id}.png", asset_base_url.trim_end_matches('/'))
}

/// Header positions of the columns a row is built from.
#[derive(Debug, Clone, Copy)]
struct Columns {
    id: usize,
    name: usize,
    type1: Option<usize>,
    type2: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        let find = |column: &str| headers.iter().position(|header| header == column);
        Ok(Self {
            id: find("id").ok_or(IngestError::MissingColumn("id"))?,
            name: find("Name").ok_or(IngestError::MissingColumn("Name"))?,
            type1: find("Type1"),
            type2: find("Type2"),
        })
    }

    /// Trailing fields missing from a short record read as absent. A record
    /// without an id or name field yields `None`.
    fn row(&self, record: &csv::StringRecord) -> Option<CsvRow> {
        let field = |index: Option<usize>| index.and_then(|i| record.get(i)).map(str::to_string);
        Some(CsvRow {
            id: field(Some(self.id))?,
            name: field(Some(self.name))?,
            type1: field(self.type1),
            type2: field(self.type2),
        })
    }
}

/// Rows read from the dataset plus the number of records that could not be
/// turned into a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetRows {
    pub rows: Vec<CsvRow>,
    pub unreadable: usize,
}

fn read_rows_from<R: Read>(reader: R) -> Result<DatasetRows, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::locate(reader.headers()?)?;

    let mut dataset = DatasetRows::default();
    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!(record = index + 1, error = %err, "skipping unreadable record");
                dataset.unreadable += 1;
                continue;
            }
        };
        match columns.row(&record) {
            Some(row) => dataset.rows.push(row),
            None => {
                warn!(record = index + 1, "skipping record without id or name field");
                dataset.unreadable += 1;
            }
        }
    }
    Ok(dataset)
}

pub fn read_rows(path: &Path) -> Result<DatasetRows, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows_from(file)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub rows: usize,
    pub enriched: usize,
    pub synthesized: usize,
    pub skipped: usize,
}

/// Enriches every row concurrently and appends each entry as soon as its own
/// lookup settles, so store order follows completion order.
pub async fn ingest_rows(
    rows: Vec<CsvRow>,
    store: &PokemonStore,
    enricher: Arc<dyn Enricher>,
    asset_base_url: &str,
) -> IngestReport {
    let mut report = IngestReport {
        rows: rows.len(),
        ..IngestReport::default()
    };
    let mut tasks = JoinSet::new();
    for row in rows {
        let Some(draft) = row.to_draft(asset_base_url) else {
            warn!(id = %row.id, name = %row.name, "skipping row without a positive integer id");
            report.skipped += 1;
            continue;
        };
        let store = store.clone();
        let enricher = Arc::clone(&enricher);
        tasks.spawn(async move {
            let (enrichment, enriched) = enrich_or_synthesize(enricher.as_ref(), &draft.name).await;
            store.insert(draft.finish(enrichment));
            enriched
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(true) => report.enriched += 1,
            Ok(false) => report.synthesized += 1,
            Err(err) => {
                warn!(error = %err, "ingestion row task did not complete");
                report.skipped += 1;
            }
        }
    }
    report
}

/// Reads `path` and ingests it into `store`.
pub async fn ingest_file(
    path: PathBuf,
    store: &PokemonStore,
    enricher: Arc<dyn Enricher>,
    asset_base_url: &str,
) -> Result<IngestReport, IngestError> {
    let started = Instant::now();
    let dataset = tokio::task::spawn_blocking(move || read_rows(&path)).await??;
    info!(
        rows = dataset.rows.len(),
        unreadable = dataset.unreadable,
        "dataset loaded; enriching"
    );
    let mut report = ingest_rows(dataset.rows, store, enricher, asset_base_url).await;
    report.rows += dataset.unreadable;
    report.skipped += dataset.unreadable;
    info!(
        rows = report.rows,
        enriched = report.enriched,
        synthesized = report.synthesized,
        skipped = report.skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dataset ingested"
    );
    Ok(report)
}

/// Runs ingestion in the background and marks `readiness` when it finishes,
/// whether or not it succeeded. Callers are free to serve from `store` in the
/// meantime and will see it fill up.
pub fn spawn_ingestion(
    path: PathBuf,
    store: PokemonStore,
    enricher: Arc<dyn Enricher>,
    asset_base_url: String,
    readiness: ReadinessFlag,
) -> JoinHandle<Result<IngestReport, IngestError>> {
    tokio::spawn(async move {
        let result = ingest_file(path, &store, enricher, &asset_base_url).await;
        if let Err(err) = &result {
            error!(error = %err, "dataset ingestion failed");
        }
        readiness.mark_ready();
        result
    })
}
