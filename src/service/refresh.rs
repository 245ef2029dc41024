use crate::api::portal::PortalClient;
use crate::db::models::{Commercialization, Export, Import, Processing, Production};
use crate::db::{Dataset, Storage};
use crate::error::VitiError;
use crate::etl::text::decode_bytes;
use crate::etl::{CATALOG, Frame, LongRow, SourceSpec, TableKind, reshape};
use serde::Serialize;
use sqlx::SqliteConnection;
use tracing::info;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableReport {
    pub table: &'static str,
    pub rows: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefreshReport {
    pub tables: Vec<TableReport>,
}

/// Download and reshape every catalogued file, then swap the contents of all
/// five tables inside one transaction. Nothing is written unless every file
/// was fetched and parsed.
pub async fn refresh_all(portal: &PortalClient, storage: &Storage) -> Result<RefreshReport, VitiError> {
    let mut staged = Vec::with_capacity(CATALOG.len());
    for spec in CATALOG {
        let rows = collect(portal, spec).await?;
        info!(table = spec.kind.label(), rows = rows.len(), "reshaped source files");
        staged.push((spec.kind, rows));
    }

    let mut tx = storage.pool().begin().await?;
    let mut tables = Vec::with_capacity(staged.len());
    for (kind, rows) in staged {
        let rows = load(&mut tx, kind, rows).await?;
        tables.push(TableReport {
            table: kind.label(),
            rows,
        });
    }
    tx.commit().await?;

    info!(tables = tables.len(), "refresh committed");
    Ok(RefreshReport { tables })
}

async fn collect(portal: &PortalClient, spec: &SourceSpec) -> Result<Vec<LongRow>, VitiError> {
    let mut rows = Vec::new();
    for source in spec.files {
        let bytes = portal.download(source.file).await?;
        let text = decode_bytes(&bytes);
        let mut frame = Frame::parse(&text, spec.separator, spec.header)?;
        if let Some(column) = spec.drop_column {
            frame.drop_column(column);
        }
        rows.extend(reshape(spec, source, &frame)?);
    }
    Ok(rows)
}

async fn load(
    conn: &mut SqliteConnection,
    kind: TableKind,
    rows: Vec<LongRow>,
) -> Result<u64, VitiError> {
    match kind {
        TableKind::Production => replace::<Production>(conn, rows).await,
        TableKind::Processing => replace::<Processing>(conn, rows).await,
        TableKind::Commercialization => replace::<Commercialization>(conn, rows).await,
        TableKind::Import => replace::<Import>(conn, rows).await,
        TableKind::Export => replace::<Export>(conn, rows).await,
    }
}

async fn replace<D>(conn: &mut SqliteConnection, rows: Vec<LongRow>) -> Result<u64, VitiError>
where
    D: Dataset,
    D::Fields: From<LongRow>,
{
    let fields: Vec<D::Fields> = rows.into_iter().map(Into::into).collect();
    Storage::replace_all::<D>(conn, &fields).await
}
