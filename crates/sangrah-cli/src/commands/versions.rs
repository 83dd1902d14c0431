//! Document version history commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use sangrah_core::error::AppError;
use sangrah_core::types::id::{DocumentId, UserId};
use sangrah_database::Stores;
use sangrah_entity::version::{DocumentVersion, FieldChange};
use sangrah_service::{RequestContext, build_services};

use crate::output::{self, OutputFormat};

/// Arguments for version commands
#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Versions subcommand
    #[command(subcommand)]
    pub command: VersionsCommand,
}

/// Versions subcommands
#[derive(Debug, Subcommand)]
pub enum VersionsCommand {
    /// List versions of a document, newest first
    List {
        /// Document ID
        document: DocumentId,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Items per page
        #[arg(long)]
        per_page: Option<u64>,
    },
    /// Show one version with its snapshot
    Show {
        /// Document ID
        document: DocumentId,
        /// Version number
        version: i32,
    },
    /// Show the latest version
    Latest {
        /// Document ID
        document: DocumentId,
    },
    /// List field changes between two versions
    Compare {
        /// Document ID
        document: DocumentId,
        /// Base version number
        from: i32,
        /// Target version number
        to: i32,
    },
    /// Restore a document to an earlier version
    Restore {
        /// Document ID
        document: DocumentId,
        /// Version number to restore
        version: i32,
        /// Notes appended to the change reason
        #[arg(short, long)]
        notes: Option<String>,
        /// Acting user ID
        #[arg(long)]
        actor: Option<UserId>,
    },
}

/// Version display row for table output
#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    /// Version number
    version: i32,
    /// Label
    label: String,
    /// Created at
    created_at: String,
    /// Created by
    created_by: String,
    /// Change reason
    reason: String,
}

impl From<&DocumentVersion> for VersionRow {
    fn from(v: &DocumentVersion) -> Self {
        Self {
            version: v.version_number,
            label: v.version_label.clone().unwrap_or_default(),
            created_at: v.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            created_by: v.created_by.map(|u| u.to_string()).unwrap_or_else(|| "system".into()),
            reason: v.change_reason.clone(),
        }
    }
}

/// Change display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ChangeRow {
    /// Field name
    field: String,
    /// Old value
    old: String,
    /// New value
    new: String,
}

impl From<&FieldChange> for ChangeRow {
    fn from(c: &FieldChange) -> Self {
        Self {
            field: c.field.to_string(),
            old: c.old_value.to_string(),
            new: c.new_value.to_string(),
        }
    }
}

/// Execute version commands
pub async fn execute(
    args: &VersionsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let stores = Stores::connect(&config).await?;
    let (_, versions) = build_services(&stores, config.versioning.default_page_size);

    let result = async {
        match &args.command {
            VersionsCommand::List {
                document,
                page,
                per_page,
            } => {
                let request = versions.page_request(Some(*page), *per_page)?;
                let listing = versions.list_versions(*document, &request).await?;
                let rows: Vec<VersionRow> = listing.items.iter().map(VersionRow::from).collect();
                output::print_list(&rows, format);
                if format == OutputFormat::Table {
                    println!(
                        "Page {} of {} ({} versions)",
                        listing.page, listing.total_pages, listing.total_items
                    );
                }
            }
            VersionsCommand::Show { document, version } => {
                let record = versions.view_version(*document, *version).await?;
                print_version(&record, format);
            }
            VersionsCommand::Latest { document } => {
                let record = versions.latest_version(*document).await?;
                print_version(&record, format);
            }
            VersionsCommand::Compare { document, from, to } => {
                let changes = versions.compare_versions(*document, *from, *to).await?;
                let rows: Vec<ChangeRow> = changes.iter().map(ChangeRow::from).collect();
                output::print_list(&rows, format);
            }
            VersionsCommand::Restore {
                document,
                version,
                notes,
                actor,
            } => {
                let ctx = RequestContext::new(*actor);
                let outcome = versions
                    .restore_version(&ctx, *document, *version, notes.as_deref())
                    .await?;
                match format {
                    OutputFormat::Json => output::print_json(&outcome),
                    OutputFormat::Table => {
                        output::print_success(&format!(
                            "Document {document} restored to version {version} as version {}",
                            outcome.version.version_number
                        ));
                        output::print_kv("Changes", &outcome.summary);
                    }
                }
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    stores.close().await;
    result
}

fn print_version(version: &DocumentVersion, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(version),
        OutputFormat::Table => {
            let row = VersionRow::from(version);
            output::print_kv("Version", &row.version.to_string());
            output::print_kv("Label", &row.label);
            output::print_kv("Created", &row.created_at);
            output::print_kv("By", &row.created_by);
            output::print_kv("Reason", &row.reason);
            let snapshot = serde_json::to_string_pretty(&version.snapshot)
                .unwrap_or_else(|_| version.snapshot.to_string());
            println!("{snapshot}");
        }
    }
}
