// linkrank/src/commands/disambiguate.rs
//! `linkrank disambiguate`: runs the engine over a set of documents.
//!
//! Documents are independent, so each one is processed on its own scoped
//! thread against a single shared engine. The engine keeps no per-document
//! state, which is what makes the sharing safe.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use linkrank_core::{
    ContentItem, EnhancementEngine, EnhancementReport, EntityhubClient, FoafDisambiguationEngine,
    InMemoryKnowledgeBase, KnowledgeBase,
};

use super::load_effective_config;
use crate::cli::DisambiguateCommand;
use crate::ui::ranking_table;

/// Where updated documents are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Results are only reported.
    Discard,
    InPlace,
    Directory(PathBuf),
}

impl OutputTarget {
    pub fn from_command(cmd: &DisambiguateCommand) -> Self {
        match (&cmd.output_dir, cmd.in_place) {
            (Some(dir), _) => OutputTarget::Directory(dir.clone()),
            (None, true) => OutputTarget::InPlace,
            (None, false) => OutputTarget::Discard,
        }
    }

    /// The file an updated copy of `source` goes to, if any.
    pub fn destination(&self, source: &Path) -> Result<Option<PathBuf>> {
        match self {
            OutputTarget::Discard => Ok(None),
            OutputTarget::InPlace => Ok(Some(source.to_path_buf())),
            OutputTarget::Directory(dir) => {
                let name = source
                    .file_name()
                    .ok_or_else(|| anyhow!("Document path {} has no file name", source.display()))?;
                Ok(Some(dir.join(name)))
            }
        }
    }
}

/// Fails if two documents would be written to the same file.
pub fn check_destinations(documents: &[PathBuf], target: &OutputTarget) -> Result<()> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();
    for source in documents {
        let Some(destination) = target.destination(source)? else {
            continue;
        };
        if let Some(previous) = claimed.get(&destination) {
            bail!(
                "Documents {} and {} would both be written to {}",
                previous.display(),
                source.display(),
                destination.display()
            );
        }
        claimed.insert(destination, source);
    }
    Ok(())
}

fn open_knowledge_base(cmd: &DisambiguateCommand) -> Result<Arc<dyn KnowledgeBase>> {
    match (&cmd.kb, &cmd.entityhub) {
        (Some(path), _) => Ok(Arc::new(InMemoryKnowledgeBase::load_from_file(path)?)),
        (None, Some(url)) => {
            info!("Using remote Entityhub at {}", url);
            let client = EntityhubClient::new(url.as_str())
                .with_context(|| format!("Failed to create Entityhub client for {}", url))?;
            Ok(Arc::new(client))
        }
        (None, None) => bail!("Either --kb or --entityhub must be given"),
    }
}

/// Loads, enhances and (optionally) writes back one document.
pub fn process_document(
    engine: &dyn EnhancementEngine,
    path: &Path,
    target: &OutputTarget,
) -> Result<EnhancementReport> {
    let item = ContentItem::load_from_file(path)?;
    let report = engine
        .compute_enhancements(&item)
        .with_context(|| format!("Failed to process document {}", path.display()))?;

    if let Some(destination) = target.destination(path)? {
        item.save_to_file(&destination)?;
    }
    for failure in report.failures() {
        warn!(
            "{}: suggestion '{}' for '{}' was dropped: {}",
            path.display(),
            failure.link_id,
            failure.entity_id,
            failure.reason
        );
    }
    Ok(report)
}

pub fn run_disambiguate(cmd: &DisambiguateCommand) -> Result<()> {
    let config = load_effective_config(cmd.config.as_deref())?;
    let knowledge_base = open_knowledge_base(cmd)?;
    let engine = FoafDisambiguationEngine::new(&config, knowledge_base)?;

    let target = OutputTarget::from_command(cmd);
    check_destinations(&cmd.documents, &target)?;
    if let OutputTarget::Directory(dir) = &target {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }
    debug!("Processing {} document(s), output target {:?}", cmd.documents.len(), target);

    let results: Vec<(PathBuf, Result<EnhancementReport>)> = thread::scope(|scope| {
        let handles: Vec<_> = cmd
            .documents
            .iter()
            .map(|path| {
                let engine = &engine;
                let target = &target;
                (path, scope.spawn(move || process_document(engine, path, target)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(path, handle)| {
                let result = handle
                    .join()
                    .unwrap_or_else(|_| Err(anyhow!("Worker for {} panicked", path.display())));
                (path.clone(), result)
            })
            .collect()
    });

    let mut reports = Vec::new();
    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failed += 1;
                error!("{}: {:#}", path.display(), e);
                eprintln!("Error: {}: {:#}", path.display(), e);
            }
        }
    }

    print_reports(&reports, cmd.json)?;
    info!("Processed {} document(s), {} failed", reports.len() + failed, failed);

    if failed > 0 {
        bail!("{} of {} document(s) failed", failed, cmd.documents.len());
    }
    Ok(())
}

fn print_reports(reports: &[EnhancementReport], json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        let rendered = serde_json::to_string_pretty(reports).context("Failed to serialize reports")?;
        writeln!(stdout, "{}", rendered)?;
    } else {
        for report in reports {
            writeln!(stdout, "{}", ranking_table::render_report(report))?;
        }
    }
    stdout.flush()?;
    Ok(())
}
