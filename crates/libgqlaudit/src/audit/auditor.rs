use crate::audit::AuditConfig;
use crate::audit::AuditError;
use crate::audit::AuditReport;
use crate::audit::Result;
use crate::evolution::SchemaDiff;
use crate::evolution::UsageChecker;
use crate::evolution::diff_snapshots;
use crate::extract::FileExtraction;
use crate::issue::IssueCollector;
use crate::schema::SchemaSnapshot;
use crate::surface::SurfaceValidator;

/// Runs the configured passes over a set of file extractions.
///
/// ```
/// use libgqlaudit::audit::AuditConfig;
/// use libgqlaudit::audit::Auditor;
/// use libgqlaudit::audit::extract_files;
///
/// let extractions = extract_files(&[
///     ("ops/orders.graphql", "query { order(id: 1) { id } }"),
/// ]);
/// let report = Auditor::new(AuditConfig::default())
///     .run(&extractions)
///     .unwrap();
///
/// assert_eq!(report.issues().len(), 1);
/// assert_eq!(report.issues()[0].code.as_str(), "OPERATION_UNNAMED");
/// ```
///
/// Issues are ordered by file path. Within a file, extraction issues come
/// first, then surface issues, then evolution issues. When
/// [`AuditConfig::schema_changes`] is set, the aggregate schema comparison
/// precedes all per-file issues.
pub struct Auditor<'a> {
    config: AuditConfig,
    new_snapshot: Option<&'a SchemaSnapshot>,
    old_snapshot: Option<&'a SchemaSnapshot>,
}
impl<'a> Auditor<'a> {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            config,
            new_snapshot: None,
            old_snapshot: None,
        }
    }

    pub fn with_snapshots(mut self, old: &'a SchemaSnapshot, new: &'a SchemaSnapshot) -> Self {
        self.old_snapshot = Some(old);
        self.new_snapshot = Some(new);
        self
    }

    pub fn with_old_snapshot(mut self, old: &'a SchemaSnapshot) -> Self {
        self.old_snapshot = Some(old);
        self
    }

    pub fn with_new_snapshot(mut self, new: &'a SchemaSnapshot) -> Self {
        self.new_snapshot = Some(new);
        self
    }

    fn evolution_inputs(&self) -> Result<Option<(&'a SchemaSnapshot, SchemaDiff)>> {
        if !self.config.schema_evolution {
            return Ok(None);
        }
        match (self.old_snapshot, self.new_snapshot) {
            (Some(old), Some(new)) => Ok(Some((old, diff_snapshots(old, new)))),
            (None, Some(_)) => Err(AuditError::MissingSnapshot {
                which: "old".to_string(),
            }),
            (Some(_), None) => Err(AuditError::MissingSnapshot {
                which: "new".to_string(),
            }),
            (None, None) => Err(AuditError::MissingSnapshot {
                which: "old and new".to_string(),
            }),
        }
    }

    pub fn run(&self, extractions: &[FileExtraction]) -> Result<AuditReport> {
        let evolution = self.evolution_inputs()?;

        let mut ordered: Vec<&FileExtraction> = extractions.iter().collect();
        ordered.sort_by(|a, b| a.path.cmp(&b.path));

        let mut collector = IssueCollector::new();
        if self.config.schema_changes
            && let Some((_, diff)) = &evolution {
            collector.extend(diff.to_issues());
        }

        let mut surface = SurfaceValidator::new(&self.config.rules)
            .with_fragments_from(ordered.iter().flat_map(|extraction| &extraction.blocks));
        let usage = evolution.as_ref().map(|(old, diff)| UsageChecker::new(old, diff));

        let mut blocks_checked = 0;
        for extraction in &ordered {
            blocks_checked += extraction.blocks.len();
            collector.extend(extraction.issues.iter().cloned());
            if self.config.surface {
                collector.extend(surface.validate(&extraction.blocks));
            }
            if let Some(usage) = &usage {
                collector.extend(usage.check(&extraction.blocks));
            }
        }

        log::debug!(
            "Audited {} blocks in {} files: {} issues.",
            blocks_checked,
            ordered.len(),
            collector.len(),
        );

        let (diff, summary) = match evolution {
            Some((_, diff)) => {
                let summary = diff.summary();
                (Some(diff), Some(summary))
            },
            None => (None, None),
        };
        Ok(AuditReport {
            issues: collector,
            files_scanned: ordered.len(),
            blocks_checked,
            files_unreadable: vec![],
            diff,
            summary,
        })
    }
}
