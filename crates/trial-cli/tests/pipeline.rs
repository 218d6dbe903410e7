//! End-to-end pipeline runs over raw extracts written to a temp directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use trial_cli::config::PipelineConfig;
use trial_cli::pipeline::{STAGES, run_pipeline};
use trial_model::{StageName, StageStatus, TableName};
use trial_store::{CanonicalStore, FileStore};

const PATIENTS: &str = "\
subject_id,gender,dob
1,M,1950-03-01
2,F,2100-06-12 00:00:00
3,F,1700-01-30 00:00:00
4,X,1960-01-01
5,M,1971-08-09
";

const ADMISSIONS: &str = "\
subject_id,hadm_id,admittime
1,100,2101-01-01 10:00:00
1,101,2102-01-01 10:00:00
2,102,2150-05-05 08:00:00
3,103,2120-02-02 12:00:00
4,104,2130-03-03 09:00:00
";

struct Workspace {
    _root: TempDir,
    config: PipelineConfig,
}

impl Workspace {
    fn new(patients: Option<&str>) -> Self {
        let root = tempfile::tempdir().unwrap();
        let raw_dir = root.path().join("raw");
        fs::create_dir_all(&raw_dir).unwrap();
        if let Some(patients) = patients {
            fs::write(raw_dir.join("PATIENTS.csv"), patients).unwrap();
        }
        fs::write(raw_dir.join("ADMISSIONS.csv"), ADMISSIONS).unwrap();

        let config = PipelineConfig {
            study_id: "ONC-7".to_string(),
            raw_dir,
            store_dir: root.path().join("canonical"),
            output_dir: root.path().join("sdtm"),
            seed: Some(2023),
            ..PipelineConfig::default()
        };
        Self {
            _root: root,
            config,
        }
    }

    fn store(&self) -> FileStore {
        FileStore::new(&self.config.store_dir)
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn full_run_stores_validates_and_exports() {
    let workspace = Workspace::new(Some(PATIENTS));
    let mut store = workspace.store();
    let run = run_pipeline(&workspace.config, &mut store);

    assert!(run.succeeded(), "{:?}", run.error);
    assert!(run.summary.succeeded());
    assert_eq!(run.summary.study_id, "ONC-7");
    assert_eq!(run.summary.skipped_sources.len(), 2);
    assert_eq!(
        run.summary.outcome(StageName::Transform).and_then(|o| o.records),
        Some(3)
    );

    // Patient 4 has an invalid gender, patient 5 no admission.
    let tables = store.load_tables().unwrap();
    let ids: Vec<i64> = tables.subjects.iter().map(|s| s.subject_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    let ages: Vec<i32> = tables.subjects.iter().map(|s| s.age).collect();
    assert_eq!(ages, vec![73, 77, 90]);
    assert!(tables.orphan_events().is_empty());

    let report = run.summary.validation.as_ref().unwrap();
    assert!(report.is_clean(), "{report:?}");

    let dm = read_lines(&workspace.config.output_dir.join("dm.csv"));
    assert_eq!(dm[0], "STUDYID,DOMAIN,USUBJID,SUBJID,RFSTDTC,AGE,AGEU,SEX,ARM");
    assert_eq!(dm.len(), 4);
    assert!(dm[1].starts_with("ONC-7,DM,ONC-7-0001,1,2023-"));
    assert!(dm[3].contains(",90,YEARS,F,"));

    let ae = read_lines(&workspace.config.output_dir.join("ae.csv"));
    assert_eq!(ae.len(), tables.adverse_events.len() + 1);
    assert!(
        workspace
            .config
            .output_dir
            .join("validation_report.json")
            .exists()
    );
    assert_eq!(run.summary.exports.len(), 3);
}

#[test]
fn missing_patients_extract_fails_transform() {
    let workspace = Workspace::new(None);
    let mut store = workspace.store();
    let run = run_pipeline(&workspace.config, &mut store);

    let error = run.error.as_ref().unwrap();
    assert!(format!("{error:#}").contains("'patients'"));
    assert_eq!(run.summary.failed_stage(), Some(StageName::Transform));
    assert_eq!(run.summary.skipped_sources.len(), 3);

    let statuses: Vec<(String, StageStatus)> = run
        .summary
        .stages
        .iter()
        .map(|o| (o.stage.to_string(), o.status))
        .collect();
    insta::assert_json_snapshot!(statuses, @r#"
    [
      [
        "ingest",
        "succeeded"
      ],
      [
        "transform",
        "failed"
      ],
      [
        "store",
        "skipped"
      ],
      [
        "validate",
        "skipped"
      ],
      [
        "map",
        "skipped"
      ],
      [
        "export",
        "skipped"
      ]
    ]
    "#);

    assert!(!store.contains(TableName::Demographics));
    assert!(!workspace.config.output_dir.join("dm.csv").exists());
}

#[test]
fn same_seed_reproduces_canonical_tables() {
    let first = Workspace::new(Some(PATIENTS));
    let second = Workspace::new(Some(PATIENTS));
    let mut first_store = first.store();
    let mut second_store = second.store();

    assert!(run_pipeline(&first.config, &mut first_store).succeeded());
    assert!(run_pipeline(&second.config, &mut second_store).succeeded());
    assert_eq!(
        first_store.load_tables().unwrap(),
        second_store.load_tables().unwrap()
    );
}

#[test]
fn rerun_replaces_previous_tables() {
    let mut workspace = Workspace::new(Some(PATIENTS));
    let mut store = workspace.store();
    assert!(run_pipeline(&workspace.config, &mut store).succeeded());

    fs::write(
        workspace.config.raw_dir.join("PATIENTS.csv"),
        "subject_id,gender,dob\n2,F,1980-01-01\n",
    )
    .unwrap();
    workspace.config.seed = Some(9);
    let run = run_pipeline(&workspace.config, &mut store);
    assert!(run.succeeded(), "{:?}", run.error);

    let tables = store.load_tables().unwrap();
    assert_eq!(tables.subjects.len(), 1);
    assert_eq!(tables.subjects[0].subject_id, 2);
    assert!(tables.adverse_events.iter().all(|e| e.subject_id == 2));
    assert_eq!(
        read_lines(&workspace.config.output_dir.join("dm.csv")).len(),
        2
    );
}

#[test]
fn every_stage_is_reported_once() {
    let workspace = Workspace::new(Some(PATIENTS));
    let mut store = workspace.store();
    let run = run_pipeline(&workspace.config, &mut store);
    let stages: Vec<StageName> = run.summary.stages.iter().map(|o| o.stage).collect();
    assert_eq!(stages, STAGES);
}
