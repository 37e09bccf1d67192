//! Multi-step workflows against a persisted console in a temp directory.
//!
//! Each step goes through `ConsolePaths::update`/`read`, so every mutation is
//! saved and reloaded before the next listing is computed.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use roster_core::config::ProjectConfig;
use roster_core::draft::{AllocationDraft, CandidateDraft, JobDraft};
use roster_core::model::{
    AllocationStatus, Asset, AssetStatus, AssetType, ClearanceAction, ClearanceRecord,
    ClearanceStatus, Condition, JobRequestStatus, JobStatus, Priority,
};
use roster_core::mutation::{self, Session};
use roster_core::stats::{ClearanceStats, Dashboard, ProcurementStats};
use roster_core::{ConsolePaths, Filter, RosterError, Selection};
use tempfile::TempDir;

const WAIT: Duration = Duration::from_millis(500);

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).expect("valid date")
}

fn laptop(id: &str, name: &str, brand: &str) -> Asset {
    Asset {
        id: id.to_string(),
        name: name.to_string(),
        kind: AssetType::Hardware,
        category: "Laptop".to_string(),
        serial_number: format!("SN-{id}"),
        model: name.to_string(),
        brand: brand.to_string(),
        status: AssetStatus::Available,
        condition: Condition::New,
        purchase_date: date(1, 15),
        purchase_price: 2499,
        warranty: date(12, 31),
        location: "IT Store Room A".to_string(),
        assigned_to: None,
        assigned_date: None,
        job_id: None,
        notes: None,
        last_updated: date(1, 15),
    }
}

fn clearance(n: u32, status: ClearanceStatus) -> ClearanceRecord {
    ClearanceRecord {
        id: format!("CLR-{n:03}"),
        employee_id: format!("EMP-{n:03}"),
        employee_name: format!("Leaver {n}"),
        department: if n % 2 == 0 { "Finance" } else { "IT Department" }.to_string(),
        position: "Analyst".to_string(),
        manager: "Maria Garcia".to_string(),
        lwd: date(6, 28),
        resignation_date: date(5, 28),
        clearance_status: status,
        priority: Priority::Medium,
        notes: None,
        created_date: date(5, 29),
        last_updated: date(5, 29),
        cleared_by: None,
        clearance_date: None,
        clearance_progress: 25,
    }
}

fn seeded() -> (TempDir, ConsolePaths) {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = ConsolePaths::new(dir.path());
    paths.init(false, WAIT).expect("init");
    paths
        .update(WAIT, |console| {
            mutation::add_asset(console, laptop("AST-LP-001", "MacBook Pro 16\"", "Apple"))?;
            mutation::add_asset(console, laptop("AST-LP-002", "Dell XPS 15", "Dell"))?;
            for n in 1..=5 {
                mutation::open_clearance(console, clearance(n, ClearanceStatus::Pending))?;
            }
            Ok(())
        })
        .expect("seed");
    (dir, paths)
}

#[test]
fn search_then_allocate_then_refilter() {
    let (_dir, paths) = seeded();
    let config = ProjectConfig::default();
    let session = Session::new(&config, now());

    let console = paths.read(WAIT).expect("read");
    let mac = Filter::new().with_text("mac");
    let ids: Vec<&str> = console.assets.list(&mac).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["AST-LP-001"]);

    let draft = AllocationDraft {
        employee_name: "Priya Raman".to_string(),
        employee_id: "EMP-099".to_string(),
        job_id: Some("JOB-2024-0042".to_string()),
        expected_return_date: Some(date(12, 31)),
        notes: None,
    };
    let created = paths
        .update(WAIT, |console| {
            mutation::allocate_assets(console, &session, &["AST-LP-002".to_string()], &draft)
        })
        .expect("allocate");
    assert_eq!(created.len(), 1);

    let console = paths.read(WAIT).expect("read");
    let asset = console.assets.get("AST-LP-002").expect("asset");
    assert_eq!(asset.status, AssetStatus::Allocated);
    assert_eq!(asset.assigned_to.as_deref(), Some("Priya Raman"));
    assert_eq!(asset.job_id.as_deref(), Some("JOB-2024-0042"));

    let for_asset: Vec<_> = console
        .allocations
        .iter()
        .filter(|a| a.asset_id == "AST-LP-002")
        .collect();
    assert_eq!(for_asset.len(), 1);
    assert_eq!(for_asset[0].status, AllocationStatus::Allocated);
    assert_eq!(for_asset[0].allocated_by, "Current User");

    let available = Filter::new().with_status(AssetStatus::Available);
    assert_eq!(console.assets.visible_ids(&available), ["AST-LP-001"]);
    let allocated = Filter::new().with_status(AssetStatus::Allocated);
    assert_eq!(console.assets.visible_ids(&allocated), ["AST-LP-002"]);
}

#[test]
fn bulk_approve_over_visible_selection() {
    let (_dir, paths) = seeded();
    let config = ProjectConfig::default();
    let session = Session::new(&config, now());

    let console = paths.read(WAIT).expect("read");
    let it_only = Filter::new().with_category("IT Department");
    let visible = console.clearances.visible_ids(&it_only);
    assert_eq!(visible, ["CLR-001", "CLR-003", "CLR-005"]);

    let mut selection = Selection::new();
    selection.select_all(visible.iter().cloned());
    selection.select("CLR-002");
    let targets = selection.effective(visible.iter().map(String::as_str));
    assert_eq!(targets.len(), 3);

    let outcome = paths
        .update(WAIT, |console| {
            mutation::apply_clearance_action(console, &session, &targets, ClearanceAction::Approve)
        })
        .expect("approve");
    assert_eq!(outcome.count, 3);

    let console = paths.read(WAIT).expect("read");
    for record in &console.clearances {
        let approved = targets.contains(&record.id);
        assert_eq!(record.clearance_status == ClearanceStatus::Completed, approved);
        assert_eq!(record.clearance_progress == 100, approved);
        if approved {
            assert_eq!(record.cleared_by.as_deref(), Some("Bulk Process"));
            assert_eq!(record.clearance_date, Some(date(6, 3)));
        }
    }

    let stats = ClearanceStats::compute(&console.clearances);
    assert_eq!((stats.total, stats.pending, stats.completed), (5, 2, 3));

    let done = Filter::new().with_status(ClearanceStatus::Completed);
    assert_eq!(console.clearances.visible_ids(&done), targets);
}

#[test]
fn rejected_batch_leaves_snapshot_untouched() {
    let (_dir, paths) = seeded();
    let config = ProjectConfig::default();
    let session = Session::new(&config, now());
    let before = paths.read(WAIT).expect("read");

    let err = paths
        .update(WAIT, |console| {
            let ids = ["CLR-001".to_string(), "CLR-404".to_string()];
            mutation::apply_clearance_action(console, &session, &ids, ClearanceAction::Escalate)
        })
        .expect_err("unknown id");
    assert!(matches!(err, RosterError::NotFound { .. }));
    assert_eq!(paths.read(WAIT).expect("read"), before);
}

#[test]
fn requisition_to_provisioning() {
    let (_dir, paths) = seeded();
    let config = ProjectConfig::default();
    let session = Session::new(&config, now());
    let mut rng = StdRng::seed_from_u64(2024);

    let mut job = JobDraft {
        hod: "John Manager".to_string(),
        department: "IT Department".to_string(),
        title: "Senior Software Engineer".to_string(),
        experience: "5+ years".to_string(),
        doj: Some(date(7, 1)),
        description: "Backend services".to_string(),
        skills_required: "Rust, SQL".to_string(),
        priority: Priority::High,
        ..JobDraft::default()
    };
    job.add_hardware("Laptop");
    job.add_hardware("Monitor");
    job.add_software("IDE");

    let job_id = paths
        .update(WAIT, |console| mutation::create_job(console, &session, &job, &mut rng))
        .expect("create job");
    paths
        .update(WAIT, |console| mutation::approve_job(console, &session, &job_id))
        .expect("approve job");

    let candidate = CandidateDraft {
        name: "Alex Kim".to_string(),
        email: "alex.kim@example.com".to_string(),
        phone: "+1-555-0100".to_string(),
        address: "12 Main St".to_string(),
        actual_doj: Some(date(7, 1)),
        ..CandidateDraft::default()
    };
    let submission = paths
        .update(WAIT, |console| {
            mutation::submit_candidate(console, &session, &job_id, &candidate, &mut rng)
        })
        .expect("submit");
    assert_eq!(submission.ticket_ids.len(), 3);

    let console = paths.read(WAIT).expect("read");
    assert_eq!(
        console.jobs.get(&job_id).map(|j| j.status),
        Some(JobStatus::Approved)
    );
    let request = console.job_requests.get(&job_id).expect("request");
    assert_eq!(request.status, JobRequestStatus::Processed);
    assert_eq!(request.hardware_requirements, ["Laptop", "Monitor"]);
    assert_eq!(
        request.selected_candidate.as_ref().map(|c| c.profile.name.as_str()),
        Some("Alex Kim")
    );

    let procurement = ProcurementStats::compute(&console.job_requests);
    assert_eq!((procurement.new, procurement.processed), (0, 1));

    let dashboard = Dashboard::compute(&console);
    assert_eq!(dashboard.jobs.active, 1);
    assert_eq!(dashboard.assets.available, 2);
    assert_eq!(dashboard.asset_utilization_pct, 87);
}
