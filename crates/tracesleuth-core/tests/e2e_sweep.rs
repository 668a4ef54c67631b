/// Sweep integration tests: profile orchestration over real temp trees.
///
/// The sweep layer owns labelling, per-target depths, profile extension
/// lists, and post-collection sorting; these tests pin that behaviour down
/// without depending on any host environment variables (profiles are built
/// explicitly rather than through `standard_profiles`).
use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tracesleuth_core::options::ScanOptions;
use tracesleuth_core::sweep::{
    run_profile, run_sweep, standard_profiles, SweepDepths, SweepProfile, SweepTarget,
};

fn write_file(path: &Path) {
    fs::File::create(path).expect("failed to create test file");
}

fn keyword_options() -> ScanOptions {
    ScanOptions::default().with_keywords(["cheat"])
}

#[test]
fn profile_merges_targets_and_sorts_findings() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let one = tmp.path().join("one");
    let two = tmp.path().join("two");
    fs::create_dir(&one).expect("failed to create dir");
    fs::create_dir(&two).expect("failed to create dir");
    write_file(&one.join("cheat_z.exe"));
    write_file(&two.join("cheat_a.exe"));

    let profile = SweepProfile {
        label: "User folders".to_string(),
        targets: vec![
            SweepTarget {
                root: one.clone(),
                max_depth: 3,
            },
            SweepTarget {
                root: two.clone(),
                max_depth: 3,
            },
        ],
        extensions: vec![".exe".to_string()],
    };

    let section = run_profile(&profile, &keyword_options());

    assert_eq!(section.label, "User folders");
    assert_eq!(
        section.findings,
        vec![
            one.join("cheat_z.exe").to_string_lossy().into_owned(),
            two.join("cheat_a.exe").to_string_lossy().into_owned(),
        ]
    );
    assert_eq!(section.dirs_scanned, 2);
    assert_eq!(section.unreadable_dirs, 0);
}

/// Targets that do not exist are skipped before a scan starts, so they do
/// not even count as unreadable.
#[test]
fn missing_target_is_skipped_silently() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let real = tmp.path().join("real");
    fs::create_dir(&real).expect("failed to create dir");
    write_file(&real.join("cheat_found.txt"));

    let profile = SweepProfile {
        label: "Mixed".to_string(),
        targets: vec![
            SweepTarget {
                root: tmp.path().join("missing"),
                max_depth: 2,
            },
            SweepTarget {
                root: real.clone(),
                max_depth: 2,
            },
        ],
        extensions: Vec::new(),
    };

    let section = run_profile(&profile, &keyword_options());

    assert_eq!(section.findings.len(), 1);
    assert_eq!(section.unreadable_dirs, 0);
}

/// Each target carries its own depth bound within the same profile.
#[test]
fn per_target_depth_bounds_are_honoured() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let shallow = tmp.path().join("shallow");
    let deep = tmp.path().join("deep");
    fs::create_dir_all(shallow.join("nested")).expect("failed to create dirs");
    fs::create_dir_all(deep.join("nested")).expect("failed to create dirs");
    write_file(&shallow.join("nested").join("cheat_one.txt"));
    write_file(&deep.join("nested").join("cheat_two.txt"));

    let profile = SweepProfile {
        label: "Depths".to_string(),
        targets: vec![
            SweepTarget {
                root: shallow,
                max_depth: 0,
            },
            SweepTarget {
                root: deep.clone(),
                max_depth: 2,
            },
        ],
        extensions: Vec::new(),
    };

    let section = run_profile(&profile, &keyword_options());

    assert_eq!(
        section.findings,
        vec![deep
            .join("nested")
            .join("cheat_two.txt")
            .to_string_lossy()
            .into_owned()]
    );
}

/// The profile's extension list overrides whatever the base options carry.
#[test]
fn profile_extension_list_filters_file_matches() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    write_file(&tmp.path().join("cheat_tool.exe"));
    write_file(&tmp.path().join("cheat_notes.txt"));

    let profile = SweepProfile {
        label: "Executables".to_string(),
        targets: vec![SweepTarget {
            root: tmp.path().to_path_buf(),
            max_depth: 1,
        }],
        extensions: vec![".exe".to_string()],
    };

    let section = run_profile(&profile, &keyword_options());

    assert_eq!(section.findings.len(), 1);
    assert!(section.findings[0].ends_with("cheat_tool.exe"));
}

#[test]
fn sweep_preserves_profile_order_and_labels() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    fs::create_dir(&a).expect("failed to create dir");
    fs::create_dir(&b).expect("failed to create dir");
    write_file(&a.join("cheat.txt"));

    let profiles = vec![
        SweepProfile {
            label: "First".to_string(),
            targets: vec![SweepTarget {
                root: a,
                max_depth: 1,
            }],
            extensions: Vec::new(),
        },
        SweepProfile {
            label: "Second".to_string(),
            targets: vec![SweepTarget {
                root: b,
                max_depth: 1,
            }],
            extensions: Vec::new(),
        },
    ];

    let report = run_sweep(&profiles, &keyword_options());

    let labels: Vec<&str> = report.sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["First", "Second"]);
    assert_eq!(report.total_findings(), 1);
    assert!(!report.is_clean());
}

#[test]
fn empty_sweep_is_clean() {
    let tmp = TempDir::new().expect("failed to create temp dir");

    let profiles = vec![SweepProfile {
        label: "Empty".to_string(),
        targets: vec![SweepTarget {
            root: tmp.path().to_path_buf(),
            max_depth: 1,
        }],
        extensions: Vec::new(),
    }];

    let report = run_sweep(&profiles, &keyword_options());

    assert_eq!(report.total_findings(), 0);
    assert!(report.is_clean());
}

/// The standard profile set has a stable shape whatever the host: three
/// labelled profiles, with targets present only where the environment
/// provides the corresponding root.
#[test]
fn standard_profiles_have_stable_labels() {
    let profiles = standard_profiles(&SweepDepths::default());

    let labels: Vec<&str> = profiles.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["AppData", "System folders", "Prefetch"]);
    assert!(profiles[0].extensions.contains(&".exe".to_string()));
    assert_eq!(profiles[2].extensions, vec![".pf".to_string()]);
}
