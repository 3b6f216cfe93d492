use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use kinfolk_cli::{Args, run};

/// Collects all .toml family files from a directory
fn collect_family_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo families live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: Option<&Path>, output: &Path) -> Args {
    Args {
        input: input.map(|path| path.to_string_lossy().to_string()),
        output: output.to_string_lossy().to_string(),
        config: None,
        root: 0,
        width: None,
        height: None,
        remove: Vec::new(),
        list: true,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_family_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!("{}.svg", demo_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        match run(&args(Some(demo_path), &output_path)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("SVG should be written");
                assert!(svg.contains("<svg"), "{} produced no SVG", demo_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_family_files(demos_path().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args(Some(demo_path), &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_sample_family_with_overrides() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("sample.svg");

    let mut args = args(None, &output_path);
    args.width = Some(1200.0);
    args.root = 3;

    run(&args).expect("Sample family should render");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("width=\"1200\""));
    assert!(svg.contains("Jill Doe (f)"));
    assert!(!svg.contains("John Doe (m)"));
}

#[test]
fn e2e_remove_person_rerenders() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("removed.svg");

    // Remove Jill, then Jack, who keeps index 2 since he sits before her
    let mut args = args(None, &output_path);
    args.remove = vec![3, 2];

    run(&args).expect("Removals should succeed");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("John Doe (m)"));
    assert!(!svg.contains("Jill Doe (f)"));
    assert!(!svg.contains("Jack Doe (m)"));
    assert!(!svg.contains("Jenny Brown (f)"));
}

#[test]
fn e2e_invalid_root_and_removal_fail() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("invalid.svg");

    let mut bad_root = args(None, &output_path);
    bad_root.root = 50;
    assert!(run(&bad_root).is_err());

    let mut bad_removal = args(None, &output_path);
    bad_removal.remove = vec![9];
    assert!(run(&bad_removal).is_err());

    let mut missing_config = args(None, &output_path);
    missing_config.config = Some("no/such/config.toml".to_string());
    assert!(run(&missing_config).is_err());
}
