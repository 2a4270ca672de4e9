//! End-to-end checks of the CLI layer: parsing, config, generation, manifests.

use std::fs;
use std::path::PathBuf;

use tbgen_cli::{
    cli::{diagnostic, exit_code, parse_args},
    config::RunConfig,
    run,
};
use tbgen_core::manifest::{read_manifest_auto, write_manifest_auto};
use tbgen_core::SlotMask;

/// Fresh scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tbgen_cli_{name}_{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_for(args: &[&str]) -> RunConfig {
    let cli = parse_args(args.iter().copied()).unwrap();
    RunConfig::from_cli(&cli).unwrap()
}

#[test]
fn unknown_option_exits_with_one() {
    let err = parse_args(["tbgen", "--bogus"]).unwrap_err();
    assert_eq!(exit_code(&err), 1);
    assert!(diagnostic(&err).contains("unrecognized option: --bogus"));
}

#[test]
fn second_directory_is_rejected() {
    let err = parse_args(["tbgen", "a", "b"]).unwrap_err();
    assert_eq!(exit_code(&err), 1);
}

#[test]
fn help_exits_with_zero() {
    let err = parse_args(["tbgen", "--help"]).unwrap_err();
    assert_eq!(exit_code(&err), 0);
}

#[test]
fn near_count_flag_is_range_checked() {
    assert!(parse_args(["tbgen", "--near-count=0"]).is_err());
    assert!(parse_args(["tbgen", "--near-count=9"]).is_err());
    assert!(parse_args(["tbgen", "--near-count=8"]).is_ok());
}

#[test]
fn negative_case_count_is_rejected() {
    let err = parse_args(["tbgen", "--random-cases=-1"]).unwrap_err();
    assert_eq!(exit_code(&err), 1);
}

#[test]
fn writes_numbered_test_benches() {
    let dir = scratch_dir("numbered");
    let dir_s = dir.to_string_lossy().into_owned();
    let cfg = config_for(&["tbgen", "--random-cases=4", "--arch-name=rtl", "--seed=11", &dir_s]);

    let summary = run::generate(&cfg).unwrap();
    assert_eq!(summary.seed, 11);
    assert_eq!(summary.files.len(), 4);

    for id in 1..=4 {
        let path = dir.join(format!("test{id}.vhd"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(&format!("entity autogen_test_bench_{id} is")));
        assert!(text.contains(&format!("architecture rtl of autogen_test_bench_{id} is")));
        assert!(text.ends_with("end rtl;\n"));
    }
    assert!(!dir.join("test5.vhd").exists());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn zero_cases_writes_nothing() {
    let dir = scratch_dir("zero");
    let dir_s = dir.to_string_lossy().into_owned();
    let cfg = config_for(&["tbgen", "--random-cases=0", &dir_s]);
    let summary = run::generate(&cfg).unwrap();
    assert!(summary.files.is_empty());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn same_seed_same_files() {
    let a = scratch_dir("seed_a");
    let b = scratch_dir("seed_b");
    for dir in [&a, &b] {
        let dir_s = dir.to_string_lossy().into_owned();
        run::generate(&config_for(&["tbgen", "--random-cases=3", "--seed=99", &dir_s])).unwrap();
    }
    for id in 1..=3 {
        let name = format!("test{id}.vhd");
        assert_eq!(
            fs::read_to_string(a.join(&name)).unwrap(),
            fs::read_to_string(b.join(&name)).unwrap()
        );
    }
    let _ = fs::remove_dir_all(a);
    let _ = fs::remove_dir_all(b);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = scratch_dir("missing").join("does_not_exist");
    let dir_s = dir.to_string_lossy().into_owned();
    let cfg = config_for(&["tbgen", "--random-cases=1", &dir_s]);
    let err = run::generate(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("could not open file"));
}

#[test]
fn huge_case_count_into_missing_directory_fails_cleanly() {
    let dir = scratch_dir("huge").join("does_not_exist");
    let cfg = RunConfig {
        random_cases: u32::MAX,
        directory: dir,
        seed: Some(1),
        ..RunConfig::default()
    };
    let err = run::generate(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("could not open file"));
}

#[test]
fn profile_supplies_defaults() {
    let dir = scratch_dir("profile");
    let profile = dir.join("tbgen.toml");
    fs::write(
        &profile,
        format!(
            "random_cases = 2\narch_name = \"behav\"\nnear_count = 8\ndirectory = {:?}\n",
            dir.to_string_lossy()
        ),
    )
    .unwrap();
    let profile_s = profile.to_string_lossy().into_owned();
    let cfg = config_for(&["tbgen", "--config", &profile_s, "--seed=5"]);
    assert_eq!(cfg.random_cases, 2);
    assert_eq!(cfg.arch_name, "behav");
    assert_eq!(cfg.near_count, Some(8));
    assert_eq!(cfg.directory, dir);

    let summary = run::generate(&cfg).unwrap();
    assert_eq!(summary.files.len(), 2);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn manifest_round_trips_through_verify() {
    let dir = scratch_dir("manifest");
    let manifest = dir.join("cases.jsonl");
    let dir_s = dir.to_string_lossy().into_owned();
    let manifest_s = manifest.to_string_lossy().into_owned();
    let cfg = config_for(&[
        "tbgen",
        "--random-cases=6",
        "--near-count=2",
        "--seed=21",
        "--manifest",
        &manifest_s,
        &dir_s,
    ]);

    run::generate(&cfg).unwrap();
    let entries = read_manifest_auto(&manifest).unwrap();
    assert_eq!(entries.len(), 6);
    assert!(entries.iter().all(|e| e.near_count == 2 && e.near_slots.len() == 2));
    assert_eq!(
        entries.iter().map(|e| e.test_id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5, 6]
    );
    assert_eq!(run::verify(&manifest).unwrap(), 6);

    // Every expected output in the files matches the manifest.
    for e in &entries {
        let text = fs::read_to_string(dir.join(format!("test{}.vhd", e.test_id))).unwrap();
        let expected = format!(":= \"{:08b}\";", e.configuration.output_mask);
        assert!(text.contains(&expected));
    }
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn verify_rejects_tampered_manifest() {
    let dir = scratch_dir("tampered");
    let manifest = dir.join("cases.json");
    let dir_s = dir.to_string_lossy().into_owned();
    let manifest_s = manifest.to_string_lossy().into_owned();
    run::generate(&config_for(&[
        "tbgen",
        "--random-cases=3",
        "--seed=4",
        "--manifest",
        &manifest_s,
        &dir_s,
    ]))
    .unwrap();

    let mut entries = read_manifest_auto(&manifest).unwrap();
    let stored = entries[0].configuration.output_mask.bits();
    entries[0].configuration.output_mask = SlotMask::from_bits(stored ^ 0b1000_0000);
    write_manifest_auto(&manifest, &entries).unwrap();

    let err = run::verify(&manifest).unwrap_err();
    assert!(err.to_string().contains("1 of 3 cases"));
    let _ = fs::remove_dir_all(dir);
}
