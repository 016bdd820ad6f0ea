use clap::Parser;
use dupereview::cli::Cli;
use dupereview::duplicates::{group, EquivalenceMode};
use dupereview::error::ExitCode;
use dupereview::output::{ClassifyOutput, CsvOutput, FileStatus, JsonOutput};
use dupereview::scanner::{Enumerator, Walker, WalkerConfig};
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sample_tree(root: &Path) {
    write(root, "a/photo.jpg", b"0123456789");
    write(root, "b/photo.jpg", b"0123456789");
    write(root, "c/photo.jpg", b"01234");
    write(root, "c/notes.txt", b"unique");
}

#[test]
fn test_csv_export_from_scan() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());

    let records = Walker::new(WalkerConfig::default())
        .enumerate(dir.path())
        .unwrap();
    let groups = group(&records, Some(EquivalenceMode::ByNameAndSize));

    let csv_path = dir.path().join("report.csv");
    let file = fs::File::create(&csv_path).unwrap();
    CsvOutput::new(&groups).write_to(file).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["group_id", "group_key", "size", "name", "path"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(&row[0], "1");
        assert_eq!(&row[1], "photo.jpg (10 bytes)");
        assert_eq!(&row[2], "10");
        assert_eq!(&row[3], "photo.jpg");
    }
    assert_eq!(
        &rows[0][4],
        dir.path().join("a/photo.jpg").to_string_lossy()
    );
}

#[test]
fn test_json_export_from_scan() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());

    let records = Walker::new(WalkerConfig::default())
        .enumerate(dir.path())
        .unwrap();
    let groups = group(&records, Some(EquivalenceMode::ByName));

    let mut buffer = Vec::new();
    JsonOutput::new(&groups, dir.path())
        .write_to(&mut buffer, false)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(value["mode"], "name");
    assert_eq!(value["mode_coerced"], false);
    assert_eq!(value["summary"]["groups"], 1);
    assert_eq!(value["summary"]["files"], 3);
    assert_eq!(value["summary"]["total_size"], 25);

    let group = &value["groups"][0];
    assert_eq!(group["key"], "photo.jpg");
    let sizes: Vec<u64> = group["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["size"].as_u64().unwrap())
        .collect();
    assert_eq!(sizes, vec![10, 10, 5]);
}

#[test]
fn test_json_export_reports_coercion() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());

    let records = Walker::new(WalkerConfig::default())
        .enumerate(dir.path())
        .unwrap();
    let groups = group(&records, None);

    let json = JsonOutput::new(&groups, dir.path()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["mode_coerced"], true);
    assert_eq!(value["mode"], "name");
}

#[test]
fn test_exports_with_no_duplicates() {
    let dir = tempdir().unwrap();
    write(dir.path(), "only.txt", b"1");

    let records = Walker::new(WalkerConfig::default())
        .enumerate(dir.path())
        .unwrap();
    let groups = group(&records, Some(EquivalenceMode::BySize));

    let csv_text = CsvOutput::new(&groups).to_string().unwrap();
    assert_eq!(csv_text.lines().count(), 1);

    let json = JsonOutput::new(&groups, dir.path()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["groups"].as_array().unwrap().len(), 0);
    assert_eq!(value["summary"]["files"], 0);
}

#[test]
fn test_status_report_labels_every_file() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());

    let records = Walker::new(WalkerConfig::default())
        .enumerate(dir.path())
        .unwrap();
    let report = ClassifyOutput::new(&records);

    assert_eq!(report.count(FileStatus::Duplicate), 2);
    assert_eq!(report.count(FileStatus::Variant), 1);
    assert_eq!(report.count(FileStatus::Unique), 1);

    let csv_path = dir.path().join("status.csv");
    report
        .write_to(fs::File::create(&csv_path).unwrap())
        .unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<(String, String, String)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[2].to_string(), r[4].to_string())
        })
        .collect();
    let path = |rel: &str| dir.path().join(rel).to_string_lossy().into_owned();

    assert_eq!(
        rows,
        vec![
            ("DUP".to_string(), "10".to_string(), path("a/photo.jpg")),
            ("DUP".to_string(), "10".to_string(), path("b/photo.jpg")),
            ("VAR".to_string(), "5".to_string(), path("c/photo.jpg")),
            ("OK".to_string(), "6".to_string(), path("c/notes.txt")),
        ]
    );
}

#[test]
fn test_report_classify_command_writes_file() {
    let dir = tempdir().unwrap();
    let tree = dir.path().join("tree");
    sample_tree(&tree);
    let out = dir.path().join("result.csv");

    let args: Vec<OsString> = vec![
        "dupereview".into(),
        "-q".into(),
        "report".into(),
        tree.into(),
        "--classify".into(),
        "--output".into(),
        out.clone().into(),
    ];
    let cli = Cli::try_parse_from(args).unwrap();
    let code = dupereview::run_app(cli).unwrap();

    assert_eq!(code, ExitCode::Success);
    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("status,color,size,name,path"));
    assert!(lines.next().unwrap().starts_with("DUP,#FF0000,10,photo.jpg,"));
    assert_eq!(text.lines().count(), 5);
}
