//! CLI integration tests for gtfs-openapi binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gtfs-openapi"))
}

// Helper to create a temp catalog file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const CATALOG: &str = r#"[
    {
        "fileName": "stop_times",
        "properties": [
            { "fieldName": "trip_id", "type": "Trip ID", "required": true, "description": "Identifies a trip." },
            { "fieldName": "arrival_time", "type": "Time", "required": false, "description": "Arrival time at the stop." },
            { "fieldName": "stop_sequence", "type": "Non-negative integer", "required": true, "description": "Order of stops for a particular trip." }
        ]
    }
]"#;

mod build_command {
    use super::*;

    #[test]
    fn yaml_to_stdout() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);

        cmd()
            .args(["build", catalog.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("StopTimes:"))
            .stdout(predicate::str::contains("#/MultiDayTime"))
            .stdout(predicate::str::contains("MultiDayTime:"));
    }

    #[test]
    fn json_output() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);

        cmd()
            .args(["build", catalog.to_str().unwrap(), "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""required":["trip_id","stop_sequence"]"#))
            .stdout(predicate::str::contains(
                r##""stop_sequence":{"$ref":"#/NonNegativeInteger""##,
            ));
    }

    #[test]
    fn json_pretty() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);

        cmd()
            .args([
                "build",
                catalog.to_str().unwrap(),
                "--format",
                "json",
                "--pretty",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn inlined_registry() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);

        cmd()
            .args([
                "build",
                catalog.to_str().unwrap(),
                "--format",
                "json",
                "--registry",
                "inlined",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("$ref").not())
            .stdout(predicate::str::contains(r#""stop_sequence":{"type":"integer","minimum":0"#));
    }

    #[test]
    fn singular_naming() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);

        cmd()
            .args([
                "build",
                catalog.to_str().unwrap(),
                "--format",
                "json",
                "--naming",
                "singular",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""StopTime":"#));
    }

    #[test]
    fn openapi_envelope() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);

        cmd()
            .args([
                "build",
                catalog.to_str().unwrap(),
                "--openapi",
                "--title",
                "Transit Feed",
            ])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("openapi:"))
            .stdout(predicate::str::contains("title: Transit Feed"))
            .stdout(predicate::str::contains("#/components/schemas/MultiDayTime"));
    }

    #[test]
    fn title_requires_openapi() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);

        cmd()
            .args(["build", catalog.to_str().unwrap(), "--title", "Transit"])
            .assert()
            .failure();
    }

    #[test]
    fn output_file() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);
        let output = dir.path().join("output.yaml");

        cmd()
            .args([
                "build",
                catalog.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("StopTimes:"));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", CATALOG);

        let run = || {
            cmd()
                .args(["build", catalog.to_str().unwrap()])
                .output()
                .unwrap()
                .stdout
        };
        assert_eq!(run(), run());
    }
}

mod failures {
    use super::*;

    #[test]
    fn missing_catalog_exits_3() {
        cmd()
            .args(["build", "/nonexistent/documentation.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn invalid_json_exits_2() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(&dir, "documentation.json", "{ not json");

        cmd()
            .args(["build", catalog.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid catalog JSON"));
    }

    #[test]
    fn unknown_type_exits_2_and_names_tag() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(
            &dir,
            "documentation.json",
            r#"[{"fileName":"stops","properties":[{"fieldName":"stop_mood","type":"Banana","required":false,"description":""}]}]"#,
        );

        cmd()
            .args(["build", catalog.to_str().unwrap()])
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Banana"))
            .stderr(predicate::str::contains("stop_mood"));
    }

    #[test]
    fn duplicate_schema_name_exits_2() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(
            &dir,
            "documentation.json",
            r#"[
                {"fileName":"stops","properties":[{"fieldName":"stop_id","type":"ID","required":true,"description":""}]},
                {"fileName":"stop","properties":[{"fieldName":"stop_id","type":"ID","required":true,"description":""}]}
            ]"#,
        );

        cmd()
            .args(["build", catalog.to_str().unwrap(), "--naming", "singular"])
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Stop"));
    }

    #[test]
    fn unknown_type_leaves_existing_output_untouched() {
        let dir = TempDir::new().unwrap();
        let catalog = write_temp_file(
            &dir,
            "documentation.json",
            r#"[{"fileName":"stops","properties":[{"fieldName":"x","type":"Banana","required":false,"description":""}]}]"#,
        );
        let output = write_temp_file(&dir, "output.yaml", "previous: true\n");

        cmd()
            .args([
                "build",
                catalog.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .code(2);

        assert_eq!(fs::read_to_string(&output).unwrap(), "previous: true\n");
    }
}

mod info_commands {
    use super::*;

    #[test]
    fn types_lists_vocabulary() {
        cmd()
            .arg("types")
            .assert()
            .success()
            .stdout(predicate::str::contains("non-null integer"))
            .stdout(predicate::str::contains("$ref NonNullInteger"))
            .stdout(predicate::str::contains("oneOf [Text, URL, Email, PhoneNumber]"));
    }

    #[test]
    fn registry_json() {
        cmd()
            .args(["registry", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(r#"{"Color":{"type":"string","format":"hex""#))
            .stdout(predicate::str::contains(r#""Text":{"description":"Human-readable text","type":"string","x-faker":"lorem.paragraph"}"#));
    }
}
