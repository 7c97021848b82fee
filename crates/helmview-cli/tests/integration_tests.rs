//! Integration tests for CLI commands

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to run helmview command
fn helmview(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_helmview"))
        .args(args)
        .output()
        .expect("Failed to execute helmview")
}

/// Create a minimal chart in a temp directory
fn create_test_chart(values_yaml: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("Chart.yaml"),
        r#"apiVersion: v2
name: test-chart
version: 1.0.0
description: Test chart for integration tests
"#,
    )
    .unwrap();
    fs::write(dir.path().join("values.yaml"), values_yaml).unwrap();
    dir
}

fn write_rendered_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("rendered.txt");
    fs::write(
        &path,
        "\
---
# Source: demo/templates/configmap.yaml
apiVersion: v1
kind: ConfigMap
---
# Source: demo/templates/service.yaml
apiVersion: v1
kind: Service
",
    )
    .unwrap();
    path
}

mod split_command {
    use super::*;

    #[test]
    fn test_split_prints_entries() {
        let dir = TempDir::new().unwrap();
        let input = write_rendered_fixture(dir.path());

        let output = helmview(&["split", input.to_str().unwrap()]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("# Source: demo/templates/configmap.yaml"));
        assert!(stdout.contains("kind: Service"));
    }

    #[test]
    fn test_split_list_preserves_order() {
        let dir = TempDir::new().unwrap();
        let input = write_rendered_fixture(dir.path());

        let output = helmview(&["split", input.to_str().unwrap(), "--list"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(
            lines,
            vec![
                "demo/templates/configmap.yaml",
                "demo/templates/service.yaml"
            ]
        );
    }

    #[test]
    fn test_split_output_dir_writes_files() {
        let dir = TempDir::new().unwrap();
        let input = write_rendered_fixture(dir.path());
        let out = dir.path().join("out");

        let output = helmview(&[
            "split",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ]);

        assert!(output.status.success());
        let written = out.join("demo/templates/configmap.yaml");
        assert!(written.exists());
        let content = fs::read_to_string(written).unwrap();
        assert!(content.contains("kind: ConfigMap"));
    }

    #[test]
    fn test_split_no_markers_warns() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plain.yaml");
        fs::write(&input, "kind: ConfigMap\n").unwrap();

        let output = helmview(&["split", input.to_str().unwrap()]);

        // Degrades to empty output with a warning, never an error
        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("no '# Source:' markers"));
    }
}

mod preview_command {
    use super::*;

    const CONFIGMAP_TEMPLATE: &str = r#"data:
  config.json: |
{{#if (lookup Values.data "config.json")}}{{#each (splitLines (lookup Values.data "config.json"))}}    {{this}}
{{/each}}{{else}}    {}
{{/if}}"#;

    #[test]
    fn test_preview_renders_lines() {
        let chart = create_test_chart("data:\n  config.json: \"l1\\nl2\"\n");
        let template_path = chart.path().join("preview.tpl");
        fs::write(&template_path, CONFIGMAP_TEMPLATE).unwrap();

        let output = helmview(&[
            "preview",
            template_path.to_str().unwrap(),
            chart.path().to_str().unwrap(),
        ]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("    l1\n"));
        assert!(stdout.contains("    l2\n"));
    }

    #[test]
    fn test_preview_else_branch_on_missing_data() {
        let chart = create_test_chart("data: {}\n");
        let template_path = chart.path().join("preview.tpl");
        fs::write(&template_path, CONFIGMAP_TEMPLATE).unwrap();

        let output = helmview(&[
            "preview",
            template_path.to_str().unwrap(),
            chart.path().to_str().unwrap(),
        ]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("    {}\n"));
    }

    #[test]
    fn test_preview_values_file_override() {
        let chart = create_test_chart("data: {}\n");
        let template_path = chart.path().join("preview.tpl");
        fs::write(&template_path, CONFIGMAP_TEMPLATE).unwrap();
        let override_path = chart.path().join("override.yaml");
        fs::write(&override_path, "data:\n  config.json: \"overridden\"\n").unwrap();

        let output = helmview(&[
            "preview",
            template_path.to_str().unwrap(),
            chart.path().to_str().unwrap(),
            "-f",
            override_path.to_str().unwrap(),
        ]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("    overridden\n"));
    }
}

mod values_command {
    use super::*;

    #[test]
    fn test_values_get() {
        let chart = create_test_chart("image:\n  tag: v1.2\nreplicas: 3\n");

        let output = helmview(&[
            "values",
            "get",
            chart.path().to_str().unwrap(),
            "image.tag",
        ]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("v1.2"));
    }

    #[test]
    fn test_values_get_missing_path_fails() {
        let chart = create_test_chart("replicas: 3\n");

        let output = helmview(&[
            "values",
            "get",
            chart.path().to_str().unwrap(),
            "does.not.exist",
        ]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("no value at path"));
    }

    #[test]
    fn test_values_set_roundtrip() {
        let chart = create_test_chart("image:\n  tag: v1\n");

        let output = helmview(&[
            "values",
            "set",
            chart.path().to_str().unwrap(),
            "image.tag",
            "v2",
        ]);
        assert!(output.status.success());

        let output = helmview(&[
            "values",
            "get",
            chart.path().to_str().unwrap(),
            "image.tag",
        ]);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("v2"));
    }

    #[test]
    fn test_values_set_coerces_numbers() {
        let chart = create_test_chart("replicas: 1\n");

        helmview(&[
            "values",
            "set",
            chart.path().to_str().unwrap(),
            "replicas",
            "5",
        ]);

        let content = fs::read_to_string(chart.path().join("values.yaml")).unwrap();
        assert!(content.contains("replicas: 5"));
    }
}

mod show_command {
    use super::*;

    #[test]
    fn test_show_chart_metadata() {
        let chart = create_test_chart("replicas: 1\n");

        let output = helmview(&["show", chart.path().to_str().unwrap()]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("test-chart"));
        assert!(stdout.contains("v1.0.0"));
        assert!(stdout.contains("values.yaml"));
    }

    #[test]
    fn test_show_missing_chart_fails() {
        let dir = TempDir::new().unwrap();

        let output = helmview(&["show", dir.path().to_str().unwrap()]);

        assert!(!output.status.success());
    }
}

mod template_command {
    use super::*;

    #[test]
    fn test_template_missing_chart_fails_before_helm() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-chart");

        let output = helmview(&["template", "rel", missing.to_str().unwrap()]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Failed to load chart"));
    }
}
