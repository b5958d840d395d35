//! End-to-end resource creation against a scratch workspace.

use std::{fs, path::Path};

use kubeboot_codegen::{ArtifactRole, CreateResourceRequest, RunStatus, create_resource};
use kubeboot_core::WriteResult;
use tempfile::TempDir;

const RESOURCE_FILES: [&str; 6] = [
    "pkg/apis/apps/v1alpha1/widget_types.go",
    "pkg/apis/apps/v1alpha1/widget_types_test.go",
    "pkg/apis/apps/v1alpha1/v1alpha1_suite_test.go",
    "pkg/controller/widget/controller.go",
    "pkg/controller/widget/controller_test.go",
    "pkg/controller/widget/widget_suite_test.go",
];

fn widget() -> CreateResourceRequest {
    CreateResourceRequest {
        domain: "example.com".into(),
        group: "apps".into(),
        version: "v1alpha1".into(),
        kind: "Widget".into(),
        resource: None,
        repo: "github.com/acme/widgets".into(),
        boilerplate: "/*\nCopyright 2024 Acme.\n*/".into(),
    }
}

/// Every file under `root`, relative and sorted.
fn tree(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

#[test]
fn test_fresh_resource() {
    let temp = TempDir::new().unwrap();

    let report = create_resource(&widget(), temp.path()).unwrap();

    assert_eq!(report.status(), RunStatus::Completed);
    let created: Vec<_> = report
        .outcomes()
        .iter()
        .filter(|o| o.role != ArtifactRole::Prerequisite)
        .map(|o| (o.path.to_string_lossy().replace('\\', "/"), o.result))
        .collect();
    let expected: Vec<_> = RESOURCE_FILES
        .iter()
        .map(|p| (p.to_string(), WriteResult::Created))
        .collect();
    assert_eq!(created, expected);

    let types = fs::read_to_string(temp.path().join(RESOURCE_FILES[0])).unwrap();
    assert!(types.starts_with("/*\nCopyright 2024 Acme.\n*/\n\npackage v1alpha1\n"));
    assert!(types.contains("// +resource:path=widgets,strategy=WidgetStrategy\n"));
}

#[test]
fn test_fresh_resource_creates_scaffolds() {
    let temp = TempDir::new().unwrap();

    create_resource(&widget(), temp.path()).unwrap();

    let mut expected: Vec<String> = RESOURCE_FILES.iter().map(|p| p.to_string()).collect();
    expected.push("pkg/apis/apps/doc.go".into());
    expected.push("pkg/apis/apps/v1alpha1/doc.go".into());
    expected.sort();
    assert_eq!(tree(temp.path()), expected);
}

#[test]
fn test_rerun_after_manual_edit() {
    let temp = TempDir::new().unwrap();
    create_resource(&widget(), temp.path()).unwrap();

    let types = temp.path().join(RESOURCE_FILES[0]);
    let edited = "package v1alpha1\n\n// hand edited\n";
    fs::write(&types, edited).unwrap();

    let report = create_resource(&widget(), temp.path()).unwrap();

    assert_eq!(report.status(), RunStatus::CompletedWithCollisions);
    assert_eq!(fs::read_to_string(&types).unwrap(), edited);
}

#[test]
fn test_idempotence() {
    let temp = TempDir::new().unwrap();
    create_resource(&widget(), temp.path()).unwrap();
    let before: Vec<_> = tree(temp.path())
        .into_iter()
        .map(|p| fs::read(temp.path().join(&p)).unwrap())
        .collect();

    let report = create_resource(&widget(), temp.path()).unwrap();

    assert_eq!(report.status(), RunStatus::CompletedWithCollisions);
    assert_eq!(report.created().count(), 0);
    assert_eq!(report.collisions().count(), 6);
    let after: Vec<_> = tree(temp.path())
        .into_iter()
        .map(|p| fs::read(temp.path().join(&p)).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_advisory_collision_keeps_completed() {
    let temp = TempDir::new().unwrap();
    let suite = temp.path().join("pkg/apis/apps/v1alpha1/v1alpha1_suite_test.go");
    fs::create_dir_all(suite.parent().unwrap()).unwrap();
    fs::write(&suite, "package v1alpha1_test\n").unwrap();

    let report = create_resource(&widget(), temp.path()).unwrap();

    assert_eq!(report.status(), RunStatus::Completed);
    assert_eq!(report.collisions().count(), 1);
    assert_eq!(report.created().count(), 7);
}

#[test]
fn test_default_resource_name_irregular_plural() {
    let temp = TempDir::new().unwrap();
    let request = CreateResourceRequest {
        kind: "Policy".into(),
        ..widget()
    };

    create_resource(&request, temp.path()).unwrap();

    let types =
        fs::read_to_string(temp.path().join("pkg/apis/apps/v1alpha1/policy_types.go")).unwrap();
    assert!(types.contains("// +resource:path=policies,"));
    assert!(!types.contains("policys"));
}

#[test]
fn test_validation_gate() {
    let cases = [
        CreateResourceRequest {
            domain: String::new(),
            ..widget()
        },
        CreateResourceRequest {
            group: "Apps".into(),
            ..widget()
        },
        CreateResourceRequest {
            version: "beta1".into(),
            ..widget()
        },
        CreateResourceRequest {
            version: "V1".into(),
            ..widget()
        },
        CreateResourceRequest {
            kind: "widget".into(),
            ..widget()
        },
    ];

    for request in cases {
        let temp = TempDir::new().unwrap();

        let err = create_resource(&request, temp.path()).unwrap_err();

        assert!(err.is_validation(), "{request:?} should fail validation");
        assert!(tree(temp.path()).is_empty(), "{request:?} touched the filesystem");
    }
}

#[test]
fn test_naming_consistency() {
    let temp = TempDir::new().unwrap();
    create_resource(&widget(), temp.path()).unwrap();

    let read = |p: &str| fs::read_to_string(temp.path().join(p)).unwrap();
    assert!(read(RESOURCE_FILES[0]).contains("path=widgets,"));
    assert!(read(RESOURCE_FILES[1]).contains(".Widgets(\"widget-test-valid\")"));
    assert!(read(RESOURCE_FILES[3]).contains("resource=widgets\n"));
    assert!(read(RESOURCE_FILES[3]).contains("c.lister.Widgets(namespace)"));
    assert!(read(RESOURCE_FILES[4]).contains(".Widgets(\"widget-controller-test-handler\")"));
}

#[test]
fn test_naming_consistency_irregular_kinds() {
    let temp = TempDir::new().unwrap();
    let read = |p: &str| fs::read_to_string(temp.path().join(p)).unwrap();

    let person = CreateResourceRequest {
        kind: "SalesPerson".into(),
        ..widget()
    };
    create_resource(&person, temp.path()).unwrap();

    let types = read("pkg/apis/apps/v1alpha1/salesperson_types.go");
    let controller = read("pkg/controller/salesperson/controller.go");
    assert!(types.contains("// +resource:path=salespeople,"));
    assert!(controller.contains("resource=salespeople\n"));
    assert!(controller.contains("si.Factory.Apps().V1alpha1().SalesPeople()"));
    assert!(controller.contains("c.lister.Salespeople(namespace)"));
    assert!(!types.contains("salespersons"));
    assert!(!controller.contains("salespersons"));

    let metadata = CreateResourceRequest {
        kind: "ClusterMetadata".into(),
        ..widget()
    };
    create_resource(&metadata, temp.path()).unwrap();

    let types = read("pkg/apis/apps/v1alpha1/clustermetadata_types.go");
    let controller = read("pkg/controller/clustermetadata/controller.go");
    assert!(types.contains("// +resource:path=clustermetadata,"));
    assert!(controller.contains("si.Factory.Apps().V1alpha1().ClusterMetadata()"));
    assert!(!types.contains("metadatas"));
    assert!(!controller.contains("metadatas"));
}

#[test]
fn test_io_failure_aborts() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pkg"), "not a directory").unwrap();

    let err = create_resource(&widget(), temp.path()).unwrap_err();

    assert!(matches!(*err, kubeboot_core::Error::Io { .. }));
}
