//! End-to-end scenarios over real source trees: class, package, project and
//! stream entry points, including their failure terminals.

mod common;

use common::analyser;
use common::fixtures::{ALL_KINDS, FOO_WITH_IMPORTS, JavaTree, ONLY_JDK};
use common::mock::{CountingParser, MockSourceReader};
use dependency_analyser::{
    AnalyserConfig, AnalysisRuntime, ClassEvent, Dependency, DependencyAnalyser, DependencyKind,
    ErrorKind,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;

fn analyser_with_reader(reader: impl Into<Arc<MockSourceReader>>) -> DependencyAnalyser {
    let reader: Arc<MockSourceReader> = reader.into();
    DependencyAnalyser::new(
        AnalysisRuntime::current().unwrap().with_reader(reader),
        AnalyserConfig::default(),
    )
}

#[tokio::test]
async fn test_single_file_imports() {
    let tree = JavaTree::new().file("Foo.java", FOO_WITH_IMPORTS);

    let report = analyser()
        .class_dependencies(tree.join("Foo.java"))
        .await
        .unwrap();

    assert_eq!(report.class_name(), "p.Foo");
    let expected: HashSet<Dependency> = [Dependency::new(
        "p.Foo",
        "q.Bar",
        DependencyKind::Import,
        "import q.Bar;",
        2,
    )]
    .into_iter()
    .collect();
    assert_eq!(report.dependencies(), &expected);
}

#[tokio::test]
async fn test_every_dependency_kind() {
    let tree = JavaTree::new().file("pkg/A.java", ALL_KINDS);

    let report = analyser()
        .class_dependencies(tree.join("pkg/A.java"))
        .await
        .unwrap();

    assert_eq!(report.class_name(), "pkg.A");
    let mut edges: Vec<(DependencyKind, &str, &str, u32)> = report
        .dependencies()
        .iter()
        .map(|d| (d.kind, d.target_type.as_str(), d.snippet.as_str(), d.line))
        .collect();
    edges.sort();
    assert_eq!(
        edges,
        vec![
            (DependencyKind::Extends, "B", "extends B", 3),
            (DependencyKind::Implements, "C", "implements C", 3),
            (DependencyKind::Instantiation, "G", "new G", 6),
            (DependencyKind::Field, "D", "field D", 4),
            (DependencyKind::MethodParameter, "F", "parameter F", 5),
            (DependencyKind::MethodReturn, "E", "return type E", 5),
        ]
    );
}

const STANDARD_LIBRARY_ONLY: &str = "package p;\nimport java.util.concurrent.BlockingQueue;\n\nclass Foo {\n    BlockingQueue<String> queue;\n\n    void fail() {\n        throw new ArithmeticException();\n    }\n\n    StringIndexOutOfBoundsException error() {\n        return null;\n    }\n}\n";

#[tokio::test]
async fn test_standard_library_references_never_reported() {
    let tree = JavaTree::new().file("p/Foo.java", STANDARD_LIBRARY_ONLY);
    let analyser = analyser();

    let class = analyser.class_dependencies(tree.join("p/Foo.java")).await.unwrap();
    assert_eq!(class.class_name(), "p.Foo");
    assert!(class.is_empty(), "unexpected dependencies:\n{class}");

    let project = analyser.project_dependencies(tree.path()).await.unwrap();
    assert!(project.is_empty(), "unexpected dependencies:\n{project}");
}

#[tokio::test]
async fn test_package_omits_classes_without_dependencies() {
    let tree = JavaTree::new()
        .file("p/Foo.java", FOO_WITH_IMPORTS)
        .file("p/Plain.java", ONLY_JDK);

    let report = analyser().package_dependencies(tree.join("p")).await.unwrap();

    assert_eq!(report.package_name(), "p");
    let names: Vec<_> = report.class_reports().iter().map(|c| c.class_name()).collect();
    assert_eq!(names, vec!["p.Foo"]);
}

#[tokio::test]
async fn test_project_omits_empty_packages() {
    let tree = JavaTree::new()
        .file("p1/A.java", "package p1;\n\nclass A extends Base {}\n")
        .file("p1/B.java", "package p1;\n\nclass B {\n    Widget widget;\n}\n")
        .file("p2/Plain.java", ONLY_JDK);

    let report = analyser().project_dependencies(tree.path()).await.unwrap();

    assert_eq!(report.package_reports().len(), 1);
    let package = &report.package_reports()[0];
    assert_eq!(package.package_name(), "p1");
    assert_eq!(package.class_reports().len(), 2);
    assert_eq!(
        report.project_name(),
        tree.path().file_name().unwrap().to_string_lossy()
    );
}

#[tokio::test]
async fn test_project_includes_root_directory_sources() {
    let tree = JavaTree::new()
        .file("Main.java", "class Main extends App {}\n")
        .file("sub/Helper.java", "package sub;\nclass Helper extends Base {}\n");

    let report = analyser().project_dependencies(tree.path()).await.unwrap();
    let classes: Vec<_> = report.class_reports().map(|c| c.class_name()).collect();
    assert_eq!(classes, vec!["Main", "sub.Helper"]);
}

#[tokio::test]
async fn test_class_failures() {
    let tree = JavaTree::new().file("Broken.java", "package p;\nclass Broken {\n  void m( {\n}\n");
    let analyser = analyser();

    let err = analyser
        .class_dependencies(tree.join("Missing.java"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPath);

    let err = analyser
        .class_dependencies(tree.join("Broken.java"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
    assert_eq!(err.to_string(), "Failed to parse Broken.java");
}

#[tokio::test]
async fn test_read_failures_surface_as_io() {
    let tree = JavaTree::new()
        .file("p/A.java", "package p;\nclass A extends Base {}\n")
        .file("p/B.java", "package p;\nclass B extends Base {}\n");
    let analyser = analyser_with_reader(MockSourceReader::new().deny(tree.join("p/B.java")));

    let err = analyser
        .class_dependencies(tree.join("p/B.java"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert!(err.to_string().contains("B.java"));

    let err = analyser.package_dependencies(tree.join("p")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);

    let err = analyser.project_dependencies(tree.path()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
}

#[tokio::test]
async fn test_dropping_project_future_aborts_pending_reads() {
    let tree = JavaTree::new()
        .file("a/A.java", "package a;\nclass A extends Base {}\n")
        .file("a/B.java", "package a;\nclass B extends Base {}\n")
        .file("b/C.java", "package b;\nclass C extends Base {}\n")
        .file("b/D.java", "package b;\nclass D extends Base {}\n");
    let reader = Arc::new(MockSourceReader::new().with_delay(Duration::from_millis(300)));
    let analyser = analyser_with_reader(reader.clone());

    {
        let project = analyser.project_dependencies(tree.path());
        tokio::pin!(project);
        let reads_started = async {
            while reader.started() == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        tokio::select! {
            _ = &mut project => panic!("project completed while reads were pending"),
            _ = reads_started => {}
        }
    }

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(reader.started() > 0);
    assert_eq!(reader.finished(), 0, "reads kept running after the caller went away");
}

#[tokio::test]
async fn test_reader_contents_drive_extraction() {
    let tree = JavaTree::new().file("Foo.java", "class Foo {}\n");
    let analyser = analyser_with_reader(
        MockSourceReader::new().with_file(tree.join("Foo.java"), "package x;\nclass Foo extends Bar {}\n"),
    );

    let report = analyser.class_dependencies(tree.join("Foo.java")).await.unwrap();
    assert_eq!(report.class_name(), "x.Foo");
    assert_eq!(report.len(), 1);
}

#[tokio::test]
async fn test_each_file_is_parsed_once_per_class_request() {
    let tree = JavaTree::new().file("A.java", ALL_KINDS);
    let parser = Arc::new(CountingParser::default());
    let analyser = DependencyAnalyser::with_parser(
        AnalysisRuntime::current().unwrap(),
        AnalyserConfig::default(),
        parser.clone(),
    );

    analyser.class_dependencies(tree.join("A.java")).await.unwrap();
    assert_eq!(parser.calls(), 1);
}

#[tokio::test]
async fn test_stream_on_empty_directory() {
    let tree = JavaTree::new().dir("empty");
    let items: Vec<_> = analyser()
        .analyze_dependencies_stream(tree.join("empty"))
        .subscribe()
        .collect()
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].as_ref().unwrap_err().kind(), ErrorKind::NoSources);
}

#[tokio::test]
async fn test_stream_on_two_files() {
    let tree = JavaTree::new()
        .file("src/Alpha.java", "package demo;\nimport q.Bar;\nimport java.util.*;\nclass Alpha {}\n")
        .file("src/Beta.java", "class Beta {}\n");

    let items: Vec<_> = analyser()
        .analyze_dependencies_stream(tree.path())
        .subscribe()
        .collect()
        .await;
    let events: Vec<ClassEvent> = items.into_iter().collect::<Result<_, _>>().unwrap();

    assert_eq!(
        events,
        vec![
            ClassEvent {
                class_name: "demo.Alpha".into(),
                imports: vec!["q.Bar".into()],
            },
            ClassEvent {
                class_name: "default.Beta".into(),
                imports: vec![],
            },
        ]
    );
    assert_eq!(events[0].to_string(), "demo.Alpha, q.Bar");
}

#[tokio::test]
async fn test_stream_reads_every_import_on_a_line() {
    let tree = JavaTree::new().file("Foo.java", FOO_WITH_IMPORTS);

    let items: Vec<_> = analyser()
        .analyze_dependencies_stream(tree.path())
        .subscribe()
        .collect()
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].as_ref().unwrap().to_string(),
        "p.Foo, java.util.List, q.Bar"
    );
}

#[tokio::test]
async fn test_stream_stops_at_first_read_error() {
    let tree = JavaTree::new()
        .file("A.java", "class A {}\n")
        .file("B.java", "class B {}\n")
        .file("C.java", "class C {}\n");
    let analyser = analyser_with_reader(MockSourceReader::new().deny(tree.join("B.java")));

    let items: Vec<_> = analyser
        .analyze_dependencies_stream(tree.path())
        .subscribe()
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap().class_name, "default.A");
    assert_eq!(items[1].as_ref().unwrap_err().kind(), ErrorKind::IoFailure);
}

#[tokio::test]
async fn test_stream_on_missing_root() {
    let tree = JavaTree::new();
    let mut stream = analyser()
        .analyze_dependencies_stream(tree.join("nope"))
        .subscribe();

    let first = stream.next().await.unwrap();
    assert_eq!(first.unwrap_err().kind(), ErrorKind::InvalidPath);
    assert!(stream.next().await.is_none());
}
