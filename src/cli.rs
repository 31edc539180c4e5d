use crate::app::coordinator::DependencyAnalyser;
use crate::app::dto::{ChainDto, ClassEventDto, ClassReportDto, PackageReportDto, ProjectReportDto};
use crate::app::stream::ClassEvent;
use crate::graph::DependencyGraph;
use anyhow::{Context as _, Result, bail};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tokio_stream::StreamExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

fn render<T: Serialize>(text: &dyn Display, dto: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => text.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(dto)?,
    })
}

pub fn print_class_report(analyser: &DependencyAnalyser, path: &Path, format: OutputFormat) -> Result<()> {
    let report = analyser
        .runtime()
        .block_on(analyser.class_dependencies(path))
        .with_context(|| format!("Failed to analyse class {}", path.display()))?;
    println!("{}", render(&report, &ClassReportDto::from(&report), format)?);
    Ok(())
}

pub fn print_package_report(
    analyser: &DependencyAnalyser,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let report = analyser
        .runtime()
        .block_on(analyser.package_dependencies(path))
        .with_context(|| format!("Failed to analyse package {}", path.display()))?;
    println!("{}", render(&report, &PackageReportDto::from(&report), format)?);
    Ok(())
}

pub fn print_project_report(
    analyser: &DependencyAnalyser,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let report = analyser
        .runtime()
        .block_on(analyser.project_dependencies(path))
        .with_context(|| format!("Failed to analyse project {}", path.display()))?;
    println!("{}", render(&report, &ProjectReportDto::from(&report), format)?);
    Ok(())
}

/// Print each stream event as it arrives: `class, import, ...` per line, or
/// one JSON object per line.
pub fn print_stream(analyser: &DependencyAnalyser, path: &Path, format: OutputFormat) -> Result<()> {
    let files = analyser.runtime().block_on(async {
        let mut events = analyser.analyze_dependencies_stream(path).subscribe();
        let mut files = 0usize;
        while let Some(item) = events.next().await {
            let event = item.with_context(|| format!("Stream over {} failed", path.display()))?;
            match format {
                OutputFormat::Text => println!("{event}"),
                OutputFormat::Json => println!("{}", serde_json::to_string(&ClassEventDto::from(event))?),
            }
            files += 1;
        }
        anyhow::Ok(files)
    })?;

    if format == OutputFormat::Text {
        eprintln!("Analysis complete: {files} file(s)");
    }
    Ok(())
}

/// Class, package and project reports, each stage started after the last.
pub fn print_chain(
    analyser: &DependencyAnalyser,
    class: &Path,
    package: &Path,
    project: &Path,
    format: OutputFormat,
) -> Result<()> {
    let chain = analyser
        .runtime()
        .block_on(analyser.chain(class, package, project))
        .context("Incremental analysis failed")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ChainDto::from(&chain))?),
        OutputFormat::Text => {
            println!("=== Class Report ===");
            println!("{}", chain.class);
            println!("=== Package Report ===");
            println!("{}", chain.package);
            println!("=== Project Report ===");
            println!("{}", chain.project);
        }
    }
    Ok(())
}

/// Graphviz DOT of a project, from the full reports or from stream events.
pub fn print_graph(analyser: &DependencyAnalyser, path: &Path, from_stream: bool) -> Result<()> {
    let graph = if from_stream {
        let events: Vec<ClassEvent> = analyser.runtime().block_on(async {
            let mut stream = analyser.analyze_dependencies_stream(path).subscribe();
            let mut events = Vec::new();
            while let Some(item) = stream.next().await {
                events.push(item?);
            }
            anyhow::Ok(events)
        })?;
        DependencyGraph::from_events(&events)
    } else {
        let report = analyser
            .runtime()
            .block_on(analyser.project_dependencies(path))
            .with_context(|| format!("Failed to analyse project {}", path.display()))?;
        DependencyGraph::from_project(&report)
    };

    if graph.node_count() == 0 {
        bail!("No dependencies found under {}", path.display());
    }
    print!("{}", graph.to_dot());
    Ok(())
}
