//! Dependency extraction - AST visitor producing a [`ClassReport`]

use crate::domain::ast::{AstNode, CompilationUnit, TypeRef, TypeShape};
use crate::domain::dependency::{Dependency, DependencyKind};
use crate::domain::exclusion::should_exclude;
use crate::domain::report::ClassReport;
use crate::domain::resolver::{ResolutionScope, SymbolResolver};
use tracing::{debug, trace};

/// Dependency extractor - Domain Service turning one compilation unit into its report
pub struct DependencyExtractor<'a> {
    resolver: &'a SymbolResolver,
}

impl<'a> DependencyExtractor<'a> {
    pub fn new(resolver: &'a SymbolResolver) -> Self {
        Self { resolver }
    }

    pub fn extract(&self, unit: &CompilationUnit) -> ClassReport {
        let class_name = unit.class_name();
        let mut visitor = DependencyVisitor {
            report: ClassReport::new(class_name.clone()),
            source: class_name,
            scope: ResolutionScope::from_unit(unit),
            resolver: self.resolver,
        };

        for node in &unit.nodes {
            visitor.visit(node);
        }

        debug!(
            class = visitor.source.as_str(),
            dependencies = visitor.report.len(),
            "extracted class dependencies"
        );
        visitor.report
    }
}

struct DependencyVisitor<'a> {
    report: ClassReport,
    source: String,
    scope: ResolutionScope,
    resolver: &'a SymbolResolver,
}

impl DependencyVisitor<'_> {
    fn visit(&mut self, node: &AstNode) {
        match node {
            AstNode::Package { .. } | AstNode::Constructor { .. } => {}
            AstNode::Import(import) => {
                if !import.is_static && !import.is_wildcard {
                    self.emit(
                        import.name.clone(),
                        DependencyKind::Import,
                        format!("import {};", import.name),
                        import.line,
                    );
                }
            }
            AstNode::Type(decl) => {
                if decl.is_class_or_interface() {
                    for ty in &decl.extends {
                        self.add_type(ty, DependencyKind::Extends);
                    }
                    for ty in &decl.implements {
                        self.add_type(ty, DependencyKind::Implements);
                    }
                }
            }
            AstNode::Field { ty, variables, .. } => {
                if ty.is_class_or_interface() {
                    for _ in variables {
                        self.add_type(ty, DependencyKind::Field);
                    }
                }
            }
            AstNode::Method {
                return_type,
                parameters,
                ..
            } => {
                self.add_type(return_type, DependencyKind::MethodReturn);
                for parameter in parameters {
                    self.add_type(&parameter.ty, DependencyKind::MethodParameter);
                }
            }
            AstNode::ObjectCreation { ty, .. } => {
                self.add_type(ty, DependencyKind::Instantiation);
            }
        }

        for child in node.children() {
            self.visit(child);
        }
    }

    fn add_type(&mut self, ty: &TypeRef, kind: DependencyKind) {
        let Some(target) = self.target_name(ty) else {
            return;
        };
        let snippet = format!("{} {}", kind.snippet_prefix(), ty.written);
        self.emit(target, kind, snippet, ty.line);
    }

    fn emit(&mut self, target: String, kind: DependencyKind, snippet: String, line: u32) {
        if should_exclude(&target, &self.source) {
            return;
        }
        self.report
            .add_dependency(Dependency::new(self.source.clone(), target, kind, snippet, line));
    }

    /// Resolved name of the referenced type, or the name as written.
    fn target_name(&self, ty: &TypeRef) -> Option<String> {
        let element = ty.element();
        match &element.shape {
            TypeShape::ClassOrInterface { name } => {
                match self.resolver.resolve(name, &self.scope) {
                    Ok(Some(fqn)) => Some(fqn),
                    Ok(None) => Some(element.written.clone()),
                    Err(err) => {
                        trace!(name = name.as_str(), error = %err, "type resolution failed");
                        Some(element.written.clone())
                    }
                }
            }
            TypeShape::Void => Some("void".to_string()),
            TypeShape::Primitive => Some(element.written.clone()),
            TypeShape::Array { .. } | TypeShape::Other => None,
        }
    }
}
