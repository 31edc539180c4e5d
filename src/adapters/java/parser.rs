//! Java parser using tree-sitter
//!
//! Lowers the tree-sitter concrete syntax tree into the domain [`AstNode`]
//! variant. Only constructs that can carry a type dependency are kept; every
//! other node is flattened so that nested instantiations are still reached.

use crate::domain::ast::{
    AstNode, CompilationUnit, ImportDecl, Parameter, TypeDecl, TypeDeclKind, TypeRef, TypeShape,
};
use crate::domain::ports::SourceParser;
use anyhow::{Context, Result, bail};
use tree_sitter::{Node, Parser};

const TYPE_KINDS: [&str; 9] = [
    "void_type",
    "integral_type",
    "floating_point_type",
    "boolean_type",
    "type_identifier",
    "scoped_type_identifier",
    "generic_type",
    "array_type",
    "annotated_type",
];

const BODY_KINDS: [&str; 5] = [
    "class_body",
    "interface_body",
    "enum_body",
    "enum_body_declarations",
    "annotation_type_body",
];

/// tree-sitter backed implementation of [`SourceParser`]
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterJavaParser;

impl TreeSitterJavaParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for TreeSitterJavaParser {
    fn parse(&self, source: &str) -> Result<CompilationUnit> {
        // tree_sitter::Parser is not Sync; one per call keeps the adapter shareable.
        let mut parser = Parser::new();
        let language = tree_sitter_java::LANGUAGE;
        parser
            .set_language(&language.into())
            .context("Failed to set Java language")?;

        let tree = parser
            .parse(source, None)
            .context("Failed to parse Java source")?;

        let root = tree.root_node();
        if root.has_error() {
            match first_error_line(&root) {
                Some(line) => bail!("syntax error at line {line}"),
                None => bail!("syntax error"),
            }
        }

        let lowering = Lowering {
            source: source.as_bytes(),
        };
        Ok(CompilationUnit::new(lowering.children(&root, false)))
    }
}

fn line_of(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn first_error_line(node: &Node) -> Option<u32> {
    if node.is_error() || node.is_missing() {
        return Some(line_of(node));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(line) = first_error_line(&child) {
                return Some(line);
            }
        }
    }
    None
}

struct Lowering<'s> {
    source: &'s [u8],
}

impl Lowering<'_> {
    fn text(&self, node: &Node) -> String {
        node.utf8_text(self.source).unwrap_or("").to_string()
    }

    /// Source text with whitespace runs collapsed
    fn normalized_text(&self, node: &Node) -> String {
        self.text(node).split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn children(&self, node: &Node, in_type_body: bool) -> Vec<AstNode> {
        let mut out = Vec::new();
        self.lower_children_into(node, in_type_body, &mut out);
        out
    }

    fn lower_children_into(&self, node: &Node, in_type_body: bool, out: &mut Vec<AstNode>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.lower_into(&child, in_type_body, out);
        }
    }

    fn lower_into(&self, node: &Node, in_type_body: bool, out: &mut Vec<AstNode>) {
        match node.kind() {
            "package_declaration" => {
                if let Some(name) = self.qualified_identifier(node) {
                    out.push(AstNode::Package {
                        name,
                        line: line_of(node),
                    });
                }
            }
            "import_declaration" => {
                if let Some(import) = self.import(node) {
                    out.push(AstNode::Import(import));
                }
            }
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration" => {
                if let Some(decl) = self.type_declaration(node, in_type_body) {
                    out.push(AstNode::Type(decl));
                }
            }
            "field_declaration" | "constant_declaration" => {
                if let Some(field) = self.field(node) {
                    out.push(field);
                }
            }
            "method_declaration" => {
                if let Some(method) = self.method(node) {
                    out.push(method);
                }
            }
            "constructor_declaration" | "compact_constructor_declaration" => {
                out.push(self.constructor(node));
            }
            "object_creation_expression" => {
                if let Some(creation) = self.object_creation(node) {
                    out.push(creation);
                }
            }
            kind => {
                let body = BODY_KINDS.contains(&kind);
                self.lower_children_into(node, body, out);
            }
        }
    }

    fn qualified_identifier(&self, node: &Node) -> Option<String> {
        let mut cursor = node.walk();
        let ident = node
            .named_children(&mut cursor)
            .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))?;
        Some(self.text(&ident).split_whitespace().collect())
    }

    fn import(&self, node: &Node) -> Option<ImportDecl> {
        let mut is_static = false;
        let mut is_wildcard = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "static" => is_static = true,
                "asterisk" => is_wildcard = true,
                _ => {}
            }
        }

        Some(ImportDecl {
            name: self.qualified_identifier(node)?,
            is_static,
            is_wildcard,
            line: line_of(node),
        })
    }

    fn type_declaration(&self, node: &Node, nested: bool) -> Option<TypeDecl> {
        let name = self.text(&node.child_by_field_name("name")?);
        let kind = match node.kind() {
            "class_declaration" => TypeDeclKind::Class,
            "interface_declaration" => TypeDeclKind::Interface,
            "enum_declaration" => TypeDeclKind::Enum,
            "record_declaration" => TypeDeclKind::Record,
            _ => TypeDeclKind::Annotation,
        };

        let mut extends = Vec::new();
        if let Some(superclass) = node.child_by_field_name("superclass") {
            self.collect_types(&superclass, &mut extends);
        }
        let mut implements = Vec::new();
        if let Some(interfaces) = node.child_by_field_name("interfaces") {
            self.collect_types(&interfaces, &mut implements);
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "extends_interfaces" {
                self.collect_types(&child, &mut extends);
            }
        }

        let members = node
            .child_by_field_name("body")
            .map(|body| self.children(&body, true))
            .unwrap_or_default();

        Some(TypeDecl {
            name,
            kind,
            nested,
            extends,
            implements,
            line: line_of(node),
            members,
        })
    }

    /// Type references under `superclass`, `super_interfaces` or `extends_interfaces`
    fn collect_types(&self, node: &Node, out: &mut Vec<TypeRef>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "type_list" {
                self.collect_types(&child, out);
            } else if TYPE_KINDS.contains(&child.kind()) {
                out.push(self.type_ref(&child));
            }
        }
    }

    fn field(&self, node: &Node) -> Option<AstNode> {
        let ty = self.type_ref(&node.child_by_field_name("type")?);

        let mut variables = Vec::new();
        let mut children = Vec::new();
        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            if let Some(name) = declarator.child_by_field_name("name") {
                variables.push(self.text(&name));
            }
            if let Some(value) = declarator.child_by_field_name("value") {
                self.lower_into(&value, false, &mut children);
            }
        }

        Some(AstNode::Field {
            ty,
            variables,
            line: line_of(node),
            children,
        })
    }

    fn method(&self, node: &Node) -> Option<AstNode> {
        let name = self.text(&node.child_by_field_name("name")?);
        let return_type = self.type_ref(&node.child_by_field_name("type")?);
        let parameters = node
            .child_by_field_name("parameters")
            .map(|params| self.parameters(&params))
            .unwrap_or_default();
        let children = node
            .child_by_field_name("body")
            .map(|body| self.children(&body, false))
            .unwrap_or_default();

        Some(AstNode::Method {
            name,
            return_type,
            parameters,
            line: line_of(node),
            children,
        })
    }

    fn constructor(&self, node: &Node) -> AstNode {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n))
            .unwrap_or_default();
        let parameters = node
            .child_by_field_name("parameters")
            .map(|params| self.parameters(&params))
            .unwrap_or_default();
        let children = node
            .child_by_field_name("body")
            .map(|body| self.children(&body, false))
            .unwrap_or_default();

        AstNode::Constructor {
            name,
            parameters,
            line: line_of(node),
            children,
        }
    }

    fn parameters(&self, node: &Node) -> Vec<Parameter> {
        let mut params = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "formal_parameter" => {
                    if let Some(ty) = child.child_by_field_name("type") {
                        let name = child
                            .child_by_field_name("name")
                            .map(|n| self.text(&n))
                            .unwrap_or_default();
                        params.push(Parameter {
                            name,
                            ty: self.type_ref(&ty),
                        });
                    }
                }
                "spread_parameter" => {
                    let mut inner = child.walk();
                    let mut ty = None;
                    let mut name = String::new();
                    for part in child.named_children(&mut inner) {
                        if ty.is_none() && TYPE_KINDS.contains(&part.kind()) {
                            ty = Some(self.type_ref(&part));
                        } else if part.kind() == "variable_declarator" {
                            name = part
                                .child_by_field_name("name")
                                .map(|n| self.text(&n))
                                .unwrap_or_default();
                        }
                    }
                    if let Some(ty) = ty {
                        params.push(Parameter { name, ty });
                    }
                }
                _ => {}
            }
        }
        params
    }

    fn object_creation(&self, node: &Node) -> Option<AstNode> {
        let type_node = node.child_by_field_name("type")?;
        let ty = self.type_ref(&type_node);

        let mut children = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.id() == type_node.id() || child.kind() == "type_arguments" {
                continue;
            }
            self.lower_into(&child, false, &mut children);
        }

        Some(AstNode::ObjectCreation {
            ty,
            line: line_of(node),
            children,
        })
    }

    fn type_ref(&self, node: &Node) -> TypeRef {
        let line = line_of(node);
        let written = self.normalized_text(node);
        let shape = match node.kind() {
            "void_type" => TypeShape::Void,
            "integral_type" | "floating_point_type" | "boolean_type" => TypeShape::Primitive,
            "type_identifier" | "scoped_type_identifier" | "generic_type" => {
                TypeShape::ClassOrInterface {
                    name: self.erased_name(node),
                }
            }
            "array_type" => match node.child_by_field_name("element") {
                Some(element) => TypeShape::Array {
                    element: Box::new(self.type_ref(&element)),
                },
                None => TypeShape::Other,
            },
            "annotated_type" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .filter(|c| TYPE_KINDS.contains(&c.kind()))
                    .last();
                return match inner {
                    Some(inner) => self.type_ref(&inner),
                    None => TypeRef {
                        written,
                        shape: TypeShape::Other,
                        line,
                    },
                };
            }
            _ => TypeShape::Other,
        };

        TypeRef {
            written,
            shape,
            line,
        }
    }

    /// Name without type arguments or annotations: `Map.Entry` for `Map.Entry<K, V>`
    fn erased_name(&self, node: &Node) -> String {
        match node.kind() {
            "type_identifier" => self.text(node),
            "generic_type" | "scoped_type_identifier" => {
                let mut cursor = node.walk();
                let parts: Vec<String> = node
                    .named_children(&mut cursor)
                    .filter(|c| {
                        matches!(
                            c.kind(),
                            "type_identifier" | "scoped_type_identifier" | "generic_type"
                        )
                    })
                    .map(|c| self.erased_name(&c))
                    .collect();
                if node.kind() == "generic_type" {
                    parts.into_iter().next().unwrap_or_default()
                } else {
                    parts.join(".")
                }
            }
            _ => self.normalized_text(node),
        }
    }
}
