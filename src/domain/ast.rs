//! Parser output contract
//!
//! A compilation unit is a flat list of [`AstNode`]s whose variants carry
//! their own children, so a visitor is a single recursive `match`.

/// Shape of a referenced type, as far as the parser can tell from syntax alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// Class or interface reference; `name` is the erased name as written
    /// (`Map.Entry` for `Map.Entry<K, V>`).
    ClassOrInterface { name: String },
    Primitive,
    Void,
    Array { element: Box<TypeRef> },
    /// Wildcards, `var` and anything else the grammar produces.
    Other,
}

/// A type as it appears in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Written text with whitespace normalized (`List<String>`, `int[]`)
    pub written: String,
    pub shape: TypeShape,
    /// 1-based line, 0 when unknown
    pub line: u32,
}

impl TypeRef {
    pub fn class(name: impl Into<String>, line: u32) -> Self {
        let name = name.into();
        Self {
            written: name.clone(),
            shape: TypeShape::ClassOrInterface { name },
            line,
        }
    }

    pub fn primitive(name: impl Into<String>, line: u32) -> Self {
        Self {
            written: name.into(),
            shape: TypeShape::Primitive,
            line,
        }
    }

    pub fn void(line: u32) -> Self {
        Self {
            written: "void".to_string(),
            shape: TypeShape::Void,
            line,
        }
    }

    pub fn is_class_or_interface(&self) -> bool {
        matches!(self.shape, TypeShape::ClassOrInterface { .. })
    }

    /// Innermost non-array type (`Foo` for `Foo[][]`).
    pub fn element(&self) -> &TypeRef {
        match &self.shape {
            TypeShape::Array { element } => element.element(),
            _ => self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub name: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeDeclKind,
    /// Declared directly inside another type's body
    pub nested: bool,
    pub extends: Vec<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub line: u32,
    pub members: Vec<AstNode>,
}

impl TypeDecl {
    pub fn is_class_or_interface(&self) -> bool {
        matches!(self.kind, TypeDeclKind::Class | TypeDeclKind::Interface)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Package {
        name: String,
        line: u32,
    },
    Import(ImportDecl),
    Type(TypeDecl),
    Field {
        ty: TypeRef,
        variables: Vec<String>,
        line: u32,
        /// Initializer expressions
        children: Vec<AstNode>,
    },
    Method {
        name: String,
        return_type: TypeRef,
        parameters: Vec<Parameter>,
        line: u32,
        children: Vec<AstNode>,
    },
    Constructor {
        name: String,
        parameters: Vec<Parameter>,
        line: u32,
        children: Vec<AstNode>,
    },
    ObjectCreation {
        ty: TypeRef,
        line: u32,
        /// Arguments and anonymous class body
        children: Vec<AstNode>,
    },
}

impl AstNode {
    pub fn children(&self) -> &[AstNode] {
        match self {
            AstNode::Package { .. } | AstNode::Import(_) => &[],
            AstNode::Type(decl) => &decl.members,
            AstNode::Field { children, .. }
            | AstNode::Method { children, .. }
            | AstNode::Constructor { children, .. }
            | AstNode::ObjectCreation { children, .. } => children,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            AstNode::Import(import) => import.line,
            AstNode::Type(decl) => decl.line,
            AstNode::Package { line, .. }
            | AstNode::Field { line, .. }
            | AstNode::Method { line, .. }
            | AstNode::Constructor { line, .. }
            | AstNode::ObjectCreation { line, .. } => *line,
        }
    }
}

/// Root of a parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    pub nodes: Vec<AstNode>,
}

impl CompilationUnit {
    pub fn new(nodes: Vec<AstNode>) -> Self {
        Self { nodes }
    }

    pub fn package_name(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            AstNode::Package { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.nodes.iter().filter_map(|node| match node {
            AstNode::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Top-level type declarations (nested types excluded).
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.nodes.iter().filter_map(|node| match node {
            AstNode::Type(decl) if !decl.nested => Some(decl),
            _ => None,
        })
    }

    /// Name of the first top-level class or interface.
    pub fn main_type_name(&self) -> Option<&str> {
        self.types()
            .find(|decl| decl.is_class_or_interface())
            .map(|decl| decl.name.as_str())
    }

    /// Fully-qualified name of the unit: `<package>.<MainType>`, with
    /// `UnknownClass` when no top-level class or interface exists.
    pub fn class_name(&self) -> String {
        let simple = self.main_type_name().unwrap_or("UnknownClass");
        match self.package_name() {
            Some(package) => format!("{package}.{simple}"),
            None => simple.to_string(),
        }
    }

    /// Every declared type (top-level, nested, local) with its qualified
    /// path relative to the package, e.g. `Outer.Inner`.
    pub fn declared_types(&self) -> Vec<String> {
        fn collect(nodes: &[AstNode], prefix: Option<&str>, out: &mut Vec<String>) {
            for node in nodes {
                match node {
                    AstNode::Type(decl) => {
                        let path = match prefix {
                            Some(p) if decl.nested => format!("{p}.{}", decl.name),
                            _ => decl.name.clone(),
                        };
                        collect(&decl.members, Some(&path), out);
                        out.push(path);
                    }
                    other => collect(other.children(), prefix, out),
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.nodes, None, &mut out);
        out
    }
}
