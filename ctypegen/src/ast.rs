//! Parsed declaration model
//!
//! The shapes the parser produces and the emitter consumes. Everything is
//! `Serialize` so the CLI can dump the parsed surface as JSON.

use std::fmt;

use serde::Serialize;

/// A C++ type after parsing: base name plus qualifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CppType {
    /// Normalized base name, e.g. `int`, `unsigned long`, `std::string`, `Node`
    pub name: String,
    pub is_const: bool,
    pub pointer_depth: u32,
    pub is_reference: bool,
    /// Trailing `[N]` on a field declaration
    pub array_len: Option<usize>,
}

impl CppType {
    pub fn named(name: impl Into<String>) -> Self {
        CppType {
            name: name.into(),
            is_const: false,
            pointer_depth: 0,
            is_reference: false,
            array_len: None,
        }
    }

    /// `void` with no qualifiers
    pub fn is_plain_void(&self) -> bool {
        self.name == "void" && self.pointer_depth == 0 && !self.is_reference
    }
}

impl fmt::Display for CppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_const {
            write!(f, " const")?;
        }
        for _ in 0..self.pointer_depth {
            write!(f, " *")?;
        }
        if self.is_reference {
            write!(f, " &")?;
        }
        if let Some(n) = self.array_len {
            write!(f, " [{}]", n)?;
        }
        Ok(())
    }
}

/// A function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: Option<String>,
    pub ty: CppType,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", self.ty, name),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// A free function or member function prototype
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub return_type: CppType,
    pub params: Vec<Param>,
    /// Trailing `const` on a member function
    pub is_const: bool,
}

impl FunctionDecl {
    /// Render a C++-style signature, qualified by `class_name` for members
    ///
    /// Used verbatim in generated-code comments.
    pub fn signature(&self, class_name: Option<&str>) -> String {
        let params = self
            .params
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let qualifier = match class_name {
            Some(class) => format!("{}::", class),
            None => String::new(),
        };
        let suffix = if self.is_const { " const" } else { "" };
        format!(
            "{} {}{}({}){}",
            self.return_type, qualifier, self.name, params, suffix
        )
    }
}

/// A class data member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub ty: CppType,
}

/// An `enum` with resolved enumerator values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub enumerators: Vec<(String, i64)>,
}

/// A `class` or `struct` declaration
///
/// Access specifiers are parsed but do not restrict what is recorded:
/// private members participate in the generated `_fields_` layout too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDecl {
    pub name: String,
    /// Constructors, with `return_type` set to the class type
    pub constructors: Vec<FunctionDecl>,
    pub methods: Vec<FunctionDecl>,
    pub fields: Vec<Field>,
}

/// A `typedef` or `using` alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedefDecl {
    pub name: String,
    pub ty: CppType,
}

/// Any top-level declaration, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
    Enum(EnumDecl),
    Class(ClassDecl),
    Function(FunctionDecl),
    Typedef(TypedefDecl),
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Enum(e) => &e.name,
            Decl::Class(c) => &c.name,
            Decl::Function(f) => &f.name,
            Decl::Typedef(t) => &t.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpp_type__display_const_ref__then_cpp_spelling() {
        let ty = CppType {
            name: "std::string".into(),
            is_const: true,
            pointer_depth: 0,
            is_reference: true,
            array_len: None,
        };
        assert_eq!(ty.to_string(), "std::string const &");
    }

    #[test]
    fn test_cpp_type__display_pointer__then_star() {
        let mut ty = CppType::named("Node");
        ty.pointer_depth = 1;
        assert_eq!(ty.to_string(), "Node *");
    }

    #[test]
    fn test_function_decl__free_signature__then_unqualified() {
        let decl = FunctionDecl {
            name: "add".into(),
            return_type: CppType::named("int"),
            params: vec![
                Param {
                    name: Some("a".into()),
                    ty: CppType::named("int"),
                },
                Param {
                    name: Some("b".into()),
                    ty: CppType::named("int"),
                },
            ],
            is_const: false,
        };
        assert_eq!(decl.signature(None), "int add(int a, int b)");
    }

    #[test]
    fn test_function_decl__member_signature__then_qualified_const() {
        let decl = FunctionDecl {
            name: "area".into(),
            return_type: CppType::named("double"),
            params: vec![],
            is_const: true,
        };
        assert_eq!(decl.signature(Some("Rectangle")), "double Rectangle::area() const");
    }
}
