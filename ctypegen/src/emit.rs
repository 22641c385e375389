//! Python ctypes code generation
//!
//! Lowers the parsed declarations into a Python module: enums become
//! `IntEnum` classes, free functions become `ctypes.CFUNCTYPE` values,
//! classes become `ctypes.Structure` subclasses whose `_fields_` carry
//! data members and member-function slots, aliases become assignments.
//!
//! A class referenced by pointer before its own definition (including a
//! self-referential class) is split: a pre-definition stub
//! `class X(ctypes.Structure): pass` goes out first and the `_fields_`
//! list is assigned post-definition.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use crate::ast::{ClassDecl, CppType, Decl, EnumDecl, FunctionDecl, TypedefDecl};
use crate::error::{BindError, BindResult};
use crate::types::{builtin_ctype, pointer_shorthand};

/// Emitter options
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Emit `#` comments carrying the original C++ signatures
    pub comments: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions { comments: true }
    }
}

/// Where a type occurs; `void` is only valid as a return type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Return,
    Value,
}

/// Generate the Python module text for a set of declarations
pub fn generate_module(decls: &[Decl], options: &EmitOptions) -> BindResult<String> {
    Emitter::new(decls, options).generate()
}

struct Emitter<'a> {
    decls: &'a [Decl],
    options: &'a EmitOptions,
    enum_names: HashSet<String>,
    typedef_names: HashSet<String>,
    /// Class name -> position in `decls`
    class_index: HashMap<String, usize>,
    /// Classes that need a pre-definition stub
    stubbed: HashSet<String>,
}

impl<'a> Emitter<'a> {
    fn new(decls: &'a [Decl], options: &'a EmitOptions) -> Self {
        let mut enum_names = HashSet::new();
        let mut typedef_names = HashSet::new();
        let mut class_index = HashMap::new();
        for (i, decl) in decls.iter().enumerate() {
            match decl {
                Decl::Enum(e) => {
                    enum_names.insert(e.name.clone());
                }
                Decl::Typedef(t) => {
                    typedef_names.insert(t.name.clone());
                }
                Decl::Class(c) => {
                    class_index.insert(c.name.clone(), i);
                }
                Decl::Function(_) => {}
            }
        }

        let mut emitter = Emitter {
            decls,
            options,
            enum_names,
            typedef_names,
            class_index,
            stubbed: HashSet::new(),
        };
        emitter.stubbed = emitter.find_forward_referenced();
        emitter
    }

    /// Classes referenced at or before the point of their own definition
    fn find_forward_referenced(&self) -> HashSet<String> {
        let mut stubbed = HashSet::new();
        for (i, decl) in self.decls.iter().enumerate() {
            for name in referenced_type_names(decl) {
                if let Some(&def_index) = self.class_index.get(&name) {
                    if def_index >= i {
                        stubbed.insert(name);
                    }
                }
            }
        }
        stubbed
    }

    fn generate(&self) -> BindResult<String> {
        let mut out = String::new();

        out.push_str("import ctypes\n");
        if self.decls.iter().any(|d| matches!(d, Decl::Enum(_))) {
            out.push_str("from enum import IntEnum\n");
        }

        // Pre-definition stubs, in declaration order
        for decl in self.decls {
            if let Decl::Class(class) = decl {
                if self.stubbed.contains(&class.name) {
                    out.push('\n');
                    self.comment(&mut out, &format!("Structure for {} (pre-definition)", class.name));
                    let _ = writeln!(out, "class {}(ctypes.Structure):", class.name);
                    out.push_str("    pass\n");
                }
            }
        }

        for decl in self.decls {
            out.push('\n');
            match decl {
                Decl::Enum(e) => self.emit_enum(&mut out, e),
                Decl::Function(f) => self.emit_function(&mut out, f)?,
                Decl::Class(c) => self.emit_class(&mut out, c)?,
                Decl::Typedef(t) => self.emit_typedef(&mut out, t)?,
            }
        }

        Ok(out)
    }

    fn emit_enum(&self, out: &mut String, decl: &EnumDecl) {
        self.comment(out, &format!("Enum for {}", decl.name));
        let _ = writeln!(out, "class {}(IntEnum):", decl.name);
        for (name, value) in &decl.enumerators {
            let _ = writeln!(out, "    {} = {}", name, value);
        }
    }

    fn emit_function(&self, out: &mut String, decl: &FunctionDecl) -> BindResult<()> {
        self.comment(out, &format!("Function type for {}", decl.signature(None)));
        let _ = writeln!(
            out,
            "{} = {}",
            decl.name,
            self.cfunctype(decl)?
        );
        Ok(())
    }

    fn emit_typedef(&self, out: &mut String, decl: &TypedefDecl) -> BindResult<()> {
        self.comment(out, &format!("Type for {} {}", decl.ty, decl.name));
        let _ = writeln!(out, "{} = {}", decl.name, self.lower(&decl.ty, Position::Value)?);
        Ok(())
    }

    fn emit_class(&self, out: &mut String, decl: &ClassDecl) -> BindResult<()> {
        let post_definition = self.stubbed.contains(&decl.name);

        let (field_indent, list_open, list_close) = if post_definition {
            self.comment(out, &format!("Structure for {} (post-definition)", decl.name));
            (
                "    ",
                format!("{}._fields_ = [", decl.name),
                "]".to_string(),
            )
        } else {
            self.comment(out, &format!("Structure for {}", decl.name));
            let _ = writeln!(out, "class {}(ctypes.Structure):", decl.name);
            (
                "        ",
                "    _fields_ = [".to_string(),
                "    ]".to_string(),
            )
        };

        out.push_str(&list_open);
        out.push('\n');

        // Member functions first, then data members, matching the source
        // order within each group. Constructors have no slot in the
        // structure layout.
        for method in &decl.methods {
            if self.options.comments {
                let _ = writeln!(
                    out,
                    "{}# Function type for {}",
                    field_indent,
                    method.signature(Some(&decl.name))
                );
            }
            let _ = writeln!(
                out,
                "{}(\"{}\", {}),",
                field_indent,
                method.name,
                self.cfunctype(method)?
            );
        }
        for field in &decl.fields {
            if self.options.comments {
                let _ = writeln!(
                    out,
                    "{}# Type for {}::{}: {}",
                    field_indent, decl.name, field.name, field.ty
                );
            }
            let _ = writeln!(
                out,
                "{}(\"{}\", {}),",
                field_indent,
                field.name,
                self.lower(&field.ty, Position::Value)?
            );
        }

        out.push_str(&list_close);
        out.push('\n');
        Ok(())
    }

    /// `ctypes.CFUNCTYPE(restype, argtypes...)` for a prototype
    fn cfunctype(&self, decl: &FunctionDecl) -> BindResult<String> {
        let mut parts = vec![self.lower(&decl.return_type, Position::Return)?];
        for param in &decl.params {
            parts.push(self.lower(&param.ty, Position::Value)?);
        }
        Ok(format!("ctypes.CFUNCTYPE({})", parts.join(", ")))
    }

    /// Lower a C++ type to its ctypes expression
    fn lower(&self, ty: &CppType, position: Position) -> BindResult<String> {
        let mut remaining_pointers = ty.pointer_depth;

        let base = if self.enum_names.contains(&ty.name) {
            // Enumerations are plain ints on the wire
            "ctypes.c_int".to_string()
        } else if ty.name == "void" {
            if remaining_pointers > 0 {
                remaining_pointers -= 1;
                "ctypes.c_void_p".to_string()
            } else if position == Position::Return {
                "None".to_string()
            } else {
                return Err(BindError::unsupported("void"));
            }
        } else if let Some(ctype) = builtin_ctype(&ty.name) {
            // char* and wchar_t* collapse into their _p shorthands
            match pointer_shorthand(ctype) {
                Some(shorthand) if remaining_pointers > 0 => {
                    remaining_pointers -= 1;
                    format!("ctypes.{}", shorthand)
                }
                _ => format!("ctypes.{}", ctype),
            }
        } else if self.class_index.contains_key(&ty.name) {
            ty.name.clone()
        } else if self.typedef_names.contains(&ty.name) {
            ty.name.clone()
        } else if remaining_pointers > 0 {
            // Opaque pointer to a type this run never saw
            tracing::debug!(type_name = %ty.name, "lowering unknown pointer type to c_void_p");
            remaining_pointers -= 1;
            "ctypes.c_void_p".to_string()
        } else {
            return Err(BindError::unsupported(&ty.name));
        };

        let mut lowered = base;
        for _ in 0..remaining_pointers {
            lowered = format!("ctypes.POINTER({})", lowered);
        }
        if let Some(len) = ty.array_len {
            lowered = format!("{} * {}", lowered, len);
        }
        Ok(lowered)
    }

    fn comment(&self, out: &mut String, text: &str) {
        if self.options.comments {
            let _ = writeln!(out, "# {}", text);
        }
    }
}

/// All base type names mentioned by a declaration
fn referenced_type_names(decl: &Decl) -> Vec<String> {
    let mut names = Vec::new();
    let mut push = |ty: &CppType| names.push(ty.name.clone());
    match decl {
        Decl::Enum(_) => {}
        Decl::Typedef(t) => push(&t.ty),
        Decl::Function(f) => {
            push(&f.return_type);
            for param in &f.params {
                push(&param.ty);
            }
        }
        Decl::Class(c) => {
            for method in &c.methods {
                push(&method.return_type);
                for param in &method.params {
                    push(&param.ty);
                }
            }
            for field in &c.fields {
                push(&field.ty);
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_header;

    fn generate(input: &str) -> String {
        let decls = parse_header("test.h", input).unwrap();
        generate_module(&decls, &EmitOptions::default()).unwrap()
    }

    #[test]
    fn test_generate__free_function__then_cfunctype() {
        let out = generate("int add(int a, int b);");
        assert!(out.contains("import ctypes"));
        assert!(out.contains("# Function type for int add(int a, int b)"));
        assert!(out.contains("add = ctypes.CFUNCTYPE(ctypes.c_int, ctypes.c_int, ctypes.c_int)"));
        assert!(!out.contains("IntEnum"));
    }

    #[test]
    fn test_generate__enum__then_intenum_class() {
        let out = generate("enum Color { RED, GREEN, BLUE };");
        assert!(out.contains("from enum import IntEnum"));
        assert!(out.contains("class Color(IntEnum):"));
        assert!(out.contains("    RED = 0"));
        assert!(out.contains("    GREEN = 1"));
        assert!(out.contains("    BLUE = 2"));
    }

    #[test]
    fn test_generate__string_ref_param__then_c_char_p() {
        let out = generate("std::string greet(const std::string& name);");
        assert!(out.contains("greet = ctypes.CFUNCTYPE(ctypes.c_char_p, ctypes.c_char_p)"));
    }

    #[test]
    fn test_generate__float_function__then_c_float() {
        let out = generate("float divide(float a, float b);");
        assert!(out.contains("divide = ctypes.CFUNCTYPE(ctypes.c_float, ctypes.c_float, ctypes.c_float)"));
    }

    #[test]
    fn test_generate__class__then_structure_with_fields() {
        let out = generate(
            "class Rectangle {\n\
             public:\n\
                 Rectangle(double width, double height);\n\
                 double area() const;\n\
                 double perimeter() const;\n\
             private:\n\
                 double width_;\n\
                 double height_;\n\
             };",
        );
        assert!(out.contains("class Rectangle(ctypes.Structure):"));
        assert!(out.contains("    _fields_ = ["));
        assert!(out.contains("(\"area\", ctypes.CFUNCTYPE(ctypes.c_double)),"));
        assert!(out.contains("(\"perimeter\", ctypes.CFUNCTYPE(ctypes.c_double)),"));
        assert!(out.contains("(\"width_\", ctypes.c_double),"));
        assert!(out.contains("(\"height_\", ctypes.c_double),"));
        // Constructors take no slot in the layout
        assert!(!out.contains("(\"Rectangle\""));
        // No forward reference, so no stub
        assert!(!out.contains("pass"));
    }

    #[test]
    fn test_generate__void_method__then_none_restype() {
        let out = generate(
            "class Animal {\n\
             public:\n\
                 Animal();\n\
                 void printInfo();\n\
             private:\n\
                 std::string name;\n\
                 int age;\n\
             };",
        );
        assert!(out.contains("(\"printInfo\", ctypes.CFUNCTYPE(None)),"));
        assert!(out.contains("(\"name\", ctypes.c_char_p),"));
        assert!(out.contains("(\"age\", ctypes.c_int),"));
    }

    #[test]
    fn test_generate__self_referential_class__then_pre_and_post_definition() {
        let out = generate(
            "class Node {\n\
             public:\n\
                 Node(int data);\n\
                 void setNext(Node* nextNode);\n\
                 Node* getNext();\n\
                 int getData();\n\
             private:\n\
                 int data;\n\
                 Node* next;\n\
             };",
        );
        assert!(out.contains("# Structure for Node (pre-definition)"));
        assert!(out.contains("class Node(ctypes.Structure):\n    pass"));
        assert!(out.contains("# Structure for Node (post-definition)"));
        assert!(out.contains("Node._fields_ = ["));
        assert!(out.contains("(\"setNext\", ctypes.CFUNCTYPE(None, ctypes.POINTER(Node))),"));
        assert!(out.contains("(\"getNext\", ctypes.CFUNCTYPE(ctypes.POINTER(Node))),"));
        assert!(out.contains("(\"next\", ctypes.POINTER(Node)),"));
        // The stub must precede the _fields_ assignment
        let stub_at = out.find("    pass").unwrap();
        let fields_at = out.find("Node._fields_").unwrap();
        assert!(stub_at < fields_at);
    }

    #[test]
    fn test_generate__function_before_class__then_class_stubbed() {
        let out = generate(
            "Widget* make_widget();\n\
             class Widget {\n\
             public:\n\
                 int id;\n\
             };",
        );
        assert!(out.contains("class Widget(ctypes.Structure):\n    pass"));
        assert!(out.contains("make_widget = ctypes.CFUNCTYPE(ctypes.POINTER(Widget))"));
        assert!(out.contains("Widget._fields_ = ["));
        let stub_at = out.find("    pass").unwrap();
        let func_at = out.find("make_widget =").unwrap();
        assert!(stub_at < func_at);
    }

    #[test]
    fn test_generate__enum_argument__then_lowered_to_c_int() {
        let out = generate("enum Color { RED };\nvoid paint(Color c);");
        assert!(out.contains("paint = ctypes.CFUNCTYPE(None, ctypes.c_int)"));
    }

    #[test]
    fn test_generate__unknown_pointer__then_c_void_p() {
        let out = generate("void configure(Options* opts);");
        assert!(out.contains("configure = ctypes.CFUNCTYPE(None, ctypes.c_void_p)"));
    }

    #[test]
    fn test_generate__unknown_value_type__then_error() {
        let decls = parse_header("test.h", "void configure(Options opts);").unwrap();
        let err = generate_module(&decls, &EmitOptions::default()).unwrap_err();
        assert!(matches!(err, BindError::UnsupportedType(_)));
        assert!(format!("{err}").contains("Options"));
    }

    #[test]
    fn test_generate__void_parameter_type__then_error() {
        let decls = vec![Decl::Function(FunctionDecl {
            name: "broken".into(),
            return_type: CppType::named("void"),
            params: vec![crate::ast::Param {
                name: None,
                ty: CppType::named("void"),
            }],
            is_const: false,
        })];
        // `(void)` parameter lists are normalized away by the parser, so a
        // literal void value type can only arrive malformed.
        let err = generate_module(&decls, &EmitOptions::default()).unwrap_err();
        assert!(matches!(err, BindError::UnsupportedType(_)));
    }

    #[test]
    fn test_generate__typedef__then_alias_assignment() {
        let out = generate("typedef unsigned long size_type;");
        assert!(out.contains("size_type = ctypes.c_ulong"));
    }

    #[test]
    fn test_generate__void_pointer_alias__then_c_void_p() {
        let out = generate("using handle_t = void*;");
        assert!(out.contains("handle_t = ctypes.c_void_p"));
    }

    #[test]
    fn test_generate__typedef_reference__then_alias_name_used() {
        let out = generate("typedef unsigned long size_type;\nsize_type length(char* s);");
        assert!(out.contains("length = ctypes.CFUNCTYPE(size_type, ctypes.c_char_p)"));
    }

    #[test]
    fn test_generate__array_field__then_multiplied() {
        let out = generate("struct Buf { char data[16]; };");
        assert!(out.contains("(\"data\", ctypes.c_char * 16),"));
    }

    #[test]
    fn test_generate__double_pointer__then_nested_pointer() {
        let out = generate("void fill(char** lines);");
        assert!(out.contains("fill = ctypes.CFUNCTYPE(None, ctypes.POINTER(ctypes.c_char_p))"));
    }

    #[test]
    fn test_generate__no_comments__then_bare_output() {
        let decls = parse_header("test.h", "int add(int a, int b);").unwrap();
        let out = generate_module(&decls, &EmitOptions { comments: false }).unwrap();
        assert!(!out.contains('#'));
        assert!(out.contains("add = ctypes.CFUNCTYPE("));
    }
}
