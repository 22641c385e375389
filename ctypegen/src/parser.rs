//! Recursive-descent parser for the supported C++ declaration subset
//!
//! Handles what binding headers for a C-callable surface actually contain:
//! enums, classes/structs with method prototypes and data members, free
//! function prototypes, and typedef/using aliases. Function bodies,
//! templates, namespaces and inheritance are out of scope and rejected
//! with a located parse error.

use crate::ast::{ClassDecl, CppType, Decl, EnumDecl, Field, FunctionDecl, Param, TypedefDecl};
use crate::error::{BindError, BindResult};
use crate::lexer::{tokenize, Token, TokenKind};

/// Words that may combine into a single builtin type name
const TYPE_WORDS: &[&str] = &[
    "unsigned", "signed", "long", "short", "int", "char", "double", "float",
];

/// Parse a header's text into its top-level declarations, in source order
pub fn parse_header(path: &str, text: &str) -> BindResult<Vec<Decl>> {
    let tokens = tokenize(path, text)?;
    Parser {
        path,
        tokens,
        pos: 0,
    }
    .parse_decls()
}

struct Parser<'a> {
    path: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_decls(mut self) -> BindResult<Vec<Decl>> {
        let mut decls = Vec::new();
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::Punct(';') => {
                    self.bump();
                }
                TokenKind::Ident(word) => match word.as_str() {
                    "enum" => {
                        self.bump();
                        decls.push(Decl::Enum(self.parse_enum()?));
                    }
                    "class" | "struct" => {
                        self.bump();
                        if let Some(class) = self.parse_class()? {
                            decls.push(Decl::Class(class));
                        }
                    }
                    "typedef" => {
                        self.bump();
                        decls.push(Decl::Typedef(self.parse_typedef()?));
                    }
                    "using" => {
                        self.bump();
                        decls.push(Decl::Typedef(self.parse_using()?));
                    }
                    _ => {
                        if let Some(decl) = self.parse_function_or_variable()? {
                            decls.push(decl);
                        }
                    }
                },
                _ => {
                    return Err(self.unexpected("a declaration"));
                }
            }
        }
        Ok(decls)
    }

    // enum Name [: base] { A [= 1], B, };
    fn parse_enum(&mut self) -> BindResult<EnumDecl> {
        // enum class / enum struct
        if self.peek_ident("class") || self.peek_ident("struct") {
            self.bump();
        }
        let name = self.expect_ident("an enum name")?;
        if self.eat_punct(':') {
            // Underlying type is irrelevant to the binding; every enum
            // lowers to c_int.
            self.parse_type()?;
        }
        self.expect_punct('{')?;

        let mut enumerators = Vec::new();
        let mut next_value: i64 = 0;
        loop {
            if self.eat_punct('}') {
                break;
            }
            let enumerator = self.expect_ident("an enumerator name")?;
            let value = if self.eat_punct('=') {
                self.parse_int_value()?
            } else {
                next_value
            };
            next_value = value + 1;
            enumerators.push((enumerator, value));
            if !self.eat_punct(',') {
                self.expect_punct('}')?;
                break;
            }
        }
        self.expect_punct(';')?;
        Ok(EnumDecl { name, enumerators })
    }

    // class Name { public: ... };  Returns None for a bare forward
    // declaration `class Name;`.
    fn parse_class(&mut self) -> BindResult<Option<ClassDecl>> {
        let name = self.expect_ident("a class name")?;
        if self.eat_punct(';') {
            return Ok(None);
        }
        if self.peek() == Some(&TokenKind::Punct(':')) {
            return Err(self.error("inheritance is not supported"));
        }
        self.expect_punct('{')?;

        let mut class = ClassDecl {
            name: name.clone(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        };

        loop {
            if self.eat_punct('}') {
                break;
            }
            match self.peek() {
                Some(TokenKind::Ident(word))
                    if matches!(word.as_str(), "public" | "private" | "protected") =>
                {
                    self.bump();
                    self.expect_punct(':')?;
                }
                Some(TokenKind::Punct('~')) => {
                    // Destructor: nothing to bind
                    self.bump();
                    self.expect_ident("a destructor name")?;
                    self.expect_punct('(')?;
                    self.expect_punct(')')?;
                    self.expect_punct(';')?;
                }
                Some(TokenKind::Ident(word))
                    if word == &name && self.peek_ahead(1) == Some(&TokenKind::Punct('(')) =>
                {
                    self.bump();
                    self.bump();
                    let params = self.parse_params()?;
                    self.expect_punct(';')?;
                    class.constructors.push(FunctionDecl {
                        name: name.clone(),
                        return_type: CppType::named(name.clone()),
                        params,
                        is_const: false,
                    });
                }
                Some(_) => {
                    self.parse_member(&mut class)?;
                }
                None => {
                    return Err(self.error(format!("unterminated class '{}'", name)));
                }
            }
        }
        self.expect_punct(';')?;
        Ok(Some(class))
    }

    // Method prototype, array field or plain field
    fn parse_member(&mut self, class: &mut ClassDecl) -> BindResult<()> {
        let ty = self.parse_type()?;
        let member_name = self.expect_ident("a member name")?;
        if self.eat_punct('(') {
            let params = self.parse_params()?;
            let is_const = self.eat_ident("const");
            self.expect_punct(';')?;
            class.methods.push(FunctionDecl {
                name: member_name,
                return_type: ty,
                params,
                is_const,
            });
        } else {
            let mut ty = ty;
            if self.eat_punct('[') {
                let len = self.parse_int_value()?;
                if len < 0 {
                    return Err(self.error("negative array length"));
                }
                self.expect_punct(']')?;
                ty.array_len = Some(len as usize);
            }
            self.expect_punct(';')?;
            class.fields.push(Field {
                name: member_name,
                ty,
            });
        }
        Ok(())
    }

    // typedef <type> Name;
    fn parse_typedef(&mut self) -> BindResult<TypedefDecl> {
        let ty = self.parse_type()?;
        let name = self.expect_ident("a typedef name")?;
        self.expect_punct(';')?;
        Ok(TypedefDecl { name, ty })
    }

    // using Name = <type>;
    fn parse_using(&mut self) -> BindResult<TypedefDecl> {
        let name = self.expect_ident("an alias name")?;
        self.expect_punct('=')?;
        let ty = self.parse_type()?;
        self.expect_punct(';')?;
        Ok(TypedefDecl { name, ty })
    }

    // <type> name(params); at top level, or a global variable. Only
    // typedefs, functions, enums and classes are bound; globals are
    // parsed and discarded.
    fn parse_function_or_variable(&mut self) -> BindResult<Option<Decl>> {
        let ty = self.parse_type()?;
        let name = self.expect_ident("a declaration name")?;
        if self.eat_punct('(') {
            let params = self.parse_params()?;
            self.expect_punct(';')?;
            Ok(Some(Decl::Function(FunctionDecl {
                name,
                return_type: ty,
                params,
                is_const: false,
            })))
        } else {
            self.expect_punct(';')?;
            Ok(None)
        }
    }

    // Parameter list; the opening '(' has already been consumed
    fn parse_params(&mut self) -> BindResult<Vec<Param>> {
        let mut params = Vec::new();
        if self.eat_punct(')') {
            return Ok(params);
        }
        // `(void)` means no parameters
        if self.peek_ident("void") && self.peek_ahead(1) == Some(&TokenKind::Punct(')')) {
            self.bump();
            self.bump();
            return Ok(params);
        }
        loop {
            let ty = self.parse_type()?;
            let name = match self.peek() {
                Some(TokenKind::Ident(_)) => Some(self.expect_ident("a parameter name")?),
                _ => None,
            };
            if self.eat_punct('=') {
                // Default value: irrelevant to the CFUNCTYPE signature
                self.skip_default_value()?;
            }
            params.push(Param { name, ty });
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct(')')?;
            break;
        }
        Ok(params)
    }

    fn skip_default_value(&mut self) -> BindResult<()> {
        loop {
            match self.peek() {
                Some(TokenKind::Punct(',')) | Some(TokenKind::Punct(')')) => return Ok(()),
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.error("unterminated default value")),
            }
        }
    }

    // [const] base[::qualified] [const] [*...] [&]
    fn parse_type(&mut self) -> BindResult<CppType> {
        let mut is_const = self.eat_ident("const");

        let first = self.expect_ident("a type name")?;
        let name = if self.peek() == Some(&TokenKind::ColonColon) {
            let mut qualified = first;
            while self.peek() == Some(&TokenKind::ColonColon) {
                self.bump();
                qualified.push_str("::");
                qualified.push_str(&self.expect_ident("a qualified type name")?);
            }
            qualified
        } else if TYPE_WORDS.contains(&first.as_str()) {
            let mut words = vec![first];
            while let Some(TokenKind::Ident(word)) = self.peek() {
                if TYPE_WORDS.contains(&word.as_str()) {
                    words.push(word.clone());
                    self.bump();
                } else {
                    break;
                }
            }
            // `signed` is the default and carries no mapping information
            words.retain(|w| w != "signed");
            if words.is_empty() {
                "int".to_string()
            } else {
                words.join(" ")
            }
        } else {
            first
        };

        if self.eat_ident("const") {
            is_const = true;
        }

        let mut ty = CppType::named(name);
        ty.is_const = is_const;
        while self.eat_punct('*') {
            ty.pointer_depth += 1;
            // `* const` pointers: constness does not change the mapping
            self.eat_ident("const");
        }
        if self.eat_punct('&') {
            ty.is_reference = true;
        }
        Ok(ty)
    }

    fn parse_int_value(&mut self) -> BindResult<i64> {
        let negative = self.eat_punct('-');
        match self.peek() {
            Some(TokenKind::Int(value)) => {
                let value = *value;
                self.bump();
                Ok(if negative { -value } else { value })
            }
            _ => Err(self.unexpected("an integer")),
        }
    }

    // ----- token cursor helpers -----

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_ahead(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + n).map(|t| &t.kind)
    }

    fn peek_ident(&self, word: &str) -> bool {
        matches!(self.peek(), Some(TokenKind::Ident(w)) if w == word)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek() == Some(&TokenKind::Punct(c)) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        if self.peek_ident(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> BindResult<()> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", c)))
        }
    }

    fn expect_ident(&mut self, what: &str) -> BindResult<String> {
        match self.peek() {
            Some(TokenKind::Ident(word)) => {
                let word = word.clone();
                self.bump();
                Ok(word)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn error(&self, message: impl std::fmt::Display) -> BindError {
        BindError::parse(self.path, self.line(), message)
    }

    fn unexpected(&self, expected: &str) -> BindError {
        let found = match self.peek() {
            Some(TokenKind::Ident(word)) => format!("'{}'", word),
            Some(TokenKind::Int(value)) => format!("'{}'", value),
            Some(TokenKind::ColonColon) => "'::'".to_string(),
            Some(TokenKind::Punct(c)) => format!("'{}'", c),
            None => "end of file".to_string(),
        };
        self.error(format!("expected {}, found {}", expected, found))
    }
}
