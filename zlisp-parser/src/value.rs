// zlisp-parser - Value types for zLisp
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for zLisp.
//!
//! [`Value`] is shared by syntax and runtime: the parser produces it and the
//! evaluator consumes and returns it. Every variant carries an optional
//! [`Info`] with the source span it was read from and its metadata. Info
//! never takes part in equality.
//!
//! Keywords are strings whose first character is [`KEYWORD_PREFIX`]. Use
//! [`Value::keyword`], [`Value::is_keyword`] and [`Value::as_keyword_name`]
//! rather than inspecting the prefix directly.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use im::{OrdMap, Vector};

use crate::source::SourceSpan;
use crate::symbol::Symbol;

/// Leading code point that marks a string as a keyword.
pub const KEYWORD_PREFIX: char = '\u{029e}';

/// Map storage: string (or keyword-encoded string) keys to values.
pub type Map = OrdMap<Rc<str>, Value>;

/// Span and metadata attached to a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Info {
    pub span: Option<SourceSpan>,
    pub meta: Value,
}

/// Optional attached info. `None` means no span and `nil` metadata.
pub type Attrs = Option<Rc<Info>>;

/// The core value type for zLisp.
#[derive(Clone)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64, Attrs),
    /// Immutable string, or a keyword when prefixed with [`KEYWORD_PREFIX`]
    String(Rc<str>, Attrs),
    Symbol(Symbol, Attrs),
    /// `nil`, `true` or `false`
    Constant(Constant, Attrs),
    /// `( ... )` forms and runtime lists
    List(Vector<Value>, Attrs),
    /// `[ ... ]`
    Vector(Vector<Value>, Attrs),
    /// `{ ... }`
    HashMap(Map, Attrs),
    Function(Function, Attrs),
    Atom(Atom, Attrs),
    /// Comment text. Never reaches the evaluator.
    Comment(Rc<str>, Attrs),
}

/// The three named constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Constant {
    Nil,
    True,
    False,
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Constant::Nil => "nil",
            Constant::True => "true",
            Constant::False => "false",
        }
    }

    pub fn from_name(name: &str) -> Option<Constant> {
        match name {
            "nil" => Some(Constant::Nil),
            "true" => Some(Constant::True),
            "false" => Some(Constant::False),
            _ => None,
        }
    }
}

// ============================================================================
// Function Types
// ============================================================================

/// A callable value: a host primitive or a user closure.
#[derive(Clone)]
pub enum Function {
    Native(NativeFn),
    Closure(Rc<Closure>),
}

impl Function {
    pub fn is_macro(&self) -> bool {
        match self {
            Function::Native(_) => false,
            Function::Closure(c) => c.is_macro(),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Native(a), Function::Native(b)) => a == b,
            (Function::Closure(a), Function::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Native(nf) => write!(f, "{:?}", nf),
            Function::Closure(c) if c.is_macro() => write!(f, "#<macro>"),
            Function::Closure(_) => write!(f, "#<fn>"),
        }
    }
}

/// A user-defined function (closure).
///
/// The captured environment is type-erased here; the runtime crate owns the
/// concrete environment type and downcasts it on application.
pub struct Closure {
    /// Formal parameters, possibly containing the `&` rest marker
    pub params: Vec<Symbol>,
    /// Unevaluated body
    pub body: Value,
    /// Captured environment (type-erased to avoid circular dependency)
    pub env: Rc<dyn Any>,
    is_macro: Cell<bool>,
}

impl Closure {
    pub fn new(params: Vec<Symbol>, body: Value, env: Rc<dyn Any>) -> Self {
        Closure {
            params,
            body,
            env,
            is_macro: Cell::new(false),
        }
    }

    pub fn is_macro(&self) -> bool {
        self.is_macro.get()
    }

    /// Flag this closure as a macro. Irreversible.
    pub fn mark_macro(&self) {
        self.is_macro.set(true);
    }
}

/// A native (Rust) function.
#[derive(Clone)]
pub struct NativeFn {
    /// Function name for display
    pub name: &'static str,
    /// The actual function (type-erased)
    func: Rc<dyn Any>,
}

impl NativeFn {
    pub fn new(name: &'static str, func: Rc<dyn Any>) -> Self {
        NativeFn { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native-fn {}>", self.name)
    }
}

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

// ============================================================================
// Atom Type
// ============================================================================

/// A mutable single-slot reference cell.
#[derive(Clone)]
pub struct Atom {
    value: Rc<RefCell<Value>>,
}

impl Atom {
    pub fn new(value: Value) -> Self {
        Atom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Current value.
    pub fn deref(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Replace the held value, returning the new value.
    pub fn reset(&self, new_val: Value) -> Value {
        *self.value.borrow_mut() = new_val.clone();
        new_val
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        // Atoms are equal if they point to the same cell
        Rc::ptr_eq(&self.value, &other.value)
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl Value {
    pub const NIL: Value = Value::Constant(Constant::Nil, None);
    pub const TRUE: Value = Value::Constant(Constant::True, None);
    pub const FALSE: Value = Value::Constant(Constant::False, None);

    pub fn int(n: i64) -> Self {
        Value::Integer(n, None)
    }

    pub fn bool(b: bool) -> Self {
        if b { Value::TRUE } else { Value::FALSE }
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into(), None)
    }

    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Symbol::new(name), None)
    }

    /// A keyword: the name behind the keyword prefix. An already prefixed
    /// name is kept as is.
    pub fn keyword(name: &str) -> Self {
        Value::String(keyword_key(name), None)
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items.into_iter().collect(), None)
    }

    pub fn list_from(items: Vector<Value>) -> Self {
        Value::List(items, None)
    }

    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(items.into_iter().collect(), None)
    }

    pub fn vector_from(items: Vector<Value>) -> Self {
        Value::Vector(items, None)
    }

    pub fn hash_map(map: Map) -> Self {
        Value::HashMap(map, None)
    }

    pub fn atom(value: Value) -> Self {
        Value::Atom(Atom::new(value), None)
    }

    pub fn closure(closure: Closure) -> Self {
        Value::Function(Function::Closure(Rc::new(closure)), None)
    }

    pub fn native(native: NativeFn) -> Self {
        Value::Function(Function::Native(native), None)
    }

    pub fn comment(text: &str) -> Self {
        Value::Comment(Rc::from(text), None)
    }

    /// Check if this value is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Constant(Constant::Nil, _))
    }

    /// Check if this value is truthy (not nil and not false)
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Constant(Constant::Nil | Constant::False, _))
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Value::String(s, _) if s.starts_with(KEYWORD_PREFIX))
    }

    /// Keyword name without its prefix.
    pub fn as_keyword_name(&self) -> Option<&str> {
        match self {
            Value::String(s, _) => s.strip_prefix(KEYWORD_PREFIX),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s, _) => Some(s),
            _ => None,
        }
    }

    /// True if this is a symbol with the given name.
    pub fn is_symbol_named(&self, name: &str) -> bool {
        matches!(self, Value::Symbol(s, _) if s.name() == name)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n, _) => Some(*n),
            _ => None,
        }
    }

    /// String contents, keywords included (prefix and all).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s, _) => Some(s),
            _ => None,
        }
    }

    /// Elements of a list or vector.
    pub fn as_seq(&self) -> Option<&Vector<Value>> {
        match self {
            Value::List(items, _) | Value::Vector(items, _) => Some(items),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vector<Value>> {
        match self {
            Value::List(items, _) => Some(items),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f, _) => Some(f),
            _ => None,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(..) => "integer",
            Value::String(..) if self.is_keyword() => "keyword",
            Value::String(..) => "string",
            Value::Symbol(..) => "symbol",
            Value::Constant(Constant::Nil, _) => "nil",
            Value::Constant(..) => "boolean",
            Value::List(..) => "list",
            Value::Vector(..) => "vector",
            Value::HashMap(..) => "map",
            Value::Function(f, _) if f.is_macro() => "macro",
            Value::Function(..) => "function",
            Value::Atom(..) => "atom",
            Value::Comment(..) => "comment",
        }
    }

    fn attrs(&self) -> &Attrs {
        match self {
            Value::Integer(_, a)
            | Value::String(_, a)
            | Value::Symbol(_, a)
            | Value::Constant(_, a)
            | Value::List(_, a)
            | Value::Vector(_, a)
            | Value::HashMap(_, a)
            | Value::Function(_, a)
            | Value::Atom(_, a)
            | Value::Comment(_, a) => a,
        }
    }

    fn attrs_mut(&mut self) -> &mut Attrs {
        match self {
            Value::Integer(_, a)
            | Value::String(_, a)
            | Value::Symbol(_, a)
            | Value::Constant(_, a)
            | Value::List(_, a)
            | Value::Vector(_, a)
            | Value::HashMap(_, a)
            | Value::Function(_, a)
            | Value::Atom(_, a)
            | Value::Comment(_, a) => a,
        }
    }

    /// Source span this value was read from, if any.
    pub fn span(&self) -> Option<SourceSpan> {
        self.attrs().as_ref().and_then(|info| info.span)
    }

    /// Attached metadata, `nil` when none was set.
    pub fn meta(&self) -> Value {
        self.attrs()
            .as_ref()
            .map_or(Value::NIL, |info| info.meta.clone())
    }

    /// Copy of this value with the given span.
    #[must_use]
    pub fn with_span(&self, span: SourceSpan) -> Value {
        let meta = self.meta();
        let mut copy = self.clone();
        *copy.attrs_mut() = Some(Rc::new(Info {
            span: Some(span),
            meta,
        }));
        copy
    }

    /// Copy of this value with the given metadata. The original is untouched.
    #[must_use]
    pub fn with_meta(&self, meta: Value) -> Value {
        let span = self.span();
        let mut copy = self.clone();
        *copy.attrs_mut() = Some(Rc::new(Info { span, meta }));
        copy
    }

    /// Print this value. Readable printing quotes strings.
    pub fn pr_str(&self, readably: bool) -> String {
        Printer {
            value: self,
            readably,
        }
        .to_string()
    }
}

/// Map key for a keyword name.
pub fn keyword_key(name: &str) -> Rc<str> {
    if name.starts_with(KEYWORD_PREFIX) {
        Rc::from(name)
    } else {
        let mut key = String::with_capacity(name.len() + KEYWORD_PREFIX.len_utf8());
        key.push(KEYWORD_PREFIX);
        key.push_str(name);
        Rc::from(key)
    }
}

// ============================================================================
// Display implementation
// ============================================================================

struct Printer<'a> {
    value: &'a Value,
    readably: bool,
}

impl Printer<'_> {
    fn nested<'b>(&self, value: &'b Value) -> Printer<'b> {
        Printer {
            value,
            readably: self.readably,
        }
    }

    fn write_seq(
        &self,
        f: &mut fmt::Formatter<'_>,
        open: &str,
        items: &Vector<Value>,
        close: &str,
    ) -> fmt::Result {
        write!(f, "{}", open)?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.nested(item))?;
        }
        write!(f, "{}", close)
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str, readably: bool) -> fmt::Result {
    if let Some(name) = s.strip_prefix(KEYWORD_PREFIX) {
        write!(f, ":{}", name)
    } else if readably {
        write!(f, "\"{}\"", s.replace('"', "\\\""))
    } else {
        write!(f, "{}", s)
    }
}

impl fmt::Display for Printer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Integer(n, _) => write!(f, "{}", n),
            Value::String(s, _) => write_string(f, s, self.readably),
            Value::Symbol(sym, _) => write!(f, "{}", sym),
            Value::Constant(c, _) => write!(f, "{}", c.name()),
            Value::List(items, _) => self.write_seq(f, "(", items, ")"),
            Value::Vector(items, _) => self.write_seq(f, "[", items, "]"),
            Value::HashMap(map, _) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write_string(f, k, self.readably)?;
                    write!(f, " {}", self.nested(v))?;
                }
                write!(f, "}}")
            }
            Value::Function(func, _) => write!(f, "{:?}", func),
            Value::Atom(a, _) => write!(f, "(atom {})", self.nested(&a.deref())),
            Value::Comment(text, _) => write!(f, "{}", text),
        }
    }
}

/// Readable printing.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            Printer {
                value: self,
                readably: true,
            }
        )
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        // Span and metadata are ignored. A list never equals a vector.
        match (self, other) {
            (Value::Integer(a, _), Value::Integer(b, _)) => a == b,
            (Value::String(a, _), Value::String(b, _)) => a == b,
            (Value::Symbol(a, _), Value::Symbol(b, _)) => a == b,
            (Value::Constant(a, _), Value::Constant(b, _)) => a == b,
            (Value::List(a, _), Value::List(b, _)) => a == b,
            (Value::Vector(a, _), Value::Vector(b, _)) => a == b,
            (Value::HashMap(a, _), Value::HashMap(b, _)) => a == b,
            (Value::Function(a, _), Value::Function(b, _)) => a == b,
            (Value::Atom(a, _), Value::Atom(b, _)) => a == b,
            (Value::Comment(a, _), Value::Comment(b, _)) => a == b,
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
