//! Compiled path types.

use super::error::ApplyError;
use super::evaluator::Evaluator;
use crate::value::{Key, Receiver, ReceiverError, Value};
use std::fmt;

/// What a segment does to the running value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Invoke a zero-argument method (`.name`)
    Method(String),
    /// Look up a symbol key (`[:name]`)
    SymbolKey(String),
    /// Look up a string key (`['text']`)
    StringKey(String),
    /// Index into a sequence (`[3]`)
    ArrayIndex(usize),
    /// String key, falling back to the symbol key (`[text]`)
    GenericKey(String),
}

impl Step {
    /// Applies this step to `value`. A `nil` outcome is `None`.
    pub fn apply(&self, value: &Value) -> Result<Option<Value>, ReceiverError> {
        let result = match self {
            Step::Method(name) => value.send(name)?,
            Step::SymbolKey(name) => value.index(&Key::Symbol(name.clone()))?,
            Step::StringKey(text) => value.index(&Key::String(text.clone()))?,
            Step::ArrayIndex(index) => match i64::try_from(*index) {
                Ok(index) => value.index(&Key::Integer(index))?,
                Err(_) => Value::Nil,
            },
            Step::GenericKey(text) => generic_lookup(value, text)?,
        };
        Ok(result.into_option())
    }
}

/// String key first, symbol key second. Receivers that can test for key
/// presence are asked before looking anything up; the rest are retried with
/// the symbol key only when the string key yields nil.
fn generic_lookup(value: &Value, text: &str) -> Result<Value, ReceiverError> {
    let literal = Key::String(text.to_string());
    let symbolic = Key::Symbol(text.to_string());

    if let Some(keys) = value.key_presence() {
        if keys.has_key(&literal) {
            value.index(&literal)
        } else if keys.has_key(&symbolic) {
            value.index(&symbolic)
        } else {
            Ok(Value::Nil)
        }
    } else {
        match value.index(&literal)? {
            Value::Nil => value.index(&symbolic),
            found => Ok(found),
        }
    }
}

/// One compiled step plus its mandatory flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub step: Step,
    /// Apply even when the running value is absent
    pub mandatory: bool,
}

impl Segment {
    pub fn new(step: Step, mandatory: bool) -> Self {
        Self { step, mandatory }
    }

    pub fn apply(&self, value: &Value) -> Result<Option<Value>, ReceiverError> {
        self.step.apply(value)
    }
}

impl fmt::Display for Segment {
    /// Canonical surface form; tokenizes back to the same segment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.mandatory { "!" } else { "" };
        match &self.step {
            Step::Method(name) => write!(f, ".{}{}", bang, name),
            Step::SymbolKey(name) => write!(f, "{}[:{}]", bang, name),
            Step::StringKey(text) => write!(f, "{}[\"{}\"]", bang, text),
            Step::ArrayIndex(index) => write!(f, "{}[{}]", bang, index),
            Step::GenericKey(text) => write!(f, "{}[{}]", bang, text),
        }
    }
}

/// A compiled path expression: segments in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a path from already compiled segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Evaluates this path against `root`.
    pub fn apply(&self, root: &Value) -> Result<Option<Value>, ApplyError> {
        Evaluator::new(root).evaluate(&self.segments)
    }

    /// Binds this path into a standalone accessor closure.
    ///
    /// ```
    /// use schmuck::{Key, Path, Value};
    ///
    /// let second = Path::parse("[multiples][1]").unwrap().to_accessor();
    /// let rows: Vec<Value> = (1..=3)
    ///     .map(|n| Value::hash([(
    ///         Key::from("multiples"),
    ///         Value::from(vec![Value::from(n * 2), Value::from(n * 3)]),
    ///     )]))
    ///     .collect();
    ///
    /// let picked: Vec<Option<Value>> = rows.iter().map(|row| second(row).unwrap()).collect();
    /// assert_eq!(picked, vec![Some(Value::from(3)), Some(Value::from(6)), Some(Value::from(9))]);
    /// ```
    pub fn to_accessor(
        &self,
    ) -> impl Fn(&Value) -> Result<Option<Value>, ApplyError> + Send + Sync + 'static {
        let path = self.clone();
        move |root: &Value| path.apply(root)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
