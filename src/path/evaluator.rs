use super::ast::Segment;
use super::error::ApplyError;
use crate::value::Value;
use std::borrow::Cow;

/// Folds a segment sequence over a root value.
pub struct Evaluator<'a> {
    root: &'a Value,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a Value) -> Self {
        Evaluator { root }
    }

    /// Applies `segments` left to right, starting at the root.
    ///
    /// Once the running value is absent, non-mandatory segments are skipped
    /// and the result stays absent. A mandatory segment is still applied, to
    /// `nil`, and whatever that operation does decides the outcome.
    pub fn evaluate(&self, segments: &[Segment]) -> Result<Option<Value>, ApplyError> {
        let mut current: Option<Cow<'a, Value>> = if self.root.is_nil() {
            None
        } else {
            Some(Cow::Borrowed(self.root))
        };

        for (position, segment) in segments.iter().enumerate() {
            current = match current {
                Some(value) => self.apply_segment(position, segment, &value)?,
                None if segment.mandatory => self.apply_segment(position, segment, &Value::Nil)?,
                None => None,
            };
        }

        Ok(current.map(Cow::into_owned))
    }

    fn apply_segment(
        &self,
        position: usize,
        segment: &Segment,
        value: &Value,
    ) -> Result<Option<Cow<'a, Value>>, ApplyError> {
        segment
            .apply(value)
            .map(|result| result.map(Cow::Owned))
            .map_err(|reason| ApplyError {
                segment: segment.to_string(),
                position,
                reason,
            })
    }
}
