use super::{Constraint, Value, ValueType};
use crate::error::Result;

#[derive(Debug, Default)]
enum Bucket {
    #[default]
    Empty,
    Generalized,
    Specific(Vec<Constraint>),
}

/// Per-type accumulator for the lattice join, indexed by [`ValueType`].
#[derive(Debug, Default)]
struct JoinTable {
    buckets: [Bucket; ValueType::COUNT],
    // Types in order of first contribution.
    order: Vec<ValueType>,
}

impl JoinTable {
    fn insert(&mut self, constraint: Constraint) {
        let ty = constraint.value_type();
        let bucket = &mut self.buckets[ty.index()];
        if matches!(bucket, Bucket::Empty) {
            self.order.push(ty);
        }
        match bucket {
            Bucket::Generalized => {}
            _ if constraint.is_generic() => *bucket = Bucket::Generalized,
            Bucket::Empty => *bucket = Bucket::Specific(vec![constraint]),
            Bucket::Specific(seen) => {
                if !seen.iter().any(|known| known.same_refinement(&constraint)) {
                    seen.push(constraint);
                }
            }
        }
    }

    fn finish(mut self) -> Value {
        let mut constraints = Vec::new();
        for ty in self.order {
            match std::mem::take(&mut self.buckets[ty.index()]) {
                Bucket::Empty => {}
                Bucket::Generalized => constraints.push(Constraint::generic(ty)),
                Bucket::Specific(seen) => constraints.extend(seen),
            }
        }
        Value::new(constraints)
    }
}

impl Value {
    /// Apply `transform` to every constraint and merge the results.
    ///
    /// The transform may fail (e.g. calling a constraint that is not a
    /// function); the first failure aborts the join. All constraints are
    /// transformed before merging, so a transform with effects observes every
    /// hypothesis even when one of them widens the result to `any`.
    pub fn join<F>(&self, mut transform: F) -> Result<Value>
    where
        F: FnMut(&Constraint) -> Result<Vec<Constraint>>,
    {
        let mut results = Vec::with_capacity(self.len());
        for constraint in self.iter() {
            results.extend(transform(constraint)?);
        }
        Ok(Value::join_all(results))
    }

    /// Merge a sequence of constraints into a normalised value.
    ///
    /// * `any` absorbs everything: the result is exactly `[any]`.
    /// * A generic constraint generalizes its type, dropping earlier literals
    ///   and ignoring later ones.
    /// * Structurally identical specific constraints are kept once.
    pub fn join_all(results: impl IntoIterator<Item = Constraint>) -> Value {
        let mut table = JoinTable::default();
        let mut count = 0usize;
        for constraint in results {
            count += 1;
            if matches!(constraint, Constraint::Any) {
                tracing::trace!(inputs = count, "join widened to any");
                return Value::any();
            }
            table.insert(constraint);
        }
        let value = table.finish();
        tracing::trace!(inputs = count, outputs = value.len(), "join");
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(n: f64) -> Constraint {
        Constraint::Number(Some(n))
    }

    #[test]
    fn duplicates_are_dropped() {
        let value = Value::join_all(vec![num(1.0), num(2.0), num(1.0)]);
        assert_eq!(value.constraints(), &[num(1.0), num(2.0)]);
    }

    #[test]
    fn any_short_circuits() {
        let value = Value::join_all(vec![num(1.0), Constraint::Any, Constraint::Null]);
        assert!(value.is_any());
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn generic_replaces_earlier_literals_in_place() {
        let value = Value::join_all(vec![
            num(1.0),
            Constraint::Null,
            Constraint::Number(None),
            num(3.0),
        ]);
        assert_eq!(
            value.constraints(),
            &[Constraint::Number(None), Constraint::Null]
        );
    }

    #[test]
    fn transform_errors_abort_the_join() {
        let value = Value::new(vec![Constraint::Null, num(1.0)]);
        let mut seen = 0;
        let result = value.join(|c| {
            seen += 1;
            match c {
                Constraint::Null => Err(crate::Error::from("not callable")),
                other => Ok(vec![other.clone()]),
            }
        });
        assert!(result.is_err());
        assert_eq!(seen, 1);
    }

    #[test]
    fn empty_input_is_never() {
        assert!(Value::join_all(Vec::new()).is_never());
    }
}
