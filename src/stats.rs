// Aggregates over arbitrarily nested, heterogeneous host sequences.
//
// These are tree visitors over `Value`: a leaf is whatever the host's
// coercion layer can turn into a number, and a nested sequence is reduced
// recursively before it takes part in the enclosing fold.

use crate::value::{Coercion, Number, NumericError, Value};

// RUST CONCEPT: Explicit child enumeration instead of iterable sniffing
// The host decides *whether* a value is iterable; the tree shape decides
// *what* its elements are. A string iterates as its characters.
fn children(v: &Value, coercion: &dyn Coercion) -> Option<Vec<Value>> {
    if !coercion.is_iterable(v) {
        return None;
    }
    match v {
        Value::List(items) => Some(items.clone()),
        // a one-symbol string decomposes into itself, so it must count as
        // a leaf or the recursion never bottoms out
        Value::Str(s) if s.chars().count() == 1 => None,
        Value::Str(s) => Some(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        Value::Num(_) => None,
    }
}

fn comparable(n: Number) -> Option<Number> {
    match n {
        Number::Real(r) if r.is_nan() => None,
        _ => Some(n),
    }
}

fn fold_extremum(
    v: &Value,
    coercion: &dyn Coercion,
    better: &dyn Fn(&Number, &Number) -> bool,
) -> Option<Number> {
    match children(v, coercion) {
        // leaf: coerce, skipping anything without a numeric reading
        None => coercion.to_number(v).and_then(comparable),
        Some(items) => {
            let mut best: Option<Number> = None;
            for item in items {
                // nested sequences reduce to their own extremum first
                if let Some(candidate) = fold_extremum(&item, coercion, better) {
                    best = match best {
                        None => Some(candidate),
                        Some(current) => {
                            if better(&candidate, &current) {
                                Some(candidate)
                            } else {
                                Some(current)
                            }
                        }
                    };
                }
            }
            best
        }
    }
}

/// Largest numeric leaf anywhere in `v`; `None` when nothing is comparable.
pub fn max_of(v: &Value, coercion: &dyn Coercion) -> Option<Number> {
    fold_extremum(v, coercion, &|a, b| {
        matches!(a.partial_cmp(b), Some(std::cmp::Ordering::Greater))
    })
}

/// Smallest numeric leaf anywhere in `v`; `None` when nothing is comparable.
pub fn min_of(v: &Value, coercion: &dyn Coercion) -> Option<Number> {
    fold_extremum(v, coercion, &|a, b| {
        matches!(a.partial_cmp(b), Some(std::cmp::Ordering::Less))
    })
}

// RUST CONCEPT: Column-wise broadcast for nested means
// mean([[1,2],[3,4]]) is NOT the grand mean 2.5: when the head element is
// itself iterable, the mean maps element-wise across corresponding
// positions and yields one mean per column, zipping rows to the shortest.
pub fn arithmetic_mean(v: &Value, coercion: &dyn Coercion) -> Result<Value, NumericError> {
    let items = match children(v, coercion) {
        Some(items) => items,
        // a bare scalar is its own mean
        None => {
            let n = coercion.to_number(v).ok_or_else(|| {
                NumericError::UndefinedDomain(format!("cannot average {}", v.type_name()))
            })?;
            return Ok(Value::Num(n));
        }
    };
    if items.is_empty() {
        return Err(NumericError::DivisionByZero);
    }
    if coercion.is_iterable(&items[0]) {
        let mut rows = Vec::with_capacity(items.len());
        for item in &items {
            let row = children(item, coercion).ok_or_else(|| {
                NumericError::UndefinedDomain(format!(
                    "cannot broadcast over mixed {} element",
                    item.type_name()
                ))
            })?;
            rows.push(row);
        }
        let width = rows.iter().map(Vec::len).min().unwrap_or(0);
        let mut columns = Vec::with_capacity(width);
        for j in 0..width {
            let column: Vec<Value> = rows.iter().map(|row| row[j].clone()).collect();
            columns.push(arithmetic_mean(&Value::List(column), coercion)?);
        }
        return Ok(Value::List(columns));
    }
    let mut sum = Number::from(0);
    for item in &items {
        let n = coercion.to_number(item).ok_or_else(|| {
            NumericError::UndefinedDomain(format!("cannot average {}", item.type_name()))
        })?;
        sum = &sum + &n;
    }
    Ok(Value::Num(Number::Real(sum.to_f64() / items.len() as f64)))
}

/// Middle element of the sorted coerced values; the average of the two
/// middles for even length. An empty input yields an empty list, not an
/// error.
pub fn median(v: &Value, coercion: &dyn Coercion) -> Result<Value, NumericError> {
    let items = match children(v, coercion) {
        Some(items) => items,
        None => {
            return Err(NumericError::UndefinedDomain(format!(
                "median needs a sequence, got {}",
                v.type_name()
            )))
        }
    };
    if items.is_empty() {
        return Ok(Value::List(Vec::new()));
    }
    let mut numbers = Vec::with_capacity(items.len());
    for item in &items {
        let n = coercion.to_number(item).ok_or_else(|| {
            NumericError::UndefinedDomain(format!("non-numeric element: {}", item))
        })?;
        numbers.push(n);
    }
    numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = numbers.len() / 2;
    if numbers.len() % 2 == 1 {
        Ok(Value::Num(numbers[mid].clone()))
    } else {
        let avg = (numbers[mid - 1].to_f64() + numbers[mid].to_f64()) / 2.0;
        Ok(Value::Num(Number::Real(avg)))
    }
}
