//! Structured filter predicates: parsed from JSON, rendered as a parameterized WHERE body.
//!
//! The JSON shape is shared with the HTTP `filter` query parameter:
//!
//! - `{"name": "Ana"}` equality, `{"name": null}` IS NULL, `{"age": [1, 2]}` IN
//! - `{"age": {">": 20, "<=": 65}}` comparisons; recognised operators are
//!   `=`/`$eq`, `!=`/`<>`/`$ne`, `>`/`$gt`, `>=`/`$gte`, `<`/`$lt`, `<=`/`$lte`,
//!   `$in`, `$nin` and `$like`
//! - `{"$and": [..]}`, `{"$or": [..]}`, `{"$not": {..}}`; sibling keys are ANDed

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("filter is not valid JSON: {0}")]
    Json(String),
    #[error("filter must be a JSON object")]
    NotAnObject,
    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),
    #[error("`{0}` expects {1}")]
    BadOperand(String, &'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

impl CompareOp {
    fn parse(op: &str) -> Option<Self> {
        Some(match op {
            "=" | "==" | "$eq" => CompareOp::Eq,
            "!=" | "<>" | "$ne" => CompareOp::Ne,
            ">" | "$gt" => CompareOp::Gt,
            ">=" | "$gte" => CompareOp::Gte,
            "<" | "$lt" => CompareOp::Lt,
            "<=" | "$lte" => CompareOp::Lte,
            "$like" => CompareOp::Like,
            _ => return None,
        })
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Like => "LIKE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Compare { field: String, op: CompareOp, value: Value },
    In { field: String, values: Vec<Value>, negated: bool },
    IsNull { field: String, negated: bool },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn from_json(v: &Value) -> Result<Self, FilterError> {
        match v {
            Value::Object(obj) => parse_object(obj),
            _ => Err(FilterError::NotAnObject),
        }
    }

    /// Render against the known column set. Comparisons on unknown columns are dropped;
    /// returns `None` when nothing is left.
    pub fn render(&self, columns: &HashSet<&str>, params: &mut Vec<Value>) -> Option<String> {
        match self {
            Predicate::Compare { field, op, value } => {
                if !columns.contains(field.as_str()) {
                    return None;
                }
                if value.is_null() {
                    return match op {
                        CompareOp::Eq => Some(format!("{} IS NULL", field)),
                        CompareOp::Ne => Some(format!("{} IS NOT NULL", field)),
                        _ => {
                            params.push(Value::Null);
                            Some(format!("{} {} ?", field, op.as_sql()))
                        }
                    };
                }
                params.push(value.clone());
                Some(format!("{} {} ?", field, op.as_sql()))
            }
            Predicate::In { field, values, negated } => {
                if !columns.contains(field.as_str()) {
                    return None;
                }
                if values.is_empty() {
                    // IN () matches nothing; NOT IN () matches everything.
                    return Some(if *negated { "1 = 1" } else { "1 = 0" }.to_string());
                }
                let placeholders = vec!["?"; values.len()].join(", ");
                params.extend(values.iter().cloned());
                let kw = if *negated { "NOT IN" } else { "IN" };
                Some(format!("{} {} ({})", field, kw, placeholders))
            }
            Predicate::IsNull { field, negated } => {
                if !columns.contains(field.as_str()) {
                    return None;
                }
                let kw = if *negated { "IS NOT NULL" } else { "IS NULL" };
                Some(format!("{} {}", field, kw))
            }
            Predicate::And(parts) => render_group(parts, " AND ", columns, params),
            Predicate::Or(parts) => render_group(parts, " OR ", columns, params),
            Predicate::Not(inner) => inner.render(columns, params).map(|s| format!("NOT ({})", s)),
        }
    }
}

impl FromStr for Predicate {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: Value = serde_json::from_str(s).map_err(|e| FilterError::Json(e.to_string()))?;
        Predicate::from_json(&v)
    }
}

impl TryFrom<&Value> for Predicate {
    type Error = FilterError;

    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        Predicate::from_json(v)
    }
}

fn render_group(
    parts: &[Predicate],
    joiner: &str,
    columns: &HashSet<&str>,
    params: &mut Vec<Value>,
) -> Option<String> {
    let rendered: Vec<String> = parts.iter().filter_map(|p| p.render(columns, params)).collect();
    match rendered.len() {
        0 => None,
        1 => rendered.into_iter().next(),
        _ => Some(format!("({})", rendered.join(joiner))),
    }
}

fn parse_object(obj: &Map<String, Value>) -> Result<Predicate, FilterError> {
    let mut parts = Vec::with_capacity(obj.len());
    for (key, value) in obj {
        parts.push(match key.as_str() {
            "$and" => Predicate::And(parse_list(key, value)?),
            "$or" => Predicate::Or(parse_list(key, value)?),
            "$not" => Predicate::Not(Box::new(Predicate::from_json(value)?)),
            k if k.starts_with('$') => return Err(FilterError::UnknownOperator(k.to_string())),
            field => parse_field(field, value)?,
        });
    }
    Ok(if parts.len() == 1 {
        parts.remove(0)
    } else {
        Predicate::And(parts)
    })
}

/// `$and` / `$or` take an array of predicates; an object is read as one predicate per key.
fn parse_list(op: &str, value: &Value) -> Result<Vec<Predicate>, FilterError> {
    match value {
        Value::Array(items) => items.iter().map(Predicate::from_json).collect(),
        Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| {
                let mut single = Map::new();
                single.insert(k.clone(), v.clone());
                parse_object(&single)
            })
            .collect(),
        _ => Err(FilterError::BadOperand(op.to_string(), "an array of predicates")),
    }
}

fn parse_field(field: &str, value: &Value) -> Result<Predicate, FilterError> {
    match value {
        Value::Null => Ok(Predicate::IsNull { field: field.to_string(), negated: false }),
        Value::Array(values) => Ok(Predicate::In {
            field: field.to_string(),
            values: values.clone(),
            negated: false,
        }),
        Value::Object(ops) => {
            let mut parts = Vec::with_capacity(ops.len());
            for (op, operand) in ops {
                parts.push(parse_operator(field, op, operand)?);
            }
            Ok(if parts.len() == 1 {
                parts.remove(0)
            } else {
                Predicate::And(parts)
            })
        }
        scalar => Ok(Predicate::Compare {
            field: field.to_string(),
            op: CompareOp::Eq,
            value: scalar.clone(),
        }),
    }
}

fn parse_operator(field: &str, op: &str, operand: &Value) -> Result<Predicate, FilterError> {
    match op {
        "$in" | "$nin" => match operand {
            Value::Array(values) => Ok(Predicate::In {
                field: field.to_string(),
                values: values.clone(),
                negated: op == "$nin",
            }),
            _ => Err(FilterError::BadOperand(op.to_string(), "an array")),
        },
        _ => {
            let cmp = CompareOp::parse(op).ok_or_else(|| FilterError::UnknownOperator(op.to_string()))?;
            if cmp == CompareOp::Like && !operand.is_string() {
                return Err(FilterError::BadOperand(op.to_string(), "a string pattern"));
            }
            if operand.is_array() || operand.is_object() {
                return Err(FilterError::BadOperand(op.to_string(), "a scalar"));
            }
            Ok(Predicate::Compare {
                field: field.to_string(),
                op: cmp,
                value: operand.clone(),
            })
        }
    }
}
