//! Resolved variable context
//!
//! Settings may reference one another (`"bull_price": "{{ default_btc_price }} * 2"`).
//! The references form a graph which must be acyclic; variables are resolved
//! in topological order so every value is substituted exactly once.

use super::placeholder::{placeholders, substitute};
use super::resolver::{coerce, Coercion};
use super::ResolveError;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    value: Value,
    /// Text spliced into templates in place of `{{ name }}`
    text: String,
}

/// Fully resolved variables available to a [`super::Resolver`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: BTreeMap<String, Entry>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl Context {
    /// Build a context from raw settings.
    ///
    /// String settings are resolved against the other settings and then
    /// evaluated as arithmetic when possible, so `"{{ a }} * 2"` becomes a
    /// number before it is spliced anywhere else.
    pub fn build<I>(raw: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let raw: BTreeMap<String, Value> = raw.into_iter().collect();
        let order = topological_order(&raw)?;

        let mut entries = BTreeMap::new();
        for name in order {
            let value = resolve_setting(&raw[&name], &entries)?;
            let text = render(&value);
            entries.insert(name, Entry { value, text });
        }

        Ok(Self { entries })
    }

    /// Resolved value of `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|e| &e.value)
    }

    /// Substitution text of `name`
    pub fn text(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn resolve_setting(
    value: &Value,
    resolved: &BTreeMap<String, Entry>,
) -> Result<Value, ResolveError> {
    let lookup = |name: &str| resolved.get(name).map(|e| e.text.as_str());
    match value {
        Value::String(s) => {
            let text = substitute(s, lookup)?;
            Ok(coerce(text, Coercion::Expressions))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_setting(item, resolved))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| Ok((k.clone(), resolve_setting(v, resolved)?)))
            .collect::<Result<serde_json::Map<_, _>, _>>()
            .map(Value::Object),
        other => Ok(other.clone()),
    }
}

/// String form used when a value is spliced into a template
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn collect_references<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.extend(placeholders(s)),
        Value::Array(items) => items.iter().for_each(|v| collect_references(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_references(v, out)),
        _ => {}
    }
}

/// Depth-first topological sort of the reference graph
fn topological_order(raw: &BTreeMap<String, Value>) -> Result<Vec<String>, ResolveError> {
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(raw.len());
    let mut order = Vec::with_capacity(raw.len());
    let mut path: Vec<&str> = Vec::new();

    for name in raw.keys() {
        visit(name, raw, &mut marks, &mut path, &mut order)?;
    }
    Ok(order)
}

fn visit<'a>(
    name: &'a str,
    raw: &'a BTreeMap<String, Value>,
    marks: &mut HashMap<&'a str, Mark>,
    path: &mut Vec<&'a str>,
    order: &mut Vec<String>,
) -> Result<(), ResolveError> {
    match marks.get(name) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|n| *n == name).unwrap_or(0);
            let mut chain: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            chain.push(name.to_string());
            return Err(ResolveError::CyclicReference(chain));
        }
        None => {}
    }

    let (key, value) = raw
        .get_key_value(name)
        .ok_or_else(|| ResolveError::MissingVariable(name.to_string()))?;

    marks.insert(key.as_str(), Mark::Visiting);
    path.push(key.as_str());

    let mut deps = Vec::new();
    collect_references(value, &mut deps);
    for dep in deps {
        visit(dep, raw, marks, path, order)?;
    }

    path.pop();
    marks.insert(key.as_str(), Mark::Done);
    order.push(key.clone());
    Ok(())
}
