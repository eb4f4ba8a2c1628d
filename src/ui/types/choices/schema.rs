use anyhow::{Context, Result, anyhow};
use schemars::Schema;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Parameters of the `kind_key` variant of a `{type, params}` tagged enum.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(Value::as_array)
        .context("missing oneOf/anyOf")?;

    let branch = alts
        .iter()
        .filter_map(Value::as_object)
        .find(|b| {
            b.get("properties")
                .and_then(Value::as_object)
                .is_some_and(|props| discriminant_matches(props, kind_key))
        })
        .ok_or_else(|| anyhow!("no branch found for type={kind_key}"))?;

    let Some(params) = branch
        .get("properties")
        .and_then(|p| p.get("params"))
        .and_then(Value::as_object)
        .and_then(|o| resolve_ref_obj(root_obj, o))
    else {
        return Ok(vec![]);
    };
    let Some(params_props) = params.get("properties").and_then(Value::as_object) else {
        return Ok(vec![]);
    };

    let required: Vec<&str> = params
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut out = Vec::new();
    for (name, field_schema) in params_props {
        let mut fs_obj = field_schema
            .as_object()
            .with_context(|| format!("schema of field '{name}' is not an object"))?;
        if fs_obj.contains_key("$ref") {
            fs_obj = resolve_ref_obj(root_obj, fs_obj)
                .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
        }

        let Some(kind) = detect_field_kind(fs_obj.get("type")) else {
            continue;
        };

        out.push(FieldSpec {
            name: name.clone(),
            title: fs_obj
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(name)
                .to_string(),
            description: fs_obj
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            required: required.contains(&name.as_str()),
            kind,
            default: fs_obj.get("default").cloned(),
            min: fs_obj
                .get("minimum")
                .or_else(|| fs_obj.get("exclusiveMinimum"))
                .and_then(Value::as_f64),
            max: fs_obj
                .get("maximum")
                .or_else(|| fs_obj.get("exclusiveMaximum"))
                .and_then(Value::as_f64),
        });
    }
    Ok(out)
}

/// One line per field: `name  kind  [required]  range  - description`.
pub fn render_field_specs(specs: &[FieldSpec]) -> String {
    let width = specs.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for s in specs {
        let _ = write!(out, "{:<width$}  {:<7}", s.name, s.kind.to_string());
        if s.required {
            out.push_str("  required");
        }
        match (s.min, s.max) {
            (Some(lo), Some(hi)) => {
                let _ = write!(out, "  [{lo}, {hi}]");
            }
            (Some(lo), None) => {
                let _ = write!(out, "  >= {lo}");
            }
            (None, Some(hi)) => {
                let _ = write!(out, "  <= {hi}");
            }
            (None, None) => {}
        }
        if let Some(d) = &s.default {
            let _ = write!(out, "  default {d}");
        }
        let _ = writeln!(out, "  - {}", s.description.as_deref().unwrap_or(&s.title));
    }
    out
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tobj) = props.get("type").and_then(Value::as_object) else {
        return false;
    };
    if tobj.get("const").and_then(Value::as_str) == Some(kind_key) {
        return true;
    }
    matches!(
        tobj.get("enum").and_then(Value::as_array).map(Vec::as_slice),
        Some([only]) if only.as_str() == Some(kind_key)
    )
}

fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn primitive_kind(s: &str) -> Option<FieldKind> {
    match s {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        "array" => Some(FieldKind::Array),
        _ => None,
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    match ty {
        Some(Value::String(s)) => primitive_kind(s),
        // Option<T> shows up as ["T", "null"]
        Some(Value::Array(arr)) => arr.iter().filter_map(Value::as_str).find_map(primitive_kind),
        _ => None,
    }
}
