use anyhow::{Context, Result, anyhow, bail};
use schemars::{Schema, schema_for};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldKind {
    fn from_json_type(ty: &str) -> Option<Self> {
        match ty {
            "string" => Some(FieldKind::String),
            "integer" => Some(FieldKind::Integer),
            "number" => Some(FieldKind::Number),
            "boolean" => Some(FieldKind::Boolean),
            _ => None,
        }
    }
}

/// One prompt-able field of a choice's `params` object.
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
    /// Allowed values of a string enum such as a table format; empty otherwise.
    pub options: Vec<String>,
}

pub fn schema_for<T: schemars::JsonSchema>() -> Schema {
    schema_for!(T)
}

/// Field specs of the `params` of the variant tagged `kind_key` in a
/// `{"type": ..., "params": ...}` enum schema. Fields skipped from the
/// schema, or whose type is not a scalar, are left to subprompts.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(Value::as_array)
        .context("missing oneOf/anyOf")?;

    let props = alts
        .iter()
        .filter_map(|b| b.as_object()?.get("properties")?.as_object())
        .find(|props| discriminant_matches(props, kind_key))
        .ok_or_else(|| anyhow!("no branch found for type={kind_key}"))?;

    let Some(params_obj) = props
        .get("params")
        .and_then(Value::as_object)
        .and_then(|o| resolve_ref_obj(root_obj, o))
    else {
        return Ok(vec![]);
    };

    let Some(params_props) = params_obj.get("properties").and_then(Value::as_object) else {
        return Ok(vec![]);
    };

    let required: Vec<&str> = params_obj
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut out = Vec::new();
    for (name, field_schema) in params_props {
        let field = field_schema
            .as_object()
            .with_context(|| format!("field schema for '{name}' is not an object"))?;
        if let Some(spec) = field_spec(root_obj, name, field, required.contains(&name.as_str()))? {
            out.push(spec);
        }
    }
    Ok(out)
}

fn field_spec(root_obj: &Object, name: &str, field: &Object, required: bool) -> Result<Option<FieldSpec>> {
    // Annotations on the property win over those on a referenced definition.
    let target = if field.contains_key("$ref") {
        resolve_ref_obj(root_obj, field)
            .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?
    } else {
        field
    };
    let lookup = |key: &str| field.get(key).or_else(|| target.get(key));

    let Some(kind) = detect_field_kind(target.get("type")) else {
        return Ok(None);
    };

    let options = target
        .get("enum")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    Ok(Some(FieldSpec {
        name: name.to_string(),
        title: lookup("title")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string(),
        description: lookup("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        required,
        kind,
        default: lookup("default").cloned(),
        min: lookup("minimum")
            .or_else(|| lookup("exclusiveMinimum"))
            .and_then(Value::as_f64),
        max: lookup("maximum")
            .or_else(|| lookup("exclusiveMaximum"))
            .and_then(Value::as_f64),
        options,
    }))
}

fn discriminant_matches(props: &Object, kind_key: &str) -> bool {
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

/// Resolves a local `$ref` such as `#/$defs/GammaParameters`; objects
/// without a `$ref` are returned as-is.
fn resolve_ref_obj<'a>(root_obj: &'a Object, obj: &'a Object) -> Option<&'a Object> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            path.split('/').try_fold(root_obj, |cur, raw_seg| {
                // JSON Pointer unescape
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur.get(&seg)?.as_object()
            })
        }
        _ => Some(obj),
    }
}

/// Scalar kind of a schema `type`, looking through `["null", T]` unions
/// produced for `Option<T>`.
fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    match ty? {
        Value::String(s) => FieldKind::from_json_type(s),
        Value::Array(arr) => arr
            .iter()
            .filter_map(Value::as_str)
            .find_map(FieldKind::from_json_type),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{DistributionChoice, TaskChoice};

    fn spec<'a>(specs: &'a [FieldSpec], name: &str) -> &'a FieldSpec {
        specs
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("missing field {name}"))
    }

    #[test]
    fn gamma_fields_carry_titles_and_bounds() {
        let schema = schema_for::<DistributionChoice>();
        let specs = specs_for_kind(&schema, "gamma").unwrap();
        assert_eq!(specs.len(), 3);

        let shape = spec(&specs, "shape");
        assert_eq!(shape.title, "Shape");
        assert_eq!(shape.kind, FieldKind::Number);
        assert_eq!(shape.min, Some(0.0));
        assert!(!shape.required);

        let seed = spec(&specs, "seed");
        assert_eq!(seed.kind, FieldKind::Integer);
        assert!(seed.options.is_empty());
    }

    #[test]
    fn enum_string_fields_list_their_options() {
        let schema = schema_for::<TaskChoice>();
        let specs = specs_for_kind(&schema, "runtime-benchmark").unwrap();
        let format = spec(&specs, "format");
        assert_eq!(format.kind, FieldKind::String);
        assert_eq!(format.title, "Format");
        assert_eq!(format.options, vec!["csv", "tsv", "json"]);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let schema = schema_for::<DistributionChoice>();
        let err = specs_for_kind(&schema, "poisson").unwrap_err();
        assert!(err.to_string().contains("type=poisson"));
    }

    #[test]
    fn optional_types_resolve_to_their_scalar() {
        let ty = serde_json::json!(["null", "integer"]);
        assert_eq!(detect_field_kind(Some(&ty)), Some(FieldKind::Integer));
        assert_eq!(detect_field_kind(Some(&Value::from("array"))), None);
        assert_eq!(detect_field_kind(None), None);
    }

    #[test]
    fn refs_are_followed_with_pointer_escapes() {
        let root = serde_json::json!({
            "$defs": {"a/b": {"type": "string"}}
        });
        let root = root.as_object().unwrap();
        let field = serde_json::json!({"$ref": "#/$defs/a~1b"});
        let resolved = resolve_ref_obj(root, field.as_object().unwrap()).unwrap();
        assert_eq!(resolved.get("type"), Some(&Value::from("string")));
    }
}
