//! Object marshalling: wire objects ⇄ typed instances.
//!
//! Decoding walks the target type's field table, dispatching each wire value
//! through the field's bound codec and recursing into nested models and
//! lists. Abstract targets resolve through their discriminator family
//! first; an unknown tag degrades to a passthrough record instead of
//! failing, and unmatched wire keys land in the instance's `extra` bag.
//! Encoding is the inverse, keyed by wire alias, with absent fields omitted
//! entirely (an unintended `null` changes request semantics server-side).

use tradewire_json::WireValue;

use crate::error::DecodeError;
use crate::field::{FieldCodec, Presence};
use crate::instance::{FieldValue, TypedInstance};
use crate::model::{ModelType, TypeId};
use crate::registry::Registry;

/// Decodes a wire object into an instance of `target`.
///
/// `target` may be abstract, in which case its discriminator family picks
/// the concrete type. Structural and codec failures identify the offending
/// field by dotted path from the decode root.
pub fn decode(
    registry: &Registry,
    target: TypeId,
    wire: &WireValue,
) -> Result<TypedInstance, DecodeError> {
    decode_at(registry, target, wire, "")
}

/// Encodes an instance back into a wire object, keyed by alias.
///
/// Fields in table order, then unrecognized fields verbatim. There is no
/// partial encode: a required field left absent fails the whole instance.
pub fn encode(registry: &Registry, instance: &TypedInstance) -> Result<WireValue, DecodeError> {
    encode_at(registry, instance, "")
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{path}.{name}")
    }
}

fn root_path(path: &str) -> String {
    if path.is_empty() {
        "(document)".to_owned()
    } else {
        path.to_owned()
    }
}

fn decode_at(
    registry: &Registry,
    target: TypeId,
    wire: &WireValue,
    path: &str,
) -> Result<TypedInstance, DecodeError> {
    let entries = wire.as_object().ok_or_else(|| DecodeError::TypeMismatch {
        path: root_path(path),
        expected: "object",
        got: wire.kind(),
    })?;

    let model = registry.model(target);
    if !model.is_abstract() {
        return decode_fields(registry, model, entries, path);
    }

    let family = registry.family(target).unwrap_or_else(|| {
        panic!("abstract model `{}` has no bound discriminator family", model.name())
    });
    let tag = match wire.get(family.discriminator_field()) {
        None => {
            return Err(DecodeError::MissingDiscriminator {
                field: family.discriminator_field().to_owned(),
            })
        }
        Some(WireValue::Str(s)) => s.as_str(),
        Some(other) => {
            return Err(DecodeError::TypeMismatch {
                path: join(path, family.discriminator_field()),
                expected: "string",
                got: other.kind(),
            })
        }
    };

    // Unknown tags, whether outside the enum or merely unbound, degrade to
    // a passthrough record keeping every wire field verbatim.
    match family.resolve(tag) {
        Ok(concrete) => decode_fields(registry, registry.model(concrete), entries, path),
        Err(_) => {
            let mut inst = TypedInstance::new(target);
            for (key, value) in entries {
                inst.push_extra(key.clone(), value.clone());
            }
            Ok(inst)
        }
    }
}

fn decode_fields(
    registry: &Registry,
    model: &ModelType,
    entries: &[(String, WireValue)],
    path: &str,
) -> Result<TypedInstance, DecodeError> {
    let table = model.table();
    let mut inst = TypedInstance::new(model.id());

    for (key, value) in entries {
        match table.by_alias(key) {
            Some(desc) => {
                let value = if value.is_null() {
                    FieldValue::Null
                } else {
                    decode_value(registry, desc.codec(), value, &join(path, desc.name()))?
                };
                inst.set(desc.name(), value);
            }
            None => inst.push_extra(key.clone(), value.clone()),
        }
    }

    for desc in table.iter() {
        if !inst.is_absent(desc.name()) {
            continue;
        }
        match desc.presence() {
            Presence::Required => {
                return Err(DecodeError::MissingRequiredField {
                    path: join(path, desc.name()),
                })
            }
            Presence::DefaultValue(default) => {
                let value = if default.is_null() {
                    FieldValue::Null
                } else {
                    decode_value(registry, desc.codec(), default, &join(path, desc.name()))?
                };
                inst.set(desc.name(), value);
            }
            Presence::Optional => {}
        }
    }

    Ok(inst)
}

fn decode_value(
    registry: &Registry,
    codec: &FieldCodec,
    wire: &WireValue,
    path: &str,
) -> Result<FieldValue, DecodeError> {
    match codec {
        FieldCodec::Scalar(kind) => kind.parse(wire).map_err(|e| DecodeError::at(path, e)),
        FieldCodec::Model(target) => {
            decode_at(registry, *target, wire, path).map(FieldValue::Model)
        }
        FieldCodec::List(inner) => {
            let items = wire.as_array().ok_or_else(|| DecodeError::TypeMismatch {
                path: path.to_owned(),
                expected: "array",
                got: wire.kind(),
            })?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let value = if item.is_null() {
                    FieldValue::Null
                } else {
                    decode_value(registry, inner, item, &format!("{path}[{i}]"))?
                };
                out.push(value);
            }
            Ok(FieldValue::List(out))
        }
    }
}

fn encode_at(
    registry: &Registry,
    instance: &TypedInstance,
    path: &str,
) -> Result<WireValue, DecodeError> {
    let model = registry.model(instance.type_id());
    let mut entries: Vec<(String, WireValue)> = Vec::new();

    for desc in model.table().iter() {
        let alias = desc.wire_alias().to_owned();
        match instance.get(desc.name()) {
            None => match desc.presence() {
                Presence::Required => {
                    return Err(DecodeError::MissingRequiredField {
                        path: join(path, desc.name()),
                    })
                }
                // constants (discriminator tags) re-emit their default
                Presence::DefaultValue(default) => entries.push((alias, default.clone())),
                Presence::Optional => {}
            },
            Some(FieldValue::Null) => entries.push((alias, WireValue::Null)),
            Some(value) => {
                let wire = encode_value(registry, desc.codec(), value, &join(path, desc.name()))?;
                entries.push((alias, wire));
            }
        }
    }

    for (key, value) in instance.extra() {
        entries.push((key.clone(), value.clone()));
    }

    Ok(WireValue::Object(entries))
}

fn encode_value(
    registry: &Registry,
    codec: &FieldCodec,
    value: &FieldValue,
    path: &str,
) -> Result<WireValue, DecodeError> {
    if matches!(value, FieldValue::Null) {
        return Ok(WireValue::Null);
    }
    match codec {
        FieldCodec::Scalar(kind) => kind.unparse(value).map_err(|e| DecodeError::at(path, e)),
        FieldCodec::Model(target) => {
            let inst = match value {
                FieldValue::Model(inst) => inst,
                other => {
                    return Err(DecodeError::ValueShape {
                        path: path.to_owned(),
                        detail: format!("field holds {}, codec expects model", other.kind()),
                    })
                }
            };
            // a family-typed field may hold any concrete member
            if inst.type_id() != *target && !registry.model(*target).is_abstract() {
                return Err(DecodeError::ValueShape {
                    path: path.to_owned(),
                    detail: format!(
                        "instance of `{}` where `{}` was declared",
                        registry.model(inst.type_id()).name(),
                        registry.model(*target).name()
                    ),
                });
            }
            encode_at(registry, inst, path)
        }
        FieldCodec::List(inner) => {
            let items = match value {
                FieldValue::List(items) => items,
                other => {
                    return Err(DecodeError::ValueShape {
                        path: path.to_owned(),
                        detail: format!("field holds {}, codec expects list", other.kind()),
                    })
                }
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(encode_value(registry, inner, item, &format!("{path}[{i}]"))?);
            }
            Ok(WireValue::Array(out))
        }
    }
}
