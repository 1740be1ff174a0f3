// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Value synchronization between message instances and node trees.
//!
//! Both directions match a variable node to a message field by browse name
//! only. A node without a matching field (or a field without a matching node)
//! is skipped.
//!
//! Writing classifies each value once with [`MessageValue::shape`]:
//!
//! | Shape        | Written as                                     |
//! |--------------|------------------------------------------------|
//! | `Null`       | nothing; children are still visited            |
//! | `Primitive`  | the scalar                                     |
//! | `Array`      | the whole array, unless it is empty            |
//! | `Temporal`   | the whole seconds, fractions dropped           |
//! | `Structured` | its text rendering (degraded mode)             |
//!
//! Reading converts a node value to the kind the message field already holds.

use chrono::{DateTime, Utc};

use crate::core::{MessageInstance, MessageValue, Result, RosDuration, RosTime, ValueShape};
use crate::opcua::space::AddressSpace;
use crate::opcua::types::{NodeId, Variant};

/// Copy `value` into `node` and, by browse name, into its variable children.
pub fn update_node_with_message<S>(space: &mut S, node: &NodeId, value: &MessageValue) -> Result<()>
where
    S: AddressSpace + ?Sized,
{
    match value.shape() {
        ValueShape::Null => {}
        ValueShape::Primitive(scalar) => space.write_value(node, to_variant(scalar))?,
        ValueShape::Array(items) => {
            if !items.is_empty() {
                space.write_value(node, Variant::Array(items.iter().map(to_variant).collect()))?;
            }
        }
        ValueShape::Temporal(secs) => space.write_value(node, to_variant(&secs))?,
        ValueShape::Structured(message) => {
            space.write_value(node, Variant::String(message.to_string()))?;
        }
    }

    for child in space.variable_children(node)? {
        let name = space.browse_name(&child)?.name;
        match value.attribute(&name) {
            Some(attribute) => update_node_with_message(space, &child, &attribute)?,
            None => tracing::debug!(node = %child, field = %name, "no matching field, skipped"),
        }
    }
    Ok(())
}

/// Copy the values below `node` into `message` and return it.
pub fn update_message_instance_with_node<S>(
    space: &S,
    mut message: MessageInstance,
    node: &NodeId,
) -> Result<MessageInstance>
where
    S: AddressSpace + ?Sized,
{
    read_into(space, &mut message, node)?;
    Ok(message)
}

/// Copy the values below `node` into `message` in place.
///
/// Nested messages must already exist on `message`; none are created.
pub fn read_into<S>(space: &S, message: &mut MessageInstance, node: &NodeId) -> Result<()>
where
    S: AddressSpace + ?Sized,
{
    for child in space.variable_children(node)? {
        let name = space.browse_name(&child)?.name;
        match message.get_mut(&name) {
            Some(current) => read_field(space, current, &child, &name)?,
            None => tracing::debug!(node = %child, field = %name, "no matching field, skipped"),
        }
    }
    Ok(())
}

fn read_field<S>(space: &S, current: &mut MessageValue, node: &NodeId, name: &str) -> Result<()>
where
    S: AddressSpace + ?Sized,
{
    let children = space.variable_children(node)?;
    if children.is_empty() {
        let variant = space.read_value(node)?;
        if variant.is_empty() {
            return Ok(());
        }
        match coerce(&variant, current) {
            Some(value) => *current = value,
            None => tracing::warn!(
                field = name,
                expected = current.kind_name(),
                value = %variant,
                "cannot convert node value, field left unchanged"
            ),
        }
        return Ok(());
    }

    if current.is_temporal() {
        for child in children {
            let part = space.browse_name(&child)?.name;
            let variant = space.read_value(&child)?;
            if !set_temporal_part(current, &part, &variant) {
                tracing::debug!(field = name, part = %part, "temporal part skipped");
            }
        }
        return Ok(());
    }

    match current {
        MessageValue::Struct(nested) => read_into(space, nested, node),
        other => {
            tracing::debug!(
                field = name,
                kind = other.kind_name(),
                "structured node for a non-message field, skipped"
            );
            Ok(())
        }
    }
}

fn set_temporal_part(current: &mut MessageValue, part: &str, variant: &Variant) -> bool {
    let Some(value) = integer_of(variant) else {
        return false;
    };
    match (current, part) {
        (MessageValue::Time(t), "secs") => u32::try_from(value).map(|v| t.secs = v).is_ok(),
        (MessageValue::Time(t), "nsecs") => u32::try_from(value).map(|v| t.nsecs = v).is_ok(),
        (MessageValue::Duration(d), "secs") => i32::try_from(value).map(|v| d.secs = v).is_ok(),
        (MessageValue::Duration(d), "nsecs") => i32::try_from(value).map(|v| d.nsecs = v).is_ok(),
        _ => false,
    }
}

/// Address-space value for a message value.
///
/// Times inside arrays become date-times; durations keep whole seconds.
pub fn to_variant(value: &MessageValue) -> Variant {
    match value {
        MessageValue::Bool(v) => Variant::Boolean(*v),
        MessageValue::Int8(v) => Variant::SByte(*v),
        MessageValue::Int16(v) => Variant::Int16(*v),
        MessageValue::Int32(v) => Variant::Int32(*v),
        MessageValue::Int64(v) => Variant::Int64(*v),
        MessageValue::UInt8(v) => Variant::Byte(*v),
        MessageValue::UInt16(v) => Variant::UInt16(*v),
        MessageValue::UInt32(v) => Variant::UInt32(*v),
        MessageValue::UInt64(v) => Variant::UInt64(*v),
        MessageValue::Float32(v) => Variant::Float(*v),
        MessageValue::Float64(v) => Variant::Double(*v),
        MessageValue::String(s) => Variant::String(s.clone()),
        MessageValue::Time(t) => Variant::DateTime(
            DateTime::<Utc>::from_timestamp(i64::from(t.secs), t.nsecs)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        ),
        MessageValue::Duration(d) => Variant::Int32(d.secs),
        MessageValue::Array(items) => Variant::Array(items.iter().map(to_variant).collect()),
        MessageValue::Struct(msg) => Variant::String(msg.to_string()),
        MessageValue::Null => Variant::Empty,
    }
}

/// Message value for an address-space value, keeping its natural type.
pub fn from_variant(variant: &Variant) -> MessageValue {
    match variant {
        Variant::Empty => MessageValue::Null,
        Variant::Boolean(v) => MessageValue::Bool(*v),
        Variant::SByte(v) => MessageValue::Int8(*v),
        Variant::Byte(v) => MessageValue::UInt8(*v),
        Variant::Int16(v) => MessageValue::Int16(*v),
        Variant::UInt16(v) => MessageValue::UInt16(*v),
        Variant::Int32(v) => MessageValue::Int32(*v),
        Variant::UInt32(v) => MessageValue::UInt32(*v),
        Variant::Int64(v) => MessageValue::Int64(*v),
        Variant::UInt64(v) => MessageValue::UInt64(*v),
        Variant::Float(v) => MessageValue::Float32(*v),
        Variant::Double(v) => MessageValue::Float64(*v),
        Variant::String(s) => MessageValue::String(s.clone()),
        Variant::DateTime(dt) => match time_of(variant) {
            Some(t) => MessageValue::Time(t),
            None => MessageValue::String(dt.to_rfc3339()),
        },
        Variant::Array(items) => MessageValue::Array(items.iter().map(from_variant).collect()),
    }
}

/// Convert `variant` to the kind `current` holds.
///
/// A `Null` field takes the variant's natural type. Returns `None` when the
/// value does not fit (out of range, unparsable, or a nested message).
pub fn coerce(variant: &Variant, current: &MessageValue) -> Option<MessageValue> {
    let value = match current {
        MessageValue::Bool(_) => match variant {
            Variant::Boolean(v) => MessageValue::Bool(*v),
            Variant::String(s) => MessageValue::Bool(s.trim().parse().ok()?),
            other => MessageValue::Bool(integer_of(other)? != 0),
        },
        MessageValue::Int8(_) => MessageValue::Int8(i8::try_from(integer_of(variant)?).ok()?),
        MessageValue::Int16(_) => MessageValue::Int16(i16::try_from(integer_of(variant)?).ok()?),
        MessageValue::Int32(_) => MessageValue::Int32(i32::try_from(integer_of(variant)?).ok()?),
        MessageValue::Int64(_) => MessageValue::Int64(i64::try_from(integer_of(variant)?).ok()?),
        MessageValue::UInt8(_) => MessageValue::UInt8(u8::try_from(integer_of(variant)?).ok()?),
        MessageValue::UInt16(_) => {
            MessageValue::UInt16(u16::try_from(integer_of(variant)?).ok()?)
        }
        MessageValue::UInt32(_) => {
            MessageValue::UInt32(u32::try_from(integer_of(variant)?).ok()?)
        }
        MessageValue::UInt64(_) => {
            MessageValue::UInt64(u64::try_from(integer_of(variant)?).ok()?)
        }
        MessageValue::Float32(_) => MessageValue::Float32(float_of(variant)? as f32),
        MessageValue::Float64(_) => MessageValue::Float64(float_of(variant)?),
        MessageValue::String(_) => match variant {
            Variant::String(s) => MessageValue::String(s.clone()),
            other => MessageValue::String(other.to_string()),
        },
        MessageValue::Time(_) => MessageValue::Time(time_of(variant)?),
        MessageValue::Duration(_) => MessageValue::Duration(duration_of(variant)?),
        MessageValue::Array(existing) => {
            let Variant::Array(items) = variant else {
                return None;
            };
            let converted = match existing.first() {
                Some(template) => items
                    .iter()
                    .map(|item| coerce(item, template))
                    .collect::<Option<Vec<_>>>()?,
                None => items.iter().map(from_variant).collect(),
            };
            MessageValue::Array(converted)
        }
        MessageValue::Struct(_) => return None,
        MessageValue::Null => from_variant(variant),
    };
    Some(value)
}

fn integer_of(variant: &Variant) -> Option<i128> {
    if let Some(v) = variant.as_i128() {
        return Some(v);
    }
    match variant {
        Variant::Float(v) => whole(f64::from(*v)),
        Variant::Double(v) => whole(*v),
        Variant::String(s) => s.trim().parse().ok(),
        Variant::DateTime(dt) => Some(i128::from(dt.timestamp())),
        _ => None,
    }
}

fn whole(v: f64) -> Option<i128> {
    v.is_finite().then(|| v.trunc() as i128)
}

fn float_of(variant: &Variant) -> Option<f64> {
    match variant {
        Variant::String(s) => s.trim().parse().ok(),
        other => other.as_f64(),
    }
}

fn time_of(variant: &Variant) -> Option<RosTime> {
    match variant {
        Variant::DateTime(dt) => Some(RosTime::new(
            u32::try_from(dt.timestamp()).ok()?,
            dt.timestamp_subsec_nanos(),
        )),
        other => Some(RosTime::new(u32::try_from(integer_of(other)?).ok()?, 0)),
    }
}

fn duration_of(variant: &Variant) -> Option<RosDuration> {
    match variant {
        Variant::Float(_) | Variant::Double(_) => RosDuration::from_secs_f64(variant.as_f64()?),
        other => Some(RosDuration::new(i32::try_from(integer_of(other)?).ok()?, 0)),
    }
}
