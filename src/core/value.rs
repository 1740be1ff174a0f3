// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message-side value model.
//!
//! Provides an in-memory representation of ROS message instances as seen by
//! the value synchronizers. Field access goes through a [`FieldLayout`] that is
//! built once per structured type, so name lookups are a map query.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// ROS `time`: seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RosTime {
    pub secs: u32,
    pub nsecs: u32,
}

impl RosTime {
    pub fn new(secs: u32, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }
}

/// ROS `duration`: signed seconds and nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RosDuration {
    pub secs: i32,
    pub nsecs: i32,
}

impl RosDuration {
    pub fn new(secs: i32, nsecs: i32) -> Self {
        Self { secs, nsecs }
    }

    /// Split fractional seconds so that `0 <= nsecs < 1e9`, as ROS does.
    ///
    /// `-0.5` becomes `(-1, 500000000)`.
    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        if !secs.is_finite() {
            return None;
        }
        let floor = secs.floor();
        let mut whole = floor as i64;
        let mut nsecs = ((secs - floor) * 1e9).round() as i64;
        if nsecs >= 1_000_000_000 {
            whole += 1;
            nsecs -= 1_000_000_000;
        }
        Some(Self::new(i32::try_from(whole).ok()?, nsecs as i32))
    }

    /// Total signed nanoseconds.
    pub fn as_nanos(&self) -> i64 {
        i64::from(self.secs) * 1_000_000_000 + i64::from(self.nsecs)
    }
}

/// A single value held by a message field.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Temporal primitives
    Time(RosTime),
    Duration(RosDuration),

    // Single-dimension array
    Array(Vec<MessageValue>),

    // Nested message
    Struct(MessageInstance),

    // Absent value
    Null,
}

/// Classification of a value, computed once before synchronizing it.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueShape<'a> {
    /// No value to assign.
    Null,
    /// Scalar written as-is.
    Primitive(&'a MessageValue),
    /// Ordered sequence written as an array value.
    Array(&'a [MessageValue]),
    /// Time or duration; carries the whole-seconds component only.
    Temporal(MessageValue),
    /// Any other nested message.
    Structured(&'a MessageInstance),
}

impl MessageValue {
    /// Classify this value for synchronization.
    ///
    /// A nested message whose short type name is `Time` or `Duration` and that
    /// carries a `secs` (or `sec`) field is treated as temporal.
    pub fn shape(&self) -> ValueShape<'_> {
        match self {
            MessageValue::Null => ValueShape::Null,
            MessageValue::Array(items) => ValueShape::Array(items),
            MessageValue::Time(t) => ValueShape::Temporal(MessageValue::UInt32(t.secs)),
            MessageValue::Duration(d) => ValueShape::Temporal(MessageValue::Int32(d.secs)),
            MessageValue::Struct(msg) => match msg.temporal_seconds() {
                Some(secs) => ValueShape::Temporal(secs.clone()),
                None => ValueShape::Structured(msg),
            },
            other => ValueShape::Primitive(other),
        }
    }

    /// Look up a named attribute of this value.
    ///
    /// Nested messages expose their fields; `Time` and `Duration` expose
    /// `secs` and `nsecs`. Everything else has no attributes.
    pub fn attribute(&self, name: &str) -> Option<Cow<'_, MessageValue>> {
        match self {
            MessageValue::Struct(msg) => msg.get(name).map(Cow::Borrowed),
            MessageValue::Time(t) => match name {
                "secs" => Some(Cow::Owned(MessageValue::UInt32(t.secs))),
                "nsecs" => Some(Cow::Owned(MessageValue::UInt32(t.nsecs))),
                _ => None,
            },
            MessageValue::Duration(d) => match name {
                "secs" => Some(Cow::Owned(MessageValue::Int32(d.secs))),
                "nsecs" => Some(Cow::Owned(MessageValue::Int32(d.nsecs))),
                _ => None,
            },
            _ => None,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, MessageValue::Null)
    }

    /// Check if this value is a temporal type (time or duration).
    pub fn is_temporal(&self) -> bool {
        matches!(self, MessageValue::Time(_) | MessageValue::Duration(_))
    }

    /// Get the nested message, if this is one.
    pub fn as_struct(&self) -> Option<&MessageInstance> {
        match self {
            MessageValue::Struct(msg) => Some(msg),
            _ => None,
        }
    }

    /// Get the nested message mutably, if this is one.
    pub fn as_struct_mut(&mut self) -> Option<&mut MessageInstance> {
        match self {
            MessageValue::Struct(msg) => Some(msg),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MessageValue::Int8(v) => Some(*v as i64),
            MessageValue::Int16(v) => Some(*v as i64),
            MessageValue::Int32(v) => Some(*v as i64),
            MessageValue::Int64(v) => Some(*v),
            MessageValue::UInt8(v) => Some(*v as i64),
            MessageValue::UInt16(v) => Some(*v as i64),
            MessageValue::UInt32(v) => Some(*v as i64),
            MessageValue::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MessageValue::Float32(v) => Some(*v as f64),
            MessageValue::Float64(v) => Some(*v),
            MessageValue::UInt64(v) => Some(*v as f64),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Get a human-readable name for this value's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MessageValue::Bool(_) => "bool",
            MessageValue::Int8(_) => "int8",
            MessageValue::Int16(_) => "int16",
            MessageValue::Int32(_) => "int32",
            MessageValue::Int64(_) => "int64",
            MessageValue::UInt8(_) => "uint8",
            MessageValue::UInt16(_) => "uint16",
            MessageValue::UInt32(_) => "uint32",
            MessageValue::UInt64(_) => "uint64",
            MessageValue::Float32(_) => "float32",
            MessageValue::Float64(_) => "float64",
            MessageValue::String(_) => "string",
            MessageValue::Time(_) => "time",
            MessageValue::Duration(_) => "duration",
            MessageValue::Array(_) => "array",
            MessageValue::Struct(_) => "struct",
            MessageValue::Null => "null",
        }
    }
}

impl fmt::Display for MessageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageValue::Bool(v) => write!(f, "{}", if *v { "True" } else { "False" }),
            MessageValue::Int8(v) => write!(f, "{v}"),
            MessageValue::Int16(v) => write!(f, "{v}"),
            MessageValue::Int32(v) => write!(f, "{v}"),
            MessageValue::Int64(v) => write!(f, "{v}"),
            MessageValue::UInt8(v) => write!(f, "{v}"),
            MessageValue::UInt16(v) => write!(f, "{v}"),
            MessageValue::UInt32(v) => write!(f, "{v}"),
            MessageValue::UInt64(v) => write!(f, "{v}"),
            MessageValue::Float32(v) => write!(f, "{v:?}"),
            MessageValue::Float64(v) => write!(f, "{v:?}"),
            MessageValue::String(s) => write!(f, "\"{s}\""),
            MessageValue::Time(t) => write!(f, "{}.{:09}", t.secs, t.nsecs),
            MessageValue::Duration(d) => {
                let nanos = d.as_nanos();
                let sign = if nanos < 0 { "-" } else { "" };
                let abs = nanos.unsigned_abs();
                write!(f, "{sign}{}.{:09}", abs / 1_000_000_000, abs % 1_000_000_000)
            }
            MessageValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            MessageValue::Struct(msg) => write!(f, "{{{}}}", msg.inline()),
            MessageValue::Null => write!(f, "None"),
        }
    }
}

/// Field name to slot mapping for one structured type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldLayout {
    names: Vec<String>,
    slots: HashMap<String, usize>,
}

impl FieldLayout {
    /// Build a layout from ordered field names. Later duplicates are ignored.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut layout = Self::default();
        for name in names {
            let name = name.into();
            if layout.slots.contains_key(&name) {
                continue;
            }
            layout.slots.insert(name.clone(), layout.names.len());
            layout.names.push(name);
        }
        layout
    }

    /// Slot index of a field.
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    /// Ordered field names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// An instance of a structured ROS message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageInstance {
    type_name: String,
    layout: Arc<FieldLayout>,
    values: Vec<MessageValue>,
}

impl MessageInstance {
    /// Create an instance with every field set to [`MessageValue::Null`].
    pub fn new(type_name: impl Into<String>, layout: Arc<FieldLayout>) -> Self {
        let values = vec![MessageValue::Null; layout.len()];
        Self {
            type_name: type_name.into(),
            layout,
            values,
        }
    }

    /// Create an instance from ordered `(name, value)` pairs.
    pub fn from_fields<I, S>(type_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, MessageValue)>,
        S: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<MessageValue>) =
            fields.into_iter().map(|(n, v)| (n.into(), v)).unzip();
        let layout = Arc::new(FieldLayout::new(names.iter().cloned()));
        let mut msg = Self::new(type_name, layout);
        for (name, value) in names.iter().zip(values) {
            msg.set(name, value);
        }
        msg
    }

    /// Full ROS type name (e.g. "geometry_msgs/Point").
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Type name without the package prefix.
    pub fn short_type_name(&self) -> &str {
        self.type_name
            .rsplit('/')
            .next()
            .unwrap_or(self.type_name.as_str())
    }

    pub fn layout(&self) -> &Arc<FieldLayout> {
        &self.layout
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.layout.slot(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&MessageValue> {
        self.layout.slot(name).map(|i| &self.values[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut MessageValue> {
        self.layout.slot(name).map(|i| &mut self.values[i])
    }

    /// Set a field value. Returns false if the type has no such field.
    pub fn set(&mut self, name: &str, value: MessageValue) -> bool {
        match self.layout.slot(name) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &MessageValue)> {
        self.layout
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Seconds component if this message is a `Time`/`Duration` struct.
    fn temporal_seconds(&self) -> Option<&MessageValue> {
        match self.short_type_name() {
            "Time" | "Duration" => self.get("secs").or_else(|| self.get("sec")),
            _ => None,
        }
    }

    fn inline(&self) -> String {
        self.fields()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn write_block(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let pad = "  ".repeat(indent);
            match value {
                MessageValue::Struct(nested) => {
                    write!(f, "{pad}{name}:")?;
                    if !nested.values.is_empty() {
                        writeln!(f)?;
                        nested.write_block(f, indent + 1)?;
                    }
                }
                other => write!(f, "{pad}{name}: {other}")?,
            }
        }
        Ok(())
    }
}

/// YAML-like listing, one `name: value` per line with nested messages indented.
impl fmt::Display for MessageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_block(f, 0)
    }
}
