use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a candidate record, as assigned by the remote catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The derived attribute a batch assigns (the operation kind of a batch job)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Scannable barcode number
    Barcode,
    /// Stock keeping unit
    Sku,
}

impl AttributeKind {
    /// Human-facing label used in outcome messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Barcode => "Barcode",
            Self::Sku => "SKU",
        }
    }
}

impl Default for AttributeKind {
    fn default() -> Self {
        Self::Barcode
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Barcode => write!(f, "barcode"),
            Self::Sku => write!(f, "sku"),
        }
    }
}

impl std::str::FromStr for AttributeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "barcode" => Ok(Self::Barcode),
            "sku" => Ok(Self::Sku),
            _ => Err(format!("Invalid attribute kind: {s}")),
        }
    }
}

/// A candidate product that may or may not yet carry its barcode and SKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            sku: None,
            barcode: None,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Current value of the given attribute. Empty strings count as absent.
    pub fn generated_value(&self, kind: AttributeKind) -> Option<&str> {
        let value = match kind {
            AttributeKind::Barcode => self.barcode.as_deref(),
            AttributeKind::Sku => self.sku.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// A record is satisfied once the target attribute is present
    pub fn is_satisfied(&self, kind: AttributeKind) -> bool {
        self.generated_value(kind).is_some()
    }

    pub fn set_generated(&mut self, kind: AttributeKind, value: impl Into<String>) {
        let slot = match kind {
            AttributeKind::Barcode => &mut self.barcode,
            AttributeKind::Sku => &mut self.sku,
        };
        *slot = Some(value.into());
    }

    /// Case-insensitive substring match on the name or the SKU.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    pub(crate) fn matches_lowered(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(needle))
        };
        hit(&self.name) || hit(&self.sku)
    }
}
