//! Opaque identifier for numeric fields.
//!
//! A plain `u64` keeps the core independent of any widget or DOM id type.
//! Host layers convert their own ids at the boundary.

/// Identifier for a field within a [`NumericFieldStore`](crate::NumericFieldStore).
///
/// The value carries no meaning inside this crate; it is only a key.
///
/// ```
/// use numeric_input::FieldId;
///
/// let id = FieldId::from_raw(7);
/// assert_eq!(u64::from(id), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl FieldId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for FieldId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<FieldId> for u64 {
    #[inline]
    fn from(id: FieldId) -> Self {
        id.as_raw()
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field#{}", self.0)
    }
}
