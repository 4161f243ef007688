//! Axis-parameter catalog types
//!
//! Host tooling addresses axis settings by small numeric ids. A catalog is
//! a static table that maps each id to a rule: either a plain register
//! field or a named derived rule the chip driver implements. Keeping the
//! mapping as data lets the dispatcher stay a short, generic lookup.

use crate::error::ErrorFlags;
use crate::field::Field;

/// Direction of a parameter access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Op {
    /// Get axis parameter
    Read,
    /// Set axis parameter
    Write,
}

/// Directions an entry supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Value can only be read
    ReadOnly,
    /// Value can be read and written
    ReadWrite,
}

impl Access {
    /// Check if the access allows `op`
    pub fn allows(self, op: Op) -> bool {
        match (self, op) {
            (_, Op::Read) => true,
            (Access::ReadWrite, Op::Write) => true,
            (Access::ReadOnly, Op::Write) => false,
        }
    }
}

/// How an entry is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule<D> {
    /// Pass-through register field
    Field(Field),
    /// Named rule implemented by the chip driver
    Derived(D),
}

/// One row of a parameter catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterEntry<D> {
    /// Protocol id
    pub id: u8,
    /// Supported directions
    pub access: Access,
    /// Resolution rule
    pub rule: Rule<D>,
}

impl<D> ParameterEntry<D> {
    /// Read-write register field
    pub const fn field(id: u8, field: Field) -> Self {
        Self {
            id,
            access: Access::ReadWrite,
            rule: Rule::Field(field),
        }
    }

    /// Read-only register field
    pub const fn field_read_only(id: u8, field: Field) -> Self {
        Self {
            id,
            access: Access::ReadOnly,
            rule: Rule::Field(field),
        }
    }

    /// Read-write derived rule
    pub const fn derived(id: u8, rule: D) -> Self {
        Self {
            id,
            access: Access::ReadWrite,
            rule: Rule::Derived(rule),
        }
    }

    /// Read-only derived rule
    pub const fn derived_read_only(id: u8, rule: D) -> Self {
        Self {
            id,
            access: Access::ReadOnly,
            rule: Rule::Derived(rule),
        }
    }

    /// Check the entry supports `op`
    pub fn check(&self, op: Op) -> Result<(), ErrorFlags> {
        if self.access.allows(op) {
            Ok(())
        } else {
            Err(ErrorFlags::UNSUPPORTED_DIRECTION)
        }
    }
}

/// Find an entry in a catalog sorted by id
pub fn lookup<D>(catalog: &[ParameterEntry<D>], id: u8) -> Result<&ParameterEntry<D>, ErrorFlags> {
    catalog
        .binary_search_by_key(&id, |entry| entry.id)
        .map(|index| &catalog[index])
        .map_err(|_| ErrorFlags::UNKNOWN_TYPE)
}

/// Check that catalog ids are strictly increasing
pub fn is_sorted<D>(catalog: &[ParameterEntry<D>]) -> bool {
    catalog.windows(2).all(|pair| pair[0].id < pair[1].id)
}

/// Which end of a parameter's range is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitKind {
    /// Lowest accepted value
    Min,
    /// Highest accepted value
    Max,
}
