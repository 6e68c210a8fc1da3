//! Protocol corpus: the fixed, ordered set of methodology documents.
//!
//! Read-only after process start; shared freely without locking. The
//! corpus order is the order protocols are rendered into the prompt, so
//! it is part of the prompt composer's determinism contract.

mod data;

use crate::models::{Protocol, ProtocolCategory};

/// Ordered, immutable collection of protocol documents.
#[derive(Debug, Clone, Copy)]
pub struct ProtocolCorpus {
    protocols: &'static [Protocol],
}

impl ProtocolCorpus {
    /// The built-in twelve-document corpus.
    pub fn builtin() -> Self {
        Self {
            protocols: data::PROTOCOLS,
        }
    }

    /// Protocols in fixed corpus order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Protocol> {
        self.protocols.iter()
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    /// Look up a protocol by its unique id.
    pub fn get(&self, id: &str) -> Option<&'static Protocol> {
        self.protocols.iter().find(|p| p.id == id)
    }

    /// Protocols belonging to one category, in corpus order.
    pub fn by_category(&self, category: ProtocolCategory) -> Vec<&'static Protocol> {
        self.protocols
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }
}

impl Default for ProtocolCorpus {
    fn default() -> Self {
        Self::builtin()
    }
}
