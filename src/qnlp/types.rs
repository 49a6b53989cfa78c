// Grammatical types carried by diagram wires.

use std::fmt;

/// The atomic grammatical types a diagram wire can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomicType {
    Noun,
    Sentence,
}

impl AtomicType {
    /// Short tag used when naming circuit symbols (`n` or `s`).
    pub fn tag(self) -> &'static str {
        match self {
            AtomicType::Noun => "n",
            AtomicType::Sentence => "s",
        }
    }
}

impl fmt::Display for AtomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
