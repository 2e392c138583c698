use std::fmt;

/// Delivery class of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Gates the barrier; one buffered value (latest wins) until it opens.
    Required,
    /// One buffered value (latest wins) until the barrier opens; does not gate it.
    Optional,
    /// Every value is queued (FIFO) until the barrier opens; does not gate it.
    Listed,
}

impl Group {
    /// Returns a short stable label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Required => "required",
            Group::Optional => "optional",
            Group::Listed => "listed",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
