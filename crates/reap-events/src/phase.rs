//! Dispatch phases.

/// Ordered dispatch phase of an [`EventBus`](crate::EventBus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Runs first. Use it to veto or rewrite before everyone else.
    Priority,
    /// Where most listeners belong.
    Default,
    /// Runs last, after every other listener had its say.
    Deferred,
}

impl Phase {
    /// All phases in dispatch order.
    pub const ORDER: [Self; 3] = [Self::Priority, Self::Default, Self::Deferred];
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Priority => "priority",
            Self::Default => "default",
            Self::Deferred => "deferred",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_priority_default_deferred() {
        assert_eq!(Phase::ORDER, [Phase::Priority, Phase::Default, Phase::Deferred]);
        assert!(Phase::Priority < Phase::Deferred);
    }
}
