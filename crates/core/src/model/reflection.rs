use crate::model::JuzId;

/// Transient display state of the reflection text. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReflectionView {
    #[default]
    Idle,
    Loading {
        juz: JuzId,
    },
    Ready {
        juz: JuzId,
        text: String,
    },
}

impl ReflectionView {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            ReflectionView::Ready { text, .. } => Some(text),
            ReflectionView::Idle | ReflectionView::Loading { .. } => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, ReflectionView::Loading { .. })
    }
}

/// Handle for one in-flight reflection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionTicket {
    generation: u64,
    juz: JuzId,
}

impl ReflectionTicket {
    #[must_use]
    pub fn juz(&self) -> JuzId {
        self.juz
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holds the latest reflection and discards responses from superseded requests.
///
/// Each `begin` bumps the generation; `complete` only applies a result whose
/// ticket carries the current generation.
#[derive(Debug, Clone, Default)]
pub struct ReflectionSlot {
    generation: u64,
    view: ReflectionView,
}

impl ReflectionSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, juz: JuzId) -> ReflectionTicket {
        self.generation = self.generation.wrapping_add(1);
        self.view = ReflectionView::Loading { juz };
        ReflectionTicket {
            generation: self.generation,
            juz,
        }
    }

    /// Apply a finished request. Returns `false` if the ticket is stale.
    pub fn complete(&mut self, ticket: ReflectionTicket, text: String) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.view = ReflectionView::Ready {
            juz: ticket.juz,
            text,
        };
        true
    }

    #[must_use]
    pub fn view(&self) -> &ReflectionView {
        &self.view
    }

    #[must_use]
    pub fn is_current(&self, ticket: &ReflectionTicket) -> bool {
        ticket.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> JuzId {
        JuzId::new(n).unwrap()
    }

    #[test]
    fn begin_then_complete_applies() {
        let mut slot = ReflectionSlot::new();
        let ticket = slot.begin(id(4));
        assert!(slot.view().is_loading());

        assert!(slot.complete(ticket, "peace".into()));
        assert_eq!(
            slot.view(),
            &ReflectionView::Ready {
                juz: id(4),
                text: "peace".into()
            }
        );
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut slot = ReflectionSlot::new();
        let stale = slot.begin(id(1));
        let fresh = slot.begin(id(2));

        assert!(slot.complete(fresh, "new".into()));
        assert!(!slot.complete(stale, "old".into()));
        assert_eq!(slot.view().text(), Some("new"));
    }

    #[test]
    fn stale_response_does_not_clear_loading() {
        let mut slot = ReflectionSlot::new();
        let stale = slot.begin(id(1));
        let fresh = slot.begin(id(2));

        assert!(!slot.complete(stale, "old".into()));
        assert_eq!(slot.view(), &ReflectionView::Loading { juz: id(2) });
        assert!(slot.is_current(&fresh));
    }
}
