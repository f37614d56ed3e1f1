use std::fmt;

/// Reveal stage of the card. Totally ordered; the sequencer only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    #[default]
    Idle,
    /// Cake and gift text are animating in.
    Revealing,
    CakeLanded,
    GiftButtonVisible,
    /// The gift modal has been opened at least once and the stagger reveal started.
    GiftsRevealed,
    /// The "other" gift was chosen; the page transition is running.
    FinalTriggered,
    /// Terminal full-screen view is up.
    FinalShown,
}

impl Stage {
    /// Numeric code handed across the WASM boundary.
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// The four gifts offered in the gift modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GiftKind {
    Phone,
    Tickets,
    Yarn,
    Other,
}

impl GiftKind {
    /// All gifts in reveal order.
    pub const ALL: [GiftKind; 4] = [GiftKind::Phone, GiftKind::Tickets, GiftKind::Yarn, GiftKind::Other];

    pub fn index(self) -> usize {
        match self {
            GiftKind::Phone => 0,
            GiftKind::Tickets => 1,
            GiftKind::Yarn => 2,
            GiftKind::Other => 3,
        }
    }

    pub fn behavior(self) -> GiftBehavior {
        match self {
            GiftKind::Phone => GiftBehavior::HoverToggle,
            GiftKind::Tickets => GiftBehavior::Avoid,
            GiftKind::Yarn => GiftBehavior::SecondaryModal,
            GiftKind::Other => GiftBehavior::FinalSequence,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            GiftKind::Phone => "phone",
            GiftKind::Tickets => "tickets",
            GiftKind::Yarn => "yarn",
            GiftKind::Other => "other",
        }
    }

    fn from_slug(s: &str) -> Option<Self> {
        GiftKind::ALL.into_iter().find(|g| g.slug() == s)
    }
}

/// Micro-interaction attached to a gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftBehavior {
    /// Detail flips visible on hover, auto-reverts after a touch.
    HoverToggle,
    /// The running gift: flees the pointer.
    Avoid,
    /// Opens the yarn-confirm modal on top of the gift modal.
    SecondaryModal,
    /// Kicks off the final sequence.
    FinalSequence,
}

/// Lifecycle of a single gift item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GiftState {
    #[default]
    Hidden,
    Revealed,
    Interacted,
}

/// Overlays managed by the modal manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    /// Primary gift-selection modal.
    Gifts,
    /// Secondary modal opened by the yarn gift.
    YarnConfirm,
    FinalMessage,
}

impl ModalKind {
    /// Escape closes in this order.
    pub const PRIORITY: [ModalKind; 3] = [ModalKind::FinalMessage, ModalKind::YarnConfirm, ModalKind::Gifts];

    fn slug(self) -> &'static str {
        match self {
            ModalKind::Gifts => "gifts",
            ModalKind::YarnConfirm => "yarn",
            ModalKind::FinalMessage => "final",
        }
    }

    fn from_slug(s: &str) -> Option<Self> {
        ModalKind::PRIORITY.into_iter().find(|m| m.slug() == s)
    }
}

/// Number of words in the final message reveal.
pub const FINAL_WORDS: u8 = 3;

/// Handle for every page element the engine touches.
/// Each maps to a stable DOM id (see [`Element::dom_id`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Cake,
    GiftText,
    Confetti,
    Hearts,
    ScrollHint,
    GiftButton,
    Gift(GiftKind),
    /// Hidden detail revealed by a gift's hover toggle.
    GiftDetail(GiftKind),
    Modal(ModalKind),
    ModalClose(ModalKind),
    PageTransition,
    MainContent,
    FinalView,
    FinalButton,
    Word(u8),
    GiftName,
    OptionCards,
    Decoration(u8),
}

impl Element {
    /// DOM id of the element.
    pub fn dom_id(&self) -> String {
        self.to_string()
    }

    /// Parse a DOM id back into an element handle.
    pub fn from_dom_id(id: &str) -> Option<Self> {
        let fixed = match id {
            "cake" => Some(Element::Cake),
            "gift-text" => Some(Element::GiftText),
            "confetti" => Some(Element::Confetti),
            "hearts-burst" => Some(Element::Hearts),
            "scroll-hint" => Some(Element::ScrollHint),
            "gift-button" => Some(Element::GiftButton),
            "page-transition" => Some(Element::PageTransition),
            "main-content" => Some(Element::MainContent),
            "final-view" => Some(Element::FinalView),
            "final-button" => Some(Element::FinalButton),
            "final-gift-name" => Some(Element::GiftName),
            "final-options" => Some(Element::OptionCards),
            _ => None,
        };
        if fixed.is_some() {
            return fixed;
        }

        if let Some(rest) = id.strip_prefix("gift-") {
            return match rest.strip_suffix("-detail") {
                Some(slug) => GiftKind::from_slug(slug).map(Element::GiftDetail),
                None => GiftKind::from_slug(rest).map(Element::Gift),
            };
        }
        if let Some(rest) = id.strip_prefix("modal-") {
            return match rest.strip_suffix("-close") {
                Some(slug) => ModalKind::from_slug(slug).map(Element::ModalClose),
                None => ModalKind::from_slug(rest).map(Element::Modal),
            };
        }
        if let Some(n) = id.strip_prefix("final-word-") {
            return n.parse().ok().filter(|&i| i < FINAL_WORDS).map(Element::Word);
        }
        if let Some(n) = id.strip_prefix("decoration-") {
            return n.parse().ok().map(Element::Decoration);
        }
        None
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Cake => f.write_str("cake"),
            Element::GiftText => f.write_str("gift-text"),
            Element::Confetti => f.write_str("confetti"),
            Element::Hearts => f.write_str("hearts-burst"),
            Element::ScrollHint => f.write_str("scroll-hint"),
            Element::GiftButton => f.write_str("gift-button"),
            Element::Gift(g) => write!(f, "gift-{}", g.slug()),
            Element::GiftDetail(g) => write!(f, "gift-{}-detail", g.slug()),
            Element::Modal(m) => write!(f, "modal-{}", m.slug()),
            Element::ModalClose(m) => write!(f, "modal-{}-close", m.slug()),
            Element::PageTransition => f.write_str("page-transition"),
            Element::MainContent => f.write_str("main-content"),
            Element::FinalView => f.write_str("final-view"),
            Element::FinalButton => f.write_str("final-button"),
            Element::Word(i) => write!(f, "final-word-{i}"),
            Element::GiftName => f.write_str("final-gift-name"),
            Element::OptionCards => f.write_str("final-options"),
            Element::Decoration(i) => write!(f, "decoration-{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Idle < Stage::Revealing);
        assert!(Stage::CakeLanded < Stage::GiftButtonVisible);
        assert!(Stage::FinalTriggered < Stage::FinalShown);
        assert_eq!(Stage::FinalShown.code(), 6);
    }

    #[test]
    fn dom_ids_parse_back() {
        let elements = [
            Element::Cake,
            Element::Hearts,
            Element::Gift(GiftKind::Tickets),
            Element::GiftDetail(GiftKind::Phone),
            Element::Modal(ModalKind::YarnConfirm),
            Element::ModalClose(ModalKind::FinalMessage),
            Element::Word(2),
            Element::Decoration(1),
            Element::OptionCards,
        ];
        for el in elements {
            assert_eq!(Element::from_dom_id(&el.dom_id()), Some(el), "{el}");
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(Element::from_dom_id("gift-socks"), None);
        assert_eq!(Element::from_dom_id("final-word-3"), None);
        assert_eq!(Element::from_dom_id(""), None);
    }

    #[test]
    fn gift_behaviors() {
        assert_eq!(GiftKind::Tickets.behavior(), GiftBehavior::Avoid);
        assert_eq!(GiftKind::Other.behavior(), GiftBehavior::FinalSequence);
        assert_eq!(GiftKind::Yarn.index(), 2);
    }
}
