/// The page's sections, top to bottom. Each one is laid out as one viewport high.
pub const PORTFOLIO_SECTIONS: [&str; 6] = [
    "hero",
    "projects",
    "skills",
    "experience",
    "Open-Source",
    "contact",
];

/// Maps the scroll offset to the section currently on screen, which the mascot uses as its
/// animation target.
///
/// Last writer wins: the value is whatever the most recent scroll event computed.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    sections: &'static [&'static str],
    scroll_position: f64,
    current: usize,
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self {
            sections: &PORTFOLIO_SECTIONS,
            scroll_position: 0.0,
            current: 0,
        }
    }
}

impl SectionTracker {
    /// Returns a tracker positioned on the first of `sections`, or an error if there is none.
    pub fn new(sections: &'static [&'static str]) -> Result<Self, String> {
        if sections.is_empty() {
            return Err("A page needs at least one section to track.".into());
        }
        Ok(Self {
            sections,
            scroll_position: 0.0,
            current: 0,
        })
    }

    pub fn on_scroll(&mut self, position: f64, viewport_height: f64) -> &'static str {
        if viewport_height.is_nan() || viewport_height <= 0.0 || position.is_nan() {
            return self.current_section();
        }
        self.scroll_position = position;

        // Overscroll at the top of the page reports negative offsets.
        let index = (position.max(0.0) / viewport_height).floor() as usize;
        // Past the last section (a tall footer, say) the previous value sticks.
        if index < self.sections.len() {
            self.current = index;
        }
        self.current_section()
    }

    pub fn current_section(&self) -> &'static str {
        self.sections[self.current]
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }
}
