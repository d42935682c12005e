//! Offset arithmetic for paging through search results.

/// Computes the offset reached by moving `page_delta` pages from
/// `current_offset`.
///
/// Paging never goes below zero, never goes past `total` (the current offset
/// is kept instead), and is refused entirely while the total is unknown.
#[must_use]
pub fn next_offset(current_offset: u32, total: Option<u32>, page_delta: i32, page_size: u32) -> u32 {
    let candidate = i64::from(current_offset) + i64::from(page_delta) * i64::from(page_size);
    if candidate <= 0 {
        return 0;
    }
    let Some(total) = total else {
        return 0;
    };
    if candidate > i64::from(total) {
        return current_offset;
    }
    u32::try_from(candidate).unwrap_or(current_offset)
}

#[must_use]
pub fn can_page_forward(offset: u32, total: Option<u32>, page_size: u32) -> bool {
    total.is_some_and(|total| u64::from(offset) + u64::from(page_size) <= u64::from(total))
}

#[must_use]
pub fn can_page_backward(offset: u32, total: Option<u32>) -> bool {
    total.is_some() && offset > 0
}

/// The "Displaying start — end of total" line shown above results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerSummary {
    pub start: u32,
    pub end: u32,
    pub total: Option<u32>,
    pub label: &'static str,
}

impl PagerSummary {
    #[must_use]
    pub fn new(offset: u32, shown: usize, total: Option<u32>, label: &'static str) -> Self {
        let shown = u32::try_from(shown).unwrap_or(u32::MAX);
        Self {
            start: offset,
            end: offset.saturating_add(shown),
            total,
            label,
        }
    }
}

impl std::fmt::Display for PagerSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.total {
            Some(total) => write!(
                f,
                "Displaying {} \u{2014} {} of {} {}",
                self.start, self.end, total, self.label
            ),
            None => write!(f, "Displaying {} \u{2014} {} {}", self.start, self.end, self.label),
        }
    }
}
