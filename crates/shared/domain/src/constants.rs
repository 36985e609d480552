//! Domain-level constants.
//!
//! These constants define the storage vocabulary and the listing bounds.

// =============================================================================
// Ticket Status
// =============================================================================

pub const STATUS_OPEN: &str = "OPEN";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_RESOLVED: &str = "RESOLVED";
pub const STATUS_CLOSED: &str = "CLOSED";

// =============================================================================
// Ticket Priority
// =============================================================================

pub const PRIORITY_LOW: &str = "LOW";
pub const PRIORITY_MEDIUM: &str = "MEDIUM";
pub const PRIORITY_HIGH: &str = "HIGH";
pub const PRIORITY_CRITICAL: &str = "CRITICAL";

// =============================================================================
// Pagination
// =============================================================================

/// Page size used when the caller asks for nothing sensible
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Largest page a single list call may return
pub const MAX_PAGE_SIZE: u64 = 100;

/// Clamp a requested page size to `1..=MAX_PAGE_SIZE`.
///
/// Zero, negative, and oversized requests all fall back to
/// [`DEFAULT_PAGE_SIZE`] rather than saturating at the maximum.
pub fn clamp_page_size(requested: i64) -> u64 {
    if requested <= 0 || requested > MAX_PAGE_SIZE as i64 {
        DEFAULT_PAGE_SIZE
    } else {
        requested as u64
    }
}
