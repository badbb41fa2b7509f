use crate::lifecycle::Lifecycle;
use crate::types::DbId;

/// Behaviour shared by every server-owned record (developers and projects).
pub trait Entity: Clone + Send + Sync + 'static {
    /// Lower-case entity kind used in log fields and user-facing messages.
    const KIND: &'static str;

    fn id(&self) -> DbId;

    /// The field text search runs against.
    fn name(&self) -> &str;

    fn lifecycle(&self) -> Lifecycle;

    fn is_active(&self) -> bool {
        self.lifecycle().is_active()
    }
}
