//! Choice of change-subscription API on the OS color scheme query.

/// How the controller hears about OS color scheme changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStyle {
    /// `addEventListener("change", ..)`
    EventListener,
    /// `addListener(..)`, still the only option on older Safari
    Legacy,
}

/// Pick the subscription API from what the query object exposes.
///
/// `None` means no push updates at all; the drift poll is then the only
/// thing that notices an OS change.
pub fn subscription_style(has_event_listener: bool, has_legacy: bool) -> Option<SubscriptionStyle> {
    if has_event_listener {
        Some(SubscriptionStyle::EventListener)
    } else if has_legacy {
        Some(SubscriptionStyle::Legacy)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use crate::theme::memory::{ManualSignal, MemoryStore, RecordingSurface};
    use crate::theme::ThemeController;
    use folio_theme::ColorMode;

    #[test]
    fn test_subscription_style_prefers_event_listener() {
        assert_eq!(
            subscription_style(true, true),
            Some(SubscriptionStyle::EventListener)
        );
        assert_eq!(
            subscription_style(true, false),
            Some(SubscriptionStyle::EventListener)
        );
    }

    #[test]
    fn test_subscription_style_falls_back_to_legacy() {
        assert_eq!(
            subscription_style(false, true),
            Some(SubscriptionStyle::Legacy)
        );
    }

    #[test]
    fn test_subscription_style_none_leaves_poll_as_only_trigger() {
        assert_eq!(subscription_style(false, false), None);

        // Without a subscription nothing calls reconcile on an OS flip;
        // the next poll tick still brings the page in line.
        let controller = ThemeController::new(
            MemoryStore::with_value("theme", "system"),
            ManualSignal::new(ColorMode::Light),
            RecordingSurface::new(),
            &ThemeConfig::default(),
        );
        controller.initialize();

        controller.signal().set(ColorMode::Dark);
        assert_eq!(controller.surface().attribute(), Some("light"));

        assert!(controller.poll_drift());
        assert_eq!(controller.surface().attribute(), Some("dark"));
    }
}
