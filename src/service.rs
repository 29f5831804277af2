//! Show/hide bookkeeping and permission gating for the bubble.
//!
//! The embedding application talks to [`BubbleService`]; the platform-specific
//! overlay permission sits behind [`PermissionProvider`].

pub trait PermissionProvider {
    /// Whether the app may currently draw over other windows.
    fn can_draw_overlays(&self) -> bool;

    /// Ask the user for the permission. Returns `true` only when it was
    /// granted synchronously.
    fn request(&mut self) -> bool;
}

/// Provider with a fixed answer. `request` grants it, like a user flipping the
/// switch in system settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPermission {
    granted: bool,
}

impl StaticPermission {
    pub fn new(granted: bool) -> Self {
        Self { granted }
    }

    pub fn grant(&mut self) {
        self.granted = true;
    }
}

impl PermissionProvider for StaticPermission {
    fn can_draw_overlays(&self) -> bool {
        self.granted
    }

    fn request(&mut self) -> bool {
        self.granted = true;
        // settings flow is asynchronous; the caller has to check again later
        false
    }
}

macro_rules! popup_fields {
    ($($field:ident => $default:expr),+ $(,)?) => {
        /// Display strings for the ride-request card. Passed through unchanged.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct PopupContent {
            $(pub $field: String,)+
        }

        impl Default for PopupContent {
            fn default() -> Self {
                Self {
                    $($field: $default.to_string(),)+
                }
            }
        }

        impl PopupContent {
            /// Take every non-empty field from `overrides`, keep ours otherwise.
            pub fn merged_with(&self, overrides: &PopupContent) -> PopupContent {
                PopupContent {
                    $($field: if overrides.$field.is_empty() {
                        self.$field.clone()
                    } else {
                        overrides.$field.clone()
                    },)+
                }
            }

            /// Every field blank; handy as a base for partial overrides.
            pub fn empty() -> Self {
                Self {
                    $($field: String::new(),)+
                }
            }
        }
    };
}

popup_fields! {
    title => "New Ride Request",
    subtitle => "Tap to view details",
    price => "$24.50",
    duration => "15 min",
    distance => "8.2 km",
    pickup_title => "Pickup Location",
    pickup_address => "123 Main Street, Downtown Area",
    destination_title => "Destination",
    destination_address => "456 Business Center, Tech District",
    payment_method => "Cash",
    accept_text => "Accept",
    reject_text => "Reject",
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleOptions {
    pub title: String,
    pub subtitle: String,
    pub show_badge: bool,
    pub badge_count: u32,
    pub icon: String,
    pub popup: PopupContent,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        Self {
            title: "New Order".to_string(),
            subtitle: "Tap to view details".to_string(),
            show_badge: true,
            badge_count: 1,
            icon: "tylo_circle".to_string(),
            popup: PopupContent::default(),
        }
    }
}

impl BubbleOptions {
    /// Fill blank strings from the defaults; popup fields merge one by one.
    pub fn resolved(self) -> Self {
        let defaults = Self::default();
        let or_default = |value: String, fallback: String| {
            if value.is_empty() { fallback } else { value }
        };
        Self {
            title: or_default(self.title, defaults.title),
            subtitle: or_default(self.subtitle, defaults.subtitle),
            show_badge: self.show_badge,
            badge_count: self.badge_count,
            icon: or_default(self.icon, defaults.icon),
            popup: defaults.popup.merged_with(&self.popup),
        }
    }
}

/// What the user chose on the popup card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Accept,
    Reject,
    Dismiss,
}

#[derive(Debug)]
pub struct BubbleService<P: PermissionProvider> {
    permission: P,
    visible: bool,
    options: Option<BubbleOptions>,
}

impl<P: PermissionProvider> BubbleService<P> {
    pub fn new(permission: P) -> Self {
        Self {
            permission,
            visible: false,
            options: None,
        }
    }

    pub fn check_permission(&self) -> bool {
        self.permission.can_draw_overlays()
    }

    pub fn request_permission(&mut self) -> bool {
        if self.permission.can_draw_overlays() {
            return true;
        }
        let granted = self.permission.request();
        tracing::info!(granted, "overlay permission requested");
        granted
    }

    /// Start showing the bubble. Returns `false` without touching state when
    /// the overlay permission is missing.
    pub fn show_bubble(&mut self, options: BubbleOptions) -> bool {
        if !self.permission.can_draw_overlays() {
            tracing::info!("show_bubble refused: overlay permission missing");
            return false;
        }
        let options = options.resolved();
        tracing::info!(
            title = %options.title,
            popup_title = %options.popup.title,
            price = %options.popup.price,
            "showing bubble"
        );
        self.options = Some(options);
        self.visible = true;
        true
    }

    pub fn hide_bubble(&mut self) -> bool {
        if self.visible {
            tracing::info!("hiding bubble");
        }
        self.visible = false;
        true
    }

    pub fn is_bubble_visible(&self) -> bool {
        self.visible
    }

    /// Options from the most recent successful `show_bubble`.
    pub fn options(&self) -> Option<&BubbleOptions> {
        self.options.as_ref()
    }

    pub fn permission_mut(&mut self) -> &mut P {
        &mut self.permission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_requires_permission() {
        let mut svc = BubbleService::new(StaticPermission::new(false));
        assert!(!svc.check_permission());
        assert!(!svc.show_bubble(BubbleOptions::default()));
        assert!(!svc.is_bubble_visible());
        assert!(svc.options().is_none());
    }

    #[test]
    fn request_permission_reports_pending_then_granted() {
        let mut svc = BubbleService::new(StaticPermission::new(false));
        assert!(!svc.request_permission());
        // user came back from settings
        assert!(svc.check_permission());
        assert!(svc.request_permission());
    }

    #[test]
    fn show_then_hide_toggles_visibility() {
        let mut svc = BubbleService::new(StaticPermission::new(true));
        assert!(svc.show_bubble(BubbleOptions::default()));
        assert!(svc.is_bubble_visible());
        assert!(svc.hide_bubble());
        assert!(!svc.is_bubble_visible());
        // hiding twice is fine
        assert!(svc.hide_bubble());
    }

    #[test]
    fn blank_popup_fields_fall_back_to_defaults() {
        let mut svc = BubbleService::new(StaticPermission::new(true));
        let popup = PopupContent {
            price: "$9.00".into(),
            pickup_address: "1 Harbour Rd".into(),
            ..PopupContent::empty()
        };
        let opts = BubbleOptions {
            title: String::new(),
            popup,
            ..BubbleOptions::default()
        };
        svc.show_bubble(opts);
        let stored = svc.options().unwrap();
        assert_eq!(stored.title, "New Order");
        assert_eq!(stored.popup.price, "$9.00");
        assert_eq!(stored.popup.pickup_address, "1 Harbour Rd");
        assert_eq!(stored.popup.accept_text, "Accept");
        assert_eq!(stored.popup.payment_method, "Cash");
    }

    #[test]
    fn blank_icon_resolves_to_default_drawable() {
        assert_eq!(BubbleOptions::default().icon, "tylo_circle");
        let opts = BubbleOptions {
            icon: String::new(),
            ..BubbleOptions::default()
        };
        assert_eq!(opts.resolved().icon, "tylo_circle");
    }
}
