//! The fixed set of services shown on the screen.

/// One service entry: a title and a symbolic icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub title: &'static str,
    pub icon: &'static str,
}

impl ServiceDescriptor {
    const fn new(title: &'static str, icon: &'static str) -> Self {
        Self { title, icon }
    }

    /// Terminal glyph for this entry's icon.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        glyph(self.icon)
    }
}

pub static SERVICES: &[ServiceDescriptor] = &[
    ServiceDescriptor::new("Patta Maarudhal", "file-outline"),
    ServiceDescriptor::new("Patta Sitta", "home-outline"),
    ServiceDescriptor::new("A-Pathavidu", "home-file-outline"),
    ServiceDescriptor::new("Patta Sitta Vivaramgal", "check-outline"),
    ServiceDescriptor::new("Arasu Puramboku", "file-alert-outline"),
    ServiceDescriptor::new("Pulapada Vivaramgal", "file-check-outline"),
    ServiceDescriptor::new("Patta Nagalai", "ruler-square-plus-outline"),
    ServiceDescriptor::new("Nagara Nila", "summit"),
    ServiceDescriptor::new("Nagara Nila Alavai", "checkbox-outline"),
    ServiceDescriptor::new("Vinnapa Nilai", "heart-pulse"),
];

/// Drawn for icon names with no known glyph.
pub const MISSING_GLYPH: &str = "□";

/// Resolve a Material Design icon name to a single-width terminal glyph.
#[must_use]
pub fn glyph(icon: &str) -> &'static str {
    match icon {
        "menu" => "☰",
        "file-outline" => "▤",
        "home-outline" | "home-file-outline" => "⌂",
        "check-outline" => "✓",
        "file-alert-outline" => "⚠",
        "file-check-outline" => "✔",
        "ruler-square-plus-outline" => "⊞",
        "summit" => "▲",
        "checkbox-outline" => "☑",
        "heart-pulse" => "♥",
        _ => MISSING_GLYPH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_services_in_order() {
        assert_eq!(SERVICES.len(), 10);
        assert_eq!(SERVICES[0].title, "Patta Maarudhal");
        assert_eq!(SERVICES[0].icon, "file-outline");
        assert_eq!(SERVICES[9].title, "Vinnapa Nilai");
        assert_eq!(SERVICES[9].icon, "heart-pulse");
    }

    #[test]
    fn test_every_service_has_a_glyph() {
        for service in SERVICES {
            assert_ne!(service.glyph(), MISSING_GLYPH, "{}", service.title);
        }
    }

    #[test]
    fn test_unknown_icon_falls_back() {
        assert_eq!(glyph("no-such-icon"), MISSING_GLYPH);
    }
}
