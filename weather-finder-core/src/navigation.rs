use serde::{Deserialize, Serialize};

/// An entry of the main navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self { label: label.into(), href: href.into() }
    }
}

/// Sliding transition played when the mobile menu changes visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SlideDown,
    SlideUp,
}

/// Main navigation plus the collapsible mobile copy of it.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    main: Vec<MenuItem>,
    mobile: Vec<MenuItem>,
    mobile_visible: bool,
}

impl Navigation {
    /// The mobile menu starts as a hidden clone of the main menu.
    pub fn new(main: Vec<MenuItem>) -> Self {
        let mobile = main.clone();
        Self { main, mobile, mobile_visible: false }
    }

    pub fn main_menu(&self) -> &[MenuItem] {
        &self.main
    }

    pub fn mobile_menu(&self) -> &[MenuItem] {
        &self.mobile
    }

    pub fn is_mobile_visible(&self) -> bool {
        self.mobile_visible
    }

    pub fn toggle(&mut self) -> Transition {
        self.mobile_visible = !self.mobile_visible;
        if self.mobile_visible { Transition::SlideDown } else { Transition::SlideUp }
    }
}
