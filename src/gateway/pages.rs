use std::sync::Mutex;
use serde::{Deserialize, Serialize};
use crate::core::clinic::Role;

// Named pages reachable by full-page navigation. There is no client-side
// routing; a redirect is a plain location assignment on the page.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum Page {
    Login,
    Landing,
    PetListing,
    MyPetListing,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "login.html",
            Page::Landing => "index.html",
            Page::PetListing => "pets.html",
            Page::MyPetListing => "my_pets.html",
        }
    }
}

// Navigator performs full-page redirects on behalf of the guarded flows.
pub(crate) trait Navigator: Sync + Send {
    fn navigate(&self, page: Page);
}

// Notifier raises a blocking user-visible notice.
pub(crate) trait Notifier: Sync + Send {
    fn notify(&self, message: &str);
}

// NavAnnotation mirrors one navigation element and its allowed-roles list.
// An empty list means the element is always visible.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct NavAnnotation {
    pub id: String,
    pub roles: Vec<String>,
}

impl NavAnnotation {
    pub fn new(id: &str, roles: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.is_empty() || self.roles.iter().any(|r| Role::parse(r.as_str()) == role)
    }
}

// PageSurface abstracts the rendered page chrome: the user indicator, the
// annotated navigation entries and the special pets entry whose target and
// label depend on the role.
pub(crate) trait PageSurface: Sync + Send {
    fn nav_annotations(&self) -> Vec<NavAnnotation>;
    fn set_user_indicator(&self, text: &str);
    fn set_nav_visible(&self, id: &str, visible: bool);
    fn set_pets_entry(&self, page: Page, label: &str);
}

// The navigation manifest of the administration pages.
pub(crate) fn default_nav() -> Vec<NavAnnotation> {
    vec![
        NavAnnotation::new("nav-accounts", &["Administrator"]),
        NavAnnotation::new("nav-appointments", &["Administrator", "Receptionist"]),
        NavAnnotation::new("nav-my-appointments", &["Veterinarian"]),
        NavAnnotation::new("nav-pets", &[]),
    ]
}

// PageActions records the notices and the redirect issued during one page
// flow, so the HTTP layer can hand them back to the thin client and tests
// can assert on them.
#[derive(Debug, Default)]
pub(crate) struct PageActions {
    notices: Mutex<Vec<String>>,
    destination: Mutex<Option<Page>>,
}

impl PageActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_notices(&self) -> Vec<String> {
        self.notices.lock().map(|mut notices| std::mem::take(&mut *notices)).unwrap_or_default()
    }

    pub fn destination(&self) -> Option<Page> {
        self.destination.lock().map(|destination| *destination).unwrap_or(None)
    }

    pub fn redirect_path(&self) -> Option<String> {
        self.destination().map(|page| page.path().to_string())
    }
}

impl Notifier for PageActions {
    fn notify(&self, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(message.to_string());
        }
    }
}

impl Navigator for PageActions {
    fn navigate(&self, page: Page) {
        if let Ok(mut destination) = self.destination.lock() {
            *destination = Some(page);
        }
    }
}

// MemoryPage is the in-memory page chrome used by the HTTP layer and tests;
// its snapshot is what a thin client applies to the real markup.
#[derive(Debug)]
pub(crate) struct MemoryPage {
    nav: Vec<NavAnnotation>,
    indicator: Mutex<Option<String>>,
    hidden: Mutex<Vec<String>>,
    pets_entry: Mutex<Option<(Page, String)>>,
}

impl MemoryPage {
    pub fn new(nav: Vec<NavAnnotation>) -> Self {
        Self {
            nav,
            indicator: Mutex::new(None),
            hidden: Mutex::new(vec![]),
            pets_entry: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let pets_entry = self.pets_entry.lock().map(|entry| entry.clone()).unwrap_or(None);
        PageSnapshot {
            user_indicator: self.indicator.lock().map(|text| text.clone()).unwrap_or(None),
            hidden_nav: self.hidden.lock().map(|hidden| hidden.clone()).unwrap_or_default(),
            pets_href: pets_entry.as_ref().map(|(page, _)| page.path().to_string()),
            pets_label: pets_entry.map(|(_, label)| label),
        }
    }
}

impl PageSurface for MemoryPage {
    fn nav_annotations(&self) -> Vec<NavAnnotation> {
        self.nav.clone()
    }

    fn set_user_indicator(&self, text: &str) {
        if let Ok(mut indicator) = self.indicator.lock() {
            *indicator = Some(text.to_string());
        }
    }

    fn set_nav_visible(&self, id: &str, visible: bool) {
        if let Ok(mut hidden) = self.hidden.lock() {
            hidden.retain(|h| h != id);
            if !visible {
                hidden.push(id.to_string());
            }
        }
    }

    fn set_pets_entry(&self, page: Page, label: &str) {
        if let Ok(mut entry) = self.pets_entry.lock() {
            *entry = Some((page, label.to_string()));
        }
    }
}

// PageSnapshot is the rendered chrome as plain data.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct PageSnapshot {
    pub user_indicator: Option<String>,
    pub hidden_nav: Vec<String>,
    pub pets_href: Option<String>,
    pub pets_label: Option<String>,
}
