use crate::contact::Contact;
use std::collections::HashSet;

/// In-memory contact list plus the selection set for the next send.
///
/// The selection is always a subset of the current contact ids: replacing or
/// clearing the list drops any selection referring to the old batch.
#[derive(Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    selection: HashSet<String>,
}

impl ContactStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole list. Selections never survive a re-upload.
    pub fn replace_all(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
        self.selection.clear();
    }

    /// Flips membership of `id` in the selection set. Ids that do not
    /// reference a known contact are ignored.
    pub fn toggle_select(&mut self, id: &str) {
        if self.get(id).is_none() {
            return;
        }
        if !self.selection.remove(id) {
            self.selection.insert(id.to_owned());
        }
    }

    pub fn select_all(&mut self) {
        self.selection = self.contacts.iter().map(|c| c.id.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn clear_all(&mut self) {
        self.contacts.clear();
        self.selection.clear();
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    /// Selected contacts in list order, cloned as a dispatch snapshot.
    pub fn selected_contacts(&self) -> Vec<Contact> {
        self.contacts
            .iter()
            .filter(|c| self.selection.contains(&c.id))
            .cloned()
            .collect()
    }
}
