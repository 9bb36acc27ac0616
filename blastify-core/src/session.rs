use crate::composer::MessageComposer;
use crate::store::ContactStore;

/// All mutable per-session state, owned by one controller: the contact list
/// with its selection, and the message being composed. The dispatch path
/// reads a snapshot of both and never observes later mutations.
#[derive(Default)]
pub struct Session {
    pub contacts: ContactStore,
    pub composer: MessageComposer,
}

impl Session {
    pub fn new(max_message_len: Option<usize>) -> Self {
        Self {
            contacts: ContactStore::new(),
            composer: MessageComposer::new(max_message_len),
        }
    }

    /// Empties the contact list and selection, and resets the composer.
    pub fn clear_all(&mut self) {
        self.contacts.clear_all();
        self.composer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Contact;

    #[test]
    fn clear_all_resets_composer_as_well() {
        let mut session = Session::new(None);
        session.contacts.replace_all(vec![Contact {
            id: "1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
        }]);
        session.contacts.select_all();
        session.composer.set_text("draft").unwrap();

        session.clear_all();

        assert!(session.contacts.contacts().is_empty());
        assert!(session.contacts.selection().is_empty());
        assert!(session.composer.is_empty());
    }
}
