//! Primary-flag handling shared by the three contact collections.

use crate::model::{AddressEntry, EmailEntry, PhoneEntry};

/// Common view over contact rows that carry a primary flag.
pub trait ContactEntry {
    fn is_primary(&self) -> bool;
    fn set_is_primary(&mut self, primary: bool);
}

impl ContactEntry for EmailEntry {
    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn set_is_primary(&mut self, primary: bool) {
        self.is_primary = primary;
    }
}

impl ContactEntry for PhoneEntry {
    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn set_is_primary(&mut self, primary: bool) {
        self.is_primary = primary;
    }
}

impl ContactEntry for AddressEntry {
    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn set_is_primary(&mut self, primary: bool) {
        self.is_primary = primary;
    }
}

/// Marks the entry at `index` as primary and clears the flag everywhere
/// else, keeping at most one primary per collection. Out-of-range indices
/// leave the slice untouched.
pub fn set_primary<T: ContactEntry>(entries: &mut [T], index: usize) {
    if index >= entries.len() {
        return;
    }
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.set_is_primary(i == index);
    }
}

/// First entry flagged as primary, if any.
pub fn primary<T: ContactEntry>(entries: &[T]) -> Option<&T> {
    entries.iter().find(|entry| entry.is_primary())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(flags: &[bool]) -> Vec<EmailEntry> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &is_primary)| EmailEntry {
                email: format!("e{}@x.com", i),
                is_primary,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn set_primary_clears_other_entries() {
        let mut entries = emails(&[true, false, false]);
        set_primary(&mut entries, 2);
        let flags: Vec<bool> = entries.iter().map(|e| e.is_primary).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn set_primary_out_of_range_is_a_no_op() {
        let mut entries = emails(&[true, false]);
        set_primary(&mut entries, 5);
        assert!(entries[0].is_primary);
    }

    #[test]
    fn primary_finds_flagged_entry() {
        let entries = emails(&[false, true]);
        assert_eq!(primary(&entries).unwrap().email, "e1@x.com");
        assert!(primary(&emails(&[false, false])).is_none());
    }
}
