//! Chain nodes and the arena that owns them.
//!
//! Entries live in a `SlotMap`; chains link them through arena keys rather
//! than pointers, so relinking during a rehash moves no string data.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena index of an [`Entry`].
    pub(crate) struct EntryKey;
}

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) next: Option<EntryKey>,
    pub(crate) prev: Option<EntryKey>,
}

impl Entry {
    pub(crate) fn new(key: String, value: String) -> Self {
        Entry {
            key,
            value,
            next: None,
            prev: None,
        }
    }
}

pub(crate) type Arena = SlotMap<EntryKey, Entry>;

/// Pushes `k` at the head of the chain rooted at `head`.
pub(crate) fn push_front(slots: &mut Arena, head: &mut Option<EntryKey>, k: EntryKey) {
    let old = head.replace(k);
    if let Some(e) = slots.get_mut(k) {
        e.prev = None;
        e.next = old;
    }
    if let Some(old) = old.and_then(|o| slots.get_mut(o)) {
        old.prev = Some(k);
    }
}

/// Detaches `k` from the chain rooted at `head`, patching its neighbours.
/// `k` stays in the arena.
pub(crate) fn unlink(slots: &mut Arena, head: &mut Option<EntryKey>, k: EntryKey) {
    let (prev, next) = match slots.get_mut(k) {
        Some(e) => (e.prev.take(), e.next.take()),
        None => return,
    };
    if let Some(n) = next.and_then(|n| slots.get_mut(n)) {
        n.prev = prev;
    }
    match prev.and_then(|p| slots.get_mut(p)) {
        Some(p) => p.next = next,
        None => *head = next,
    }
}

/// Walks a chain head-to-tail.
#[derive(Debug)]
pub(crate) struct Chain<'a> {
    slots: &'a Arena,
    cursor: Option<EntryKey>,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(slots: &'a Arena, head: Option<EntryKey>) -> Self {
        Chain {
            slots,
            cursor: head,
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = (EntryKey, &'a Entry);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let e = self.slots.get(k)?;
        self.cursor = e.next;
        Some((k, e))
    }
}
